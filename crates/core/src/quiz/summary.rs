use chrono::{DateTime, Duration, Utc};

use crate::model::{AvatarId, Category};

use super::PhaseMedal;

/// Results of a finished session, shown on the end screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub category: Category,
    pub avatar: AvatarId,
    pub player_name: Option<String>,
    pub score: usize,
    pub total: usize,
    pub best_streak: usize,
    pub medals: Vec<PhaseMedal>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Share of correct answers, rounded to the nearest percent.
    #[must_use]
    pub fn accuracy_percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (self.score * 100 + self.total / 2) / self.total
    }

    #[must_use]
    pub fn phases_passed(&self) -> usize {
        self.medals.iter().filter(|medal| medal.dance).count()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn summary(score: usize, total: usize) -> QuizSummary {
        QuizSummary {
            category: Category::Enem,
            avatar: AvatarId::Kako,
            player_name: None,
            score,
            total,
            best_streak: score,
            medals: vec![
                PhaseMedal {
                    phase: 1,
                    total_answered: 5,
                    dance: true,
                },
                PhaseMedal {
                    phase: 2,
                    total_answered: 10,
                    dance: false,
                },
            ],
            started_at: fixed_now(),
            finished_at: fixed_now() + Duration::minutes(3),
        }
    }

    #[test]
    fn accuracy_rounds_to_nearest() {
        assert_eq!(summary(2, 3).accuracy_percent(), 67);
        assert_eq!(summary(1, 3).accuracy_percent(), 33);
        assert_eq!(summary(0, 0).accuracy_percent(), 0);
    }

    #[test]
    fn counts_passed_phases_and_duration() {
        let summary = summary(7, 10);
        assert_eq!(summary.phases_passed(), 1);
        assert_eq!(summary.duration(), Duration::minutes(3));
    }
}
