use quiz_core::model::{AVATARS, AvatarId, Category, option_letter};
use quiz_core::quiz::{
    FeedbackKind, PhaseMedal, QuizEvent, QuizSnapshot, QuizStatus, QuizSummary,
};

//
// ─── HEADER ────────────────────────────────────────────────────────────────────
//

/// Chips shown in the top bar on every screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderVm {
    pub category: Option<&'static str>,
    pub avatar: Option<String>,
    pub player_name: Option<String>,
    pub score: usize,
}

#[must_use]
pub fn map_header(snapshot: &QuizSnapshot) -> HeaderVm {
    let selection = &snapshot.selection;
    HeaderVm {
        category: selection.category.map(Category::label),
        avatar: selection.avatar.map(|id| {
            let avatar = id.avatar();
            format!("{} {}", avatar.emoji, avatar.name)
        }),
        player_name: selection.display_name().map(str::to_string),
        score: snapshot.score,
    }
}

//
// ─── HOME ──────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryCardVm {
    pub category: Category,
    pub label: &'static str,
    pub blurb: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarCardVm {
    pub id: AvatarId,
    pub emoji: &'static str,
    pub name: &'static str,
    pub tagline: &'static str,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub categories: Vec<CategoryCardVm>,
    pub avatars: Vec<AvatarCardVm>,
    pub player_name: String,
    pub can_start: bool,
}

/// `loaded` gates the start button on top of the selection. A session
/// already under way keeps it disabled.
#[must_use]
pub fn map_home(snapshot: &QuizSnapshot, loaded: bool) -> HomeVm {
    let selection = &snapshot.selection;
    let categories = Category::ALL
        .iter()
        .map(|&category| CategoryCardVm {
            category,
            label: category.label(),
            blurb: category.blurb(),
            selected: selection.category == Some(category),
        })
        .collect();
    let avatars = AVATARS
        .iter()
        .map(|avatar| AvatarCardVm {
            id: avatar.id,
            emoji: avatar.emoji,
            name: avatar.name,
            tagline: avatar.tagline,
            selected: selection.avatar == Some(avatar.id),
        })
        .collect();

    HomeVm {
        categories,
        avatars,
        player_name: selection.player_name.clone(),
        can_start: loaded && snapshot.status == QuizStatus::Home && selection.can_start(),
    }
}

//
// ─── PLAY ──────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub correct: bool,
    /// Styling hook: `right` or `wrong`.
    pub tone: &'static str,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayVm {
    pub heading: String,
    pub subject: String,
    pub stem: String,
    pub options: Vec<OptionVm>,
    pub options_enabled: bool,
    pub feedback: Option<FeedbackVm>,
    pub streak: usize,
    pub phase: usize,
    pub phase_correct: usize,
}

/// `None` when there is no question to show.
#[must_use]
pub fn map_play(snapshot: &QuizSnapshot) -> Option<PlayVm> {
    let question = snapshot.question.as_ref()?;
    let label = snapshot
        .selection
        .category
        .or(question.category)
        .map_or("", Category::label);
    let tag = match question.year {
        Some(year) => format!("[{label} {year}]"),
        None => format!("[{label}]"),
    };
    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(index, text)| OptionVm {
            index,
            letter: option_letter(index).map_or_else(|| (index + 1).to_string(), String::from),
            text: text.clone(),
        })
        .collect();

    Some(PlayVm {
        heading: format!(
            "{tag} Question {} of {}",
            snapshot.question_number(),
            snapshot.total
        ),
        subject: question.subject.clone(),
        stem: question.stem.clone(),
        options,
        options_enabled: snapshot.can_answer,
        feedback: snapshot.feedback.as_ref().map(|feedback| {
            let correct = feedback.kind == FeedbackKind::Correct;
            FeedbackVm {
                correct,
                tone: if correct { "right" } else { "wrong" },
                text: feedback.text.clone(),
            }
        }),
        streak: snapshot.streak,
        phase: snapshot.phase_number(),
        phase_correct: snapshot.phase_correct,
    })
}

//
// ─── OVERLAYS ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedalVm {
    pub title: String,
    pub answered: String,
    pub dance: bool,
}

#[must_use]
pub fn map_medal(medal: PhaseMedal) -> MedalVm {
    MedalVm {
        title: format!("Phase {} complete!", medal.phase),
        answered: format!("Questions answered: {}", medal.total_answered),
        dance: medal.dance,
    }
}

/// Short celebration class for the play stage. Wrong answers get none.
#[must_use]
pub fn burst_class(event: QuizEvent) -> Option<&'static str> {
    match event {
        QuizEvent::AnswerCorrect => Some("burst-correct"),
        QuizEvent::AnswerWrong => None,
        QuizEvent::PhaseComplete(medal) if medal.dance => Some("burst-dance"),
        QuizEvent::PhaseComplete(_) => Some("burst-medal"),
        QuizEvent::Finished => Some("burst-finish"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinishedVm {
    pub headline: String,
    pub score_line: String,
    pub details: Option<String>,
}

/// The summary adds accuracy and medal details when available.
#[must_use]
pub fn map_finished(snapshot: &QuizSnapshot, summary: Option<&QuizSummary>) -> FinishedVm {
    let label = snapshot.selection.category.map_or("quiz", Category::label);
    FinishedVm {
        headline: format!("End of the {label} set!"),
        score_line: format!("Final score: {}", snapshot.score),
        details: summary.map(|summary| {
            format!(
                "{}% correct · best streak {} · {} of {} phases passed",
                summary.accuracy_percent(),
                summary.best_streak,
                summary.phases_passed(),
                summary.medals.len()
            )
        }),
    }
}
