use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Identifier carried by a dataset row.
///
/// Opaque text; datasets are not required to keep it unique.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({:?})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QuestionId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_display() {
        let id = QuestionId::new("enem-2023-14");
        assert_eq!(id.to_string(), "enem-2023-14");
        assert_eq!(format!("{id:?}"), "QuestionId(\"enem-2023-14\")");
    }

    #[test]
    fn question_id_from_str_trims() {
        let id: QuestionId = "  q1 ".parse().unwrap();
        assert_eq!(id.as_str(), "q1");
        assert!(!id.is_empty());
    }
}
