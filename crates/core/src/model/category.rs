use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {raw}")]
pub struct ParseCategoryError {
    pub raw: String,
}

/// Question set a player can pick on the home screen.
///
/// Each category is backed by its own dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ifes,
    Enem,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Ifes, Category::Enem];

    /// Upper-case label used in headers and in the `mode` column.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Ifes => "IFES",
            Category::Enem => "ENEM",
        }
    }

    #[must_use]
    pub fn blurb(self) -> &'static str {
        "Official questions from the last 3 years"
    }

    /// File name of the dataset relative to the data directory or base URL.
    #[must_use]
    pub fn dataset_file(self) -> &'static str {
        match self {
            Category::Ifes => "ifes_2022_2024_simplificado.csv",
            Category::Enem => "enem_2022_2024_simplificado.csv",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IFES" => Ok(Category::Ifes),
            "ENEM" => Ok(Category::Enem),
            _ => Err(ParseCategoryError { raw: s.to_string() }),
        }
    }
}
