use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown avatar: {raw}")]
pub struct ParseAvatarError {
    pub raw: String,
}

/// Identifier of a playable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvatarId {
    Ze,
    Kako,
    Lia,
    Dora,
}

/// Display data for a playable character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avatar {
    pub id: AvatarId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub tagline: &'static str,
}

pub const AVATARS: [Avatar; 4] = [
    Avatar {
        id: AvatarId::Ze,
        name: "Zé",
        emoji: "😎",
        tagline: "Laid-back, always in style!",
    },
    Avatar {
        id: AvatarId::Kako,
        name: "Kako",
        emoji: "🤓",
        tagline: "Clever nerd, aiming for 100!",
    },
    Avatar {
        id: AvatarId::Lia,
        name: "Lia",
        emoji: "😊",
        tagline: "Creative and optimistic!",
    },
    Avatar {
        id: AvatarId::Dora,
        name: "Dora",
        emoji: "😏",
        tagline: "Strategic, solves everything!",
    },
];

impl AvatarId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AvatarId::Ze => "ze",
            AvatarId::Kako => "kako",
            AvatarId::Lia => "lia",
            AvatarId::Dora => "dora",
        }
    }

    /// Roster entry for this id.
    #[must_use]
    pub fn avatar(self) -> Avatar {
        match self {
            AvatarId::Ze => AVATARS[0],
            AvatarId::Kako => AVATARS[1],
            AvatarId::Lia => AVATARS[2],
            AvatarId::Dora => AVATARS[3],
        }
    }
}

impl fmt::Display for AvatarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvatarId {
    type Err = ParseAvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AVATARS
            .iter()
            .map(|avatar| avatar.id)
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAvatarError { raw: s.to_string() })
    }
}
