use std::fmt;

/// Identity of a player.
///
/// Ids are allocated by [`crate::GameState`] and never reused, so two players
/// are only ever equal when they are the same player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The two sides of the game.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PlayerKind {
    MrX,
    Detective,
}

impl PlayerKind {
    pub const fn is_mr_x(self) -> bool {
        matches!(self, Self::MrX)
    }

    pub const fn is_detective(self) -> bool {
        matches!(self, Self::Detective)
    }
}
