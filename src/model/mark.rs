//! Mark colors used to flag rows.

use std::fmt;

/// Color a row can be flagged with.
///
/// `None` is never stored in the overlay; it means "no entry".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarkColor {
    /// Unmarked.
    #[default]
    None,
    /// Red flag.
    Red,
    /// Green flag.
    Green,
    /// Amber flag.
    Amber,
}

impl MarkColor {
    /// Wire name used in snapshots and exports. Empty for `None`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Red => "red",
            Self::Green => "green",
            Self::Amber => "amber",
        }
    }

    /// Parse a wire name. Anything unknown becomes `None`.
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "red" => Self::Red,
            "green" => Self::Green,
            "amber" => Self::Amber,
            _ => Self::None,
        }
    }

    /// Color picked by a mark-mode key (`r`, `g`, `a`, `c` for clear).
    pub fn from_key(ch: char) -> Option<Self> {
        match ch {
            'r' => Some(Self::Red),
            'g' => Some(Self::Green),
            'a' => Some(Self::Amber),
            'c' => Some(Self::None),
            _ => None,
        }
    }

    /// True for any real color.
    pub fn is_marked(self) -> bool {
        self != Self::None
    }
}

impl fmt::Display for MarkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            other => f.write_str(other.as_str()),
        }
    }
}
