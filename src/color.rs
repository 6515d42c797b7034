use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A symbolic color tag.
///
/// Colors carry no visual meaning here; mapping them to anything drawable is the display layer's business.
/// [`Custom`](Self::Custom) covers puzzles with more colors than are named.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Color {
    /// Prints as `r`.
    Red,
    /// Prints as `o`.
    Orange,
    /// Prints as `y`.
    Yellow,
    /// Prints as `g`.
    Green,
    /// Prints as `c`.
    Cyan,
    /// Prints as `b`.
    Blue,
    /// Prints as `p`.
    Purple,
    /// Any other color, identified by its symbol.
    Custom(char),
}

impl Color {
    /// The single character used for this color when a board is printed as text.
    pub fn symbol(&self) -> char {
        match self {
            Self::Red => 'r',
            Self::Orange => 'o',
            Self::Yellow => 'y',
            Self::Green => 'g',
            Self::Cyan => 'c',
            Self::Blue => 'b',
            Self::Purple => 'p',
            Self::Custom(symbol) => *symbol,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Orange => write!(f, "orange"),
            Self::Yellow => write!(f, "yellow"),
            Self::Green => write!(f, "green"),
            Self::Cyan => write!(f, "cyan"),
            Self::Blue => write!(f, "blue"),
            Self::Purple => write!(f, "purple"),
            Self::Custom(symbol) => write!(f, "custom '{}'", symbol),
        }
    }
}
