// File: ./src/model/priority.rs
use crate::model::error::TaskError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{EnumIter, IntoEnumIterator};

/// Task priority. Declaration order doubles as sort order: `A` is the most
/// urgent and `None` sorts after every letter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, EnumIter,
)]
pub enum Priority {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    #[default]
    None,
}

impl Priority {
    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_ascii_uppercase() {
            return None;
        }
        Self::iter().nth((c as u8 - b'A') as usize)
    }

    /// Parses a code as shown in filters and sort headers: a letter, or `-`
    /// for no priority.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        match (chars.next(), chars.next()) {
            (Some('-'), None) => Some(Priority::None),
            (Some(c), None) => Self::from_char(c.to_ascii_uppercase()),
            _ => None,
        }
    }

    pub fn letter(self) -> Option<char> {
        match self {
            Priority::None => None,
            p => Some((b'A' + p as u8) as char),
        }
    }

    pub fn code(self) -> String {
        self.letter().map_or_else(|| "-".to_string(), |c| c.to_string())
    }

    /// `(A)` style marker, without the separating space.
    pub fn in_file_format(self) -> Option<String> {
        self.letter().map(|c| format!("({})", c))
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| TaskError::InvalidPriority(s.to_string()))
    }
}
