//! Post row classification
//!
//! Reads the three things the walk decides on from an [`EntryBlock`]: the
//! posting date, the push count and whether the post still exists.

use crate::crawler::parser::EntryBlock;
use std::fmt;

/// Push cell text of a post that reached the display ceiling
pub const MAXED_MARKER: &str = "爆";

/// Prefix of the push cell text for net-negative posts ("X1" … "XX")
pub const CONTROVERSIAL_PREFIX: char = 'X';

/// Score assigned to a maxed post
pub const MAXED_SCORE: i32 = 100;

/// Score assigned to a net-negative post
pub const CONTROVERSIAL_SCORE: i32 = -10;

/// How a push cell was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushReading {
    /// Plain integer
    Count(i32),

    /// "爆"
    Maxed,

    /// Text starting with "X"
    Controversial,

    /// Empty cell (no pushes yet)
    Blank,

    /// Anything else; scored as 0 but kept distinguishable
    Unrecognized(String),
}

impl PushReading {
    /// Parses push cell text
    ///
    /// # Examples
    ///
    /// ```
    /// use ptt_harvest::crawler::PushReading;
    ///
    /// assert_eq!(PushReading::parse("42"), PushReading::Count(42));
    /// assert_eq!(PushReading::parse("爆").value(), 100);
    /// assert_eq!(PushReading::parse("X3").value(), -10);
    /// assert_eq!(PushReading::parse("").value(), 0);
    /// ```
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if let Ok(count) = text.parse::<i32>() {
            return Self::Count(count);
        }

        if text.is_empty() {
            Self::Blank
        } else if text == MAXED_MARKER {
            Self::Maxed
        } else if text.starts_with(CONTROVERSIAL_PREFIX) {
            Self::Controversial
        } else {
            Self::Unrecognized(text.to_string())
        }
    }

    /// Numeric score used for threshold comparison
    pub fn value(&self) -> i32 {
        match self {
            Self::Count(n) => *n,
            Self::Maxed => MAXED_SCORE,
            Self::Controversial => CONTROVERSIAL_SCORE,
            Self::Blank | Self::Unrecognized(_) => 0,
        }
    }

    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized(_))
    }
}

impl fmt::Display for PushReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized(raw) => write!(f, "unrecognized({:?})", raw),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// Result of classifying one post row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Trimmed date text, compared as an exact string
    pub date: String,

    pub push: PushReading,

    /// False for deleted posts (no hyperlink in the row)
    pub exists: bool,
}

/// Classifies a post row
///
/// A row missing its date or push cell reads as an empty string for that
/// field: an empty date never equals a target date and an empty push cell is
/// `Blank`.
pub fn classify(block: &EntryBlock) -> Classification {
    let date = block
        .date_text
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let push = PushReading::parse(block.push_text.as_deref().unwrap_or_default());

    Classification {
        date,
        push,
        exists: block.link.is_some(),
    }
}
