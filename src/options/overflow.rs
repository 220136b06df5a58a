//! Policy for lines longer than `max_line_length`.

use clap::ValueEnum;
use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// What happens to a line whose raw byte length exceeds `max_line_length`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    PartialOrd,
    Ord,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    /// Cut the emitted line to at most the limit, on a character boundary.
    #[default]
    Truncate,
    /// Fail with `LineTooLong`.
    Reject,
}

impl Display for Overflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncate => write!(f, "truncate"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
