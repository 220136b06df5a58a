//! Character encodings for decoding raw line bytes.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::ListReaderError;

/// Determines how raw line bytes are decoded into text.
///
/// # Examples
///
/// ```
/// use list_reader::Encoding;
///
/// assert_eq!(Encoding::default(), Encoding::Utf8);
/// assert_eq!("ISO-8859-1".parse::<Encoding>().unwrap(), Encoding::Latin1);
/// assert_eq!(Encoding::Ascii.to_string(), "ascii");
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// UTF-8 (default). Invalid sequences are an error.
    #[default]
    #[value(name = "utf-8", alias = "utf8", alias = "unicode")]
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,

    /// 7-bit ASCII. Any byte above `0x7f` is an error.
    #[value(alias = "us-ascii")]
    Ascii,

    /// ISO-8859-1. Every byte maps to the code point of the same value.
    #[value(name = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    #[serde(rename = "latin-1", alias = "latin1", alias = "iso-8859-1")]
    Latin1,
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utf8 => write!(f, "utf-8"),
            Self::Ascii => write!(f, "ascii"),
            Self::Latin1 => write!(f, "latin-1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = ListReaderError;

    /// Parses an encoding name, ignoring ASCII case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" | "unicode" => Ok(Self::Utf8),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(Self::Latin1),
            _ => Err(ListReaderError::Config(format!("unknown encoding: {name}"))),
        }
    }
}

impl Encoding {
    /// Decodes `bytes`, borrowing whenever the bytes are already valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns the index of the first byte that is invalid under this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, usize> {
        match self {
            Self::Utf8 => Self::validate_utf8(bytes).map(Cow::Borrowed),
            Self::Ascii => match bytes.iter().position(|byte| !byte.is_ascii()) {
                Some(position) => Err(position),
                None => Self::validate_utf8(bytes).map(Cow::Borrowed),
            },
            Self::Latin1 if bytes.is_ascii() => Self::validate_utf8(bytes).map(Cow::Borrowed),
            Self::Latin1 => Ok(Cow::Owned(bytes.iter().map(|&byte| char::from(byte)).collect())),
        }
    }

    fn validate_utf8(bytes: &[u8]) -> Result<&str, usize> {
        simdutf8::compat::from_utf8(bytes).map_err(|e| e.valid_up_to())
    }
}
