//! Class numbers and the subject band they map to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest class a teacher can be assigned to.
pub const MIN_CLASS: u8 = 1;

/// Highest class a teacher can be assigned to.
pub const MAX_CLASS: u8 = 6;

/// Elementary-school class number, always within `1..=6`.
///
/// Wire format: plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ClassNumber(u8);

/// Rejected class value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("class must be between 1 and 6, got {0}")]
pub struct InvalidClassNumber(pub i64);

impl ClassNumber {
    pub fn new(value: u8) -> Result<Self, InvalidClassNumber> {
        Self::try_from(i64::from(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Subject band served to this class.
    pub fn level(self) -> ClassLevel {
        ClassLevel::of(self.0)
    }
}

impl TryFrom<i64> for ClassNumber {
    type Error = InvalidClassNumber;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(MIN_CLASS)..=i64::from(MAX_CLASS)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidClassNumber(value))
        }
    }
}

impl TryFrom<i16> for ClassNumber {
    type Error = InvalidClassNumber;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<ClassNumber> for u8 {
    fn from(class: ClassNumber) -> Self {
        class.0
    }
}

impl From<ClassNumber> for i16 {
    fn from(class: ClassNumber) -> Self {
        i16::from(class.0)
    }
}

impl fmt::Display for ClassNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Subject band: classes 1–3 share one subject list, classes 4–6 another.
///
/// Wire format: `u8` (3 = Lower, 6 = Upper), the highest class of the band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ClassLevel {
    Lower = 3,
    Upper = 6,
}

impl ClassLevel {
    /// The one place the class → band rule lives. Total over `u8`.
    pub fn of(class: u8) -> Self {
        if class <= 3 { Self::Lower } else { Self::Upper }
    }

    /// Convert from the stored wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            3 => Some(Self::Lower),
            6 => Some(Self::Upper),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_i16(self) -> i16 {
        i16::from(self.as_u8())
    }
}

impl TryFrom<u8> for ClassLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or_else(|| format!("unknown class level {value}"))
    }
}

impl From<ClassLevel> for u8 {
    fn from(level: ClassLevel) -> Self {
        level.as_u8()
    }
}
