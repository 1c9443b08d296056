use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::BoundaryError;

/// Unit of a bar interval.
///
/// `Month` and `Year` are accepted by the parser but no boundary engine
/// implements them; dispatch reports [`BoundaryError::UnsupportedInterval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalUnit {
    Second,
    Minute,
    Hour,
    Daily,
    Weekly,
    Month,
    Year,
}

impl IntervalUnit {
    /// Compact notation character (`m` is minute, `M` is month).
    pub fn symbol(self) -> char {
        match self {
            IntervalUnit::Second => 's',
            IntervalUnit::Minute => 'm',
            IntervalUnit::Hour => 'H',
            IntervalUnit::Daily => 'D',
            IntervalUnit::Weekly => 'W',
            IntervalUnit::Month => 'M',
            IntervalUnit::Year => 'Y',
        }
    }

    fn from_symbol(c: char) -> Option<Self> {
        match c {
            's' => Some(IntervalUnit::Second),
            'm' => Some(IntervalUnit::Minute),
            'H' => Some(IntervalUnit::Hour),
            'D' => Some(IntervalUnit::Daily),
            'W' => Some(IntervalUnit::Weekly),
            'M' => Some(IntervalUnit::Month),
            'Y' => Some(IntervalUnit::Year),
            _ => None,
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntervalUnit::Second => "second",
            IntervalUnit::Minute => "minute",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Daily => "daily",
            IntervalUnit::Weekly => "weekly",
            IntervalUnit::Month => "month",
            IntervalUnit::Year => "year",
        };
        f.write_str(name)
    }
}

/// A bar interval: unit plus a positive length.
///
/// Daily and weekly bars only exist with length 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalSpec {
    unit: IntervalUnit,
    length: u32,
}

impl IntervalSpec {
    pub fn new(unit: IntervalUnit, length: u32) -> Result<Self, BoundaryError> {
        let valid = match unit {
            IntervalUnit::Daily | IntervalUnit::Weekly => length == 1,
            _ => length > 0,
        };
        if !valid {
            return Err(BoundaryError::InvalidIntervalLength { unit, length });
        }
        Ok(Self { unit, length })
    }

    pub fn seconds(length: u32) -> Result<Self, BoundaryError> {
        Self::new(IntervalUnit::Second, length)
    }

    pub fn minutes(length: u32) -> Result<Self, BoundaryError> {
        Self::new(IntervalUnit::Minute, length)
    }

    pub fn hours(length: u32) -> Result<Self, BoundaryError> {
        Self::new(IntervalUnit::Hour, length)
    }

    pub fn daily() -> Self {
        Self { unit: IntervalUnit::Daily, length: 1 }
    }

    pub fn weekly() -> Self {
        Self { unit: IntervalUnit::Weekly, length: 1 }
    }

    pub fn unit(&self) -> IntervalUnit {
        self.unit
    }

    pub fn length(&self) -> u32 {
        self.length
    }
}

impl fmt::Display for IntervalSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.unit.symbol())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum IntervalParseError {
    #[error("empty interval")]
    Empty,

    #[error("unknown interval unit '{0}' (expected one of s m H D W M Y)")]
    UnknownUnit(char),

    #[error("invalid interval length '{0}'")]
    InvalidLength(String),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}

impl FromStr for IntervalSpec {
    type Err = IntervalParseError;

    /// Parse compact notation such as `15s`, `30m`, `2H`, `1D`, `1W`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unit_char = s.chars().last().ok_or(IntervalParseError::Empty)?;
        let unit = IntervalUnit::from_symbol(unit_char)
            .ok_or(IntervalParseError::UnknownUnit(unit_char))?;
        let digits = &s[..s.len() - unit_char.len_utf8()];
        let length = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| IntervalParseError::InvalidLength(digits.to_string()))?
        };
        Ok(IntervalSpec::new(unit, length)?)
    }
}
