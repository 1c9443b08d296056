use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds in one calendar day.
pub const SECONDS_PER_DAY: u32 = 86_400;

/// One trading session as second offsets from local midnight.
///
/// A night session that ends after midnight carries its close as the
/// next-morning offset (e.g. 01:00 is `3600`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub open: u32,
    pub close: u32,
}

impl Session {
    pub fn new(open: u32, close: u32) -> Self {
        Self { open, close }
    }
}

/// Night-session layout of an exchange product, keyed off the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionShape {
    /// Three day sessions, no night trading
    DayOnly,
    /// Night session closes at 23:00
    NightUntil2300,
    /// Night session closes at 01:00
    NightUntil0100,
    /// Night session closes at 02:30
    NightUntil0230,
}

impl fmt::Display for SessionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionShape::DayOnly => "day-only",
            SessionShape::NightUntil2300 => "night-23:00",
            SessionShape::NightUntil0100 => "night-01:00",
            SessionShape::NightUntil0230 => "night-02:30",
        };
        f.write_str(name)
    }
}

/// Ordered sessions of one trading day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSchedule {
    sessions: Vec<Session>,
}

impl SessionSchedule {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// Build from `(open, close)` offset pairs.
    pub fn from_offsets(pairs: &[(u32, u32)]) -> Self {
        Self::new(pairs.iter().map(|&(open, close)| Session::new(open, close)).collect())
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// True when `micros_of_day` (microseconds since midnight) is exactly a
    /// session open.
    pub fn is_open_instant(&self, micros_of_day: i64) -> bool {
        self.sessions
            .iter()
            .any(|s| i64::from(s.open) * 1_000_000 == micros_of_day)
    }

    /// Structural shape: three sessions means no night trading, otherwise the
    /// last session's close identifies the night layout.
    pub fn shape(&self) -> Option<SessionShape> {
        if self.sessions.len() == 3 {
            return Some(SessionShape::DayOnly);
        }
        match self.sessions.last()?.close {
            82_800 => Some(SessionShape::NightUntil2300),
            3_600 => Some(SessionShape::NightUntil0100),
            9_000 => Some(SessionShape::NightUntil0230),
            _ => None,
        }
    }
}
