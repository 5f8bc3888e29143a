// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Semantic log levels and the level set used for filtering.
//!
//! The native engine reports severity as a small integer (`CHEWING_LOG_*`).
//! [`LogLevel::from_native`] maps those codes; anything else becomes
//! [`LogLevel::Unknown`], which no [`LevelSet`] contains.

use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;
use crate::ffi::{
    CHEWING_LOG_DEBUG, CHEWING_LOG_ERROR, CHEWING_LOG_INFO, CHEWING_LOG_VERBOSE, CHEWING_LOG_WARN,
};

/// Severity of a forwarded message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Verbose,
    /// Native code with no mapping; carries the raw value
    Unknown(i32),
}

impl LogLevel {
    /// Every concrete level, most severe first.
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Verbose,
    ];

    /// Map a native engine severity code.
    ///
    /// The engine never emits a critical level, so no code maps to
    /// [`LogLevel::Critical`].
    pub fn from_native(code: i32) -> Self {
        match code {
            CHEWING_LOG_ERROR => LogLevel::Error,
            CHEWING_LOG_WARN => LogLevel::Warning,
            CHEWING_LOG_INFO => LogLevel::Info,
            CHEWING_LOG_DEBUG => LogLevel::Debug,
            CHEWING_LOG_VERBOSE => LogLevel::Verbose,
            other => LogLevel::Unknown(other),
        }
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, LogLevel::Unknown(_))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Critical => "critical",
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Verbose => "verbose",
            LogLevel::Unknown(_) => "unknown",
        }
    }

    fn bit(self) -> u8 {
        match self {
            LogLevel::Critical => 1 << 0,
            LogLevel::Error => 1 << 1,
            LogLevel::Warning => 1 << 2,
            LogLevel::Info => 1 << 3,
            LogLevel::Debug => 1 << 4,
            LogLevel::Verbose => 1 << 5,
            LogLevel::Unknown(_) => 0,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Unknown(code) => write!(f, "unknown({})", code),
            other => f.pad(other.as_str()),
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = chewing_config::canonical_level_name(s)
            .ok_or_else(|| LoggerError::UnknownLevel(s.to_string()))?;
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == canonical)
            .ok_or_else(|| LoggerError::UnknownLevel(s.to_string()))
    }
}

/// Set of allowed levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LevelSet(u8);

impl LevelSet {
    pub const fn empty() -> Self {
        LevelSet(0)
    }

    pub const fn all() -> Self {
        LevelSet(0b11_1111)
    }

    /// Membership test; always false for [`LogLevel::Unknown`].
    pub fn contains(self, level: LogLevel) -> bool {
        let bit = level.bit();
        bit != 0 && self.0 & bit == bit
    }

    /// Adds a level. Unknown levels are ignored.
    pub fn insert(&mut self, level: LogLevel) {
        self.0 |= level.bit();
    }

    pub fn remove(&mut self, level: LogLevel) {
        self.0 &= !level.bit();
    }

    pub fn union(self, other: LevelSet) -> LevelSet {
        LevelSet(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = LogLevel> {
        LogLevel::ALL.into_iter().filter(move |l| self.contains(*l))
    }

    /// Parse level names (with the `"all"` shorthand) into a set.
    pub fn from_names<I, S>(names: I) -> Result<Self, LoggerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = LevelSet::empty();
        for name in names {
            let name = name.as_ref();
            if name.trim().eq_ignore_ascii_case(chewing_config::ALL_LEVELS) {
                set = LevelSet::all();
            } else {
                set.insert(name.parse()?);
            }
        }
        Ok(set)
    }
}

impl From<LogLevel> for LevelSet {
    fn from(level: LogLevel) -> Self {
        LevelSet(level.bit())
    }
}

impl<const N: usize> From<[LogLevel; N]> for LevelSet {
    fn from(levels: [LogLevel; N]) -> Self {
        levels.into_iter().collect()
    }
}

impl FromIterator<LogLevel> for LevelSet {
    fn from_iter<T: IntoIterator<Item = LogLevel>>(iter: T) -> Self {
        let mut set = LevelSet::empty();
        for level in iter {
            set.insert(level);
        }
        set
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(LogLevel::as_str).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
