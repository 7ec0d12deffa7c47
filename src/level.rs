// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Severity of a log record, ordered by rank.
///
/// The ranks follow the conventional five-tier scale (10, 20, 30, 40, 50) plus [`Level::Silent`]
/// at 100, which sits above every real level and mutes the node it is set on.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Detailed debugging output. Also used for `trace`.
    Debug = 10,
    /// Ordinary progress messages.
    Info = 20,
    /// Something suspicious happened.
    Warning = 30,
    /// An operation failed.
    Error = 40,
    /// The program may not be able to continue.
    Critical = 50,
    /// Never emitted; mutes a node.
    Silent = 100,
}

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Silent,
    ];

    /// The integer rank of this level.
    pub const fn rank(self) -> u32 {
        self as u32
    }

    /// Return the level with exactly this rank, if any.
    pub const fn from_rank(rank: u32) -> Option<Level> {
        match rank {
            10 => Some(Level::Debug),
            20 => Some(Level::Info),
            30 => Some(Level::Warning),
            40 => Some(Level::Error),
            50 => Some(Level::Critical),
            100 => Some(Level::Silent),
            _ => None,
        }
    }

    /// The upper-case name of this level.
    pub const fn name(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Silent => "SILENT",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_lowercase().as_str() {
            "trace" | "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" | "warning" => Level::Warning,
            "error" => Level::Error,
            "critical" | "fatal" => Level::Critical,
            "silent" => Level::Silent,
            other => {
                return other
                    .parse::<u32>()
                    .ok()
                    .and_then(Level::from_rank)
                    .ok_or_else(|| Error::invalid_level(s));
            }
        };
        Ok(level)
    }
}

impl TryFrom<u32> for Level {
    type Error = Error;

    fn try_from(rank: u32) -> Result<Self, Error> {
        Level::from_rank(rank).ok_or_else(|| Error::invalid_level(rank))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

/// Values accepted by the level-mutation APIs.
///
/// Implemented for [`Level`], integer ranks, and level names. Anything outside the recognized
/// set fails with [`ErrorKind::InvalidLevel`](crate::ErrorKind::InvalidLevel).
pub trait IntoLevel {
    /// Convert into a [`Level`].
    fn into_level(self) -> Result<Level, Error>;
}

impl IntoLevel for Level {
    fn into_level(self) -> Result<Level, Error> {
        Ok(self)
    }
}

impl IntoLevel for u32 {
    fn into_level(self) -> Result<Level, Error> {
        Level::try_from(self)
    }
}

impl IntoLevel for i32 {
    fn into_level(self) -> Result<Level, Error> {
        u32::try_from(self)
            .ok()
            .and_then(Level::from_rank)
            .ok_or_else(|| Error::invalid_level(self))
    }
}

impl IntoLevel for &str {
    fn into_level(self) -> Result<Level, Error> {
        self.parse()
    }
}

impl IntoLevel for String {
    fn into_level(self) -> Result<Level, Error> {
        self.parse()
    }
}

impl IntoLevel for log::Level {
    fn into_level(self) -> Result<Level, Error> {
        Ok(self.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_ordering_follows_rank() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].rank() < pair[1].rank());
        }
        assert_eq!(Level::Silent.rank(), 100);
    }

    #[test]
    fn test_parse_names_and_ranks() {
        let cases = vec![
            ("debug", Level::Debug),
            ("TRACE", Level::Debug),
            ("Info", Level::Info),
            ("warn", Level::Warning),
            ("WARNING", Level::Warning),
            ("error", Level::Error),
            ("critical", Level::Critical),
            ("silent", Level::Silent),
            ("30", Level::Warning),
            ("100", Level::Silent),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Level>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_reject_unrecognized() {
        for case in ["loud", "", "15", "-10"] {
            let err = case.parse::<Level>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidLevel, "{case}");
        }
        assert_eq!(
            25u32.into_level().unwrap_err().kind(),
            ErrorKind::InvalidLevel
        );
        assert_eq!(
            (-1i32).into_level().unwrap_err().kind(),
            ErrorKind::InvalidLevel
        );
        assert_eq!(40i32.into_level().unwrap(), Level::Error);
    }

    #[test]
    fn test_from_log_level() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from(log::Level::Error), Level::Error);
    }

    #[test]
    fn test_try_from_rank() {
        assert_eq!(Level::try_from(50u32).unwrap(), Level::Critical);
        assert_eq!(Level::try_from(100u32).unwrap(), Level::Silent);
        let err = Level::try_from(0u32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
    }
}
