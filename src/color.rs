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

//! Color utilities.

use std::borrow::Cow;

use colored::Color;

use crate::Level;

/// The escape sequence that resets all terminal attributes.
pub const RESET: &str = "\x1b[0m";

/// Colors for the header of each severity tier.
#[derive(Debug, Clone)]
pub struct LevelPalette {
    /// Color for critical level logs.
    pub critical: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warning: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for debug level logs.
    pub debug: Color,
}

impl Default for LevelPalette {
    fn default() -> Self {
        Self {
            critical: Color::BrightRed,
            error: Color::BrightRed,
            warning: Color::BrightYellow,
            info: Color::BrightGreen,
            debug: Color::BrightBlue,
        }
    }
}

impl LevelPalette {
    /// Return the `(set, reset)` escape pair for a severity rank.
    ///
    /// Ranks below [`Level::Debug`] get an empty set sequence.
    pub fn colors_for(&self, rank: u32) -> (Cow<'static, str>, &'static str) {
        let color = if rank >= Level::Critical.rank() {
            self.critical
        } else if rank >= Level::Error.rank() {
            self.error
        } else if rank >= Level::Warning.rank() {
            self.warning
        } else if rank >= Level::Info.rank() {
            self.info
        } else if rank >= Level::Debug.rank() {
            self.debug
        } else {
            return (Cow::Borrowed(""), RESET);
        };

        (Cow::Owned(format!("\x1b[{}m", color.to_fg_str())), RESET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = LevelPalette::default();
        let cases = vec![
            (100, "\x1b[91m"),
            (50, "\x1b[91m"),
            (40, "\x1b[91m"),
            (35, "\x1b[93m"),
            (30, "\x1b[93m"),
            (20, "\x1b[92m"),
            (10, "\x1b[94m"),
            (9, ""),
            (0, ""),
        ];
        for (rank, expected) in cases {
            let (set, reset) = palette.colors_for(rank);
            assert_eq!(set, expected, "rank {rank}");
            assert_eq!(reset, RESET);
        }
    }

    #[test]
    fn test_custom_palette() {
        let palette = LevelPalette {
            info: Color::Cyan,
            ..LevelPalette::default()
        };
        assert_eq!(palette.colors_for(Level::Info.rank()).0, "\x1b[36m");
    }
}
