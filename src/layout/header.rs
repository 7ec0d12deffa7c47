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

use std::fmt::Write;

use crate::Error;
use crate::Layout;
use crate::color::LevelPalette;
use crate::record::Record;

/// A layout that prefixes the message with a bracketed, colorized logger name.
///
/// Output format:
///
/// ```text
/// [app] Hello info!
/// [app.db] Hello warning!
/// [app] Hello exception!
/// connection refused
///   caused by: os error 111
/// ```
///
/// The logger name is shown without its root segment and colored by level. Set `no_color` to
/// drop the escape sequences.
///
/// # Examples
///
/// ```
/// use liblog::layout::HeaderLayout;
///
/// let layout = HeaderLayout::default().no_color(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderLayout {
    palette: LevelPalette,
    no_color: bool,
}

impl HeaderLayout {
    /// Set the palette used for the header.
    pub fn palette(mut self, palette: LevelPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Disable colors.
    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }
}

impl Layout for HeaderLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let mut text = String::new();

        let name = record.display_name();
        let message = record.args();
        if self.no_color {
            write!(&mut text, "[{name}] {message}").map_err(Error::from_fmt_error)?;
        } else {
            let (set, reset) = self.palette.colors_for(record.level().rank());
            write!(&mut text, "[{set}{name}{reset}] {message}").map_err(Error::from_fmt_error)?;
        }

        if let Some(err) = record.error() {
            write!(&mut text, "\n{err}").map_err(Error::from_fmt_error)?;
            let mut source = err.source();
            while let Some(cause) = source {
                write!(&mut text, "\n  caused by: {cause}").map_err(Error::from_fmt_error)?;
                source = cause.source();
            }
        }

        Ok(text.into_bytes())
    }
}
