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

use crate::Caller;
use crate::Frame;
use crate::Level;
use crate::LibLog;

impl log::Log for LibLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.is_potentially_enabled(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        if !self.is_potentially_enabled(level) {
            return;
        }

        let stack = [
            Frame::new(module_path!()),
            Frame::from_option(record.module_path()),
        ];
        let caller = Caller::new(&stack, record.file(), record.line());
        LibLog::log(self, level, &caller, *record.args());
    }

    fn flush(&self) {
        LibLog::flush(self);
    }
}

/// Set up `facade` as the log crate global logger.
///
/// All logs from the log crate are attributed to the package of the module that emitted them,
/// and filtered by the same levels as direct facade calls.
///
/// This function will set the global maximum log level to `Trace`, leaving filtering to the
/// registry.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// if let Err(err) = liblog::bridge::try_setup_log_crate(liblog::LibLog::global()) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// ```
pub fn try_setup_log_crate(facade: &'static LibLog) -> Result<(), log::SetLoggerError> {
    log::set_logger(facade)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the process-wide facade as the log crate global logger.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// liblog::bridge::setup_log_crate();
/// log::info!("forwarded to liblog");
/// ```
pub fn setup_log_crate() {
    try_setup_log_crate(LibLog::global()).expect(
        "liblog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
