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

use crate::Level;

/// The payload of a log message.
#[derive(Clone, Copy)]
pub struct Record<'a> {
    level: Level,
    logger: &'a str,
    display_name: &'a str,
    args: fmt::Arguments<'a>,
    error: Option<&'a (dyn std::error::Error + 'static)>,

    module_path: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,
}

impl fmt::Debug for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("level", &self.level)
            .field("logger", &self.logger)
            .field("display_name", &self.display_name)
            .field("args", &self.args)
            .field("error", &self.error.map(ToString::to_string))
            .field("module_path", &self.module_path)
            .field("file", &self.file)
            .field("line", &self.line)
            .finish()
    }
}

impl<'a> Record<'a> {
    /// Create a builder for a record carrying the formatted message.
    pub fn builder(args: fmt::Arguments<'a>) -> RecordBuilder<'a> {
        RecordBuilder::new(args)
    }

    /// The severity of the record.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The full dotted name of the logger that accepted the record.
    pub fn logger(&self) -> &'a str {
        self.logger
    }

    /// The logger name without its root segment, as shown in headers.
    pub fn display_name(&self) -> &'a str {
        self.display_name
    }

    /// The formatted message.
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }

    /// The error attached by an `exception` call.
    pub fn error(&self) -> Option<&'a (dyn std::error::Error + 'static)> {
        self.error
    }

    pub fn module_path(&self) -> Option<&'a str> {
        self.module_path
    }

    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(args: fmt::Arguments<'a>) -> Self {
        RecordBuilder {
            record: Record {
                level: Level::Info,
                logger: "",
                display_name: "",
                args,
                error: None,
                module_path: None,
                file: None,
                line: None,
            },
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set the logger name. The display name becomes everything after the first `.`.
    pub fn logger(mut self, logger: &'a str) -> Self {
        self.record.logger = logger;
        self.record.display_name = strip_root(logger);
        self
    }

    pub fn error(mut self, error: Option<&'a (dyn std::error::Error + 'static)>) -> Self {
        self.record.error = error;
        self
    }

    pub fn module_path(mut self, path: Option<&'a str>) -> Self {
        self.record.module_path = path;
        self
    }

    pub fn file(mut self, file: Option<&'a str>) -> Self {
        self.record.file = file;
        self
    }

    pub fn line(mut self, line: Option<u32>) -> Self {
        self.record.line = line;
        self
    }

    pub fn build(self) -> Record<'a> {
        self.record
    }
}

/// Remove the root segment of a dotted logger name.
pub(crate) fn strip_root(name: &str) -> &str {
    match name.split_once('.') {
        Some((_, rest)) => rest,
        None => "",
    }
}
