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

use std::ffi::OsStr;
use std::fmt;

/// Decides whether the registry starts in debug mode.
///
/// Consulted exactly once, when the registry is built.
pub trait DebugFlag: fmt::Debug + Send + Sync + 'static {
    /// Return `true` if debug output was requested for `library`.
    fn is_debug(&self, library: &str) -> bool;
}

impl<T: DebugFlag> From<T> for Box<dyn DebugFlag> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

impl DebugFlag for bool {
    fn is_debug(&self, _: &str) -> bool {
        *self
    }
}

/// Scans process launch arguments for the token `debug` or the library's own name.
///
/// Arguments are compared case-insensitively.
///
/// # Examples
///
/// ```
/// use liblog::DebugFlag;
/// use liblog::flag::ArgvFlag;
///
/// let flag = ArgvFlag::from_args(["server", "--port", "80", "DEBUG"]);
/// assert!(flag.is_debug("liblog"));
/// ```
#[derive(Debug, Clone)]
pub struct ArgvFlag {
    args: Vec<String>,
}

impl Default for ArgvFlag {
    fn default() -> Self {
        ArgvFlag::from_args(std::env::args_os())
    }
}

impl ArgvFlag {
    /// Use the given arguments instead of the process arguments.
    ///
    /// Arguments that are not valid UTF-8 are compared lossily.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string_lossy().to_lowercase())
            .collect();
        ArgvFlag { args }
    }
}

impl DebugFlag for ArgvFlag {
    fn is_debug(&self, library: &str) -> bool {
        let library = library.to_lowercase();
        self.args.iter().any(|arg| arg == "debug" || *arg == library)
    }
}
