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

//! Caller identity resolution.
//!
//! Loggers are auto-named after the crate that calls the facade. The call stack is modeled as a
//! list of [`Frame`]s captured at the call site (the logging macros capture `module_path!()`,
//! the `log` bridge pushes its own frame in front of the record's module path). Stack capture is
//! environment dependent: when the caller cannot be determined, pass an explicit name to
//! [`LibLog::get_logger`](crate::LibLog::get_logger) instead.

use std::borrow::Cow;
use std::fmt;

/// The identity used when no frame outside the library can be resolved.
pub const UNKNOWN: &str = "Unknown";

/// One entry of a call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    module_path: Option<&'a str>,
}

impl<'a> Frame<'a> {
    /// A frame owned by the module at `module_path`, e.g. `"app::db::pool"`.
    pub const fn new(module_path: &'a str) -> Self {
        Frame {
            module_path: Some(module_path),
        }
    }

    /// A frame whose owning module may be unknown.
    pub const fn from_option(module_path: Option<&'a str>) -> Self {
        Frame { module_path }
    }

    /// The module path of this frame, if resolvable.
    pub fn module_path(&self) -> Option<&'a str> {
        self.module_path
    }

    /// The package (crate) owning this frame: the first `::` segment of its module path.
    pub fn package(&self) -> Option<&'a str> {
        let path = self.module_path?;
        let package = path.split("::").next().unwrap_or_default().trim();
        if package.is_empty() {
            None
        } else {
            Some(package)
        }
    }
}

/// The call site of a facade call: a stack of frames, most recent first, plus source location.
#[derive(Debug, Clone, Copy)]
pub struct Caller<'a> {
    stack: &'a [Frame<'a>],
    file: Option<&'a str>,
    line: Option<u32>,
}

impl<'a> Caller<'a> {
    /// Create a caller from a captured stack and source location.
    ///
    /// Usually built with the [`caller!`](crate::caller) macro.
    pub const fn new(stack: &'a [Frame<'a>], file: Option<&'a str>, line: Option<u32>) -> Self {
        Caller { stack, file, line }
    }

    /// The captured frames, most recent first.
    pub fn stack(&self) -> &'a [Frame<'a>] {
        self.stack
    }

    /// The module path of the most recent frame.
    pub fn module_path(&self) -> Option<&'a str> {
        self.stack.iter().find_map(Frame::module_path)
    }

    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}

/// Walk `stack` outward and return the package of the first frame not owned by `library`.
///
/// Frames without a resolvable module are skipped. Returns [`UNKNOWN`] if no such frame exists.
pub fn resolve<'a>(stack: &[Frame<'a>], library: &str) -> &'a str {
    stack
        .iter()
        .filter_map(Frame::package)
        .find(|package| *package != library)
        .unwrap_or(UNKNOWN)
}

/// Determines the logger identity for a call site.
pub trait Resolve: fmt::Debug + Send + Sync + 'static {
    /// Return the identity of the caller.
    fn resolve<'a>(&self, caller: &Caller<'a>) -> Cow<'a, str>;
}

impl<T: Resolve> From<T> for Box<dyn Resolve> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// The default resolver: full scan for the first frame outside the library's own package.
#[derive(Debug, Clone)]
pub struct StackResolver {
    library: Cow<'static, str>,
}

impl Default for StackResolver {
    fn default() -> Self {
        StackResolver::new(crate::LIBRARY)
    }
}

impl StackResolver {
    /// Create a resolver that skips frames owned by `library`.
    pub fn new(library: impl Into<Cow<'static, str>>) -> Self {
        StackResolver {
            library: library.into(),
        }
    }
}

impl Resolve for StackResolver {
    fn resolve<'a>(&self, caller: &Caller<'a>) -> Cow<'a, str> {
        Cow::Borrowed(resolve(caller.stack(), &self.library))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_of_frame() {
        assert_eq!(Frame::new("app::db::pool").package(), Some("app"));
        assert_eq!(Frame::new("app").package(), Some("app"));
        assert_eq!(Frame::new("").package(), None);
        assert_eq!(Frame::from_option(None).package(), None);
    }

    #[test]
    fn test_skip_library_frames() {
        let stack = [
            Frame::new("liblog::bridge::log"),
            Frame::new("liblog::facade"),
            Frame::new("app::server"),
            Frame::new("std::rt"),
        ];
        assert_eq!(resolve(&stack, "liblog"), "app");
    }

    #[test]
    fn test_skip_unresolvable_frames() {
        let stack = [
            Frame::from_option(None),
            Frame::new("liblog"),
            Frame::from_option(None),
            Frame::new("worker::jobs"),
        ];
        assert_eq!(resolve(&stack, "liblog"), "worker");
    }

    #[test]
    fn test_unknown_without_outer_frame() {
        assert_eq!(resolve(&[], "liblog"), UNKNOWN);
        let stack = [Frame::new("liblog::facade"), Frame::from_option(None)];
        assert_eq!(resolve(&stack, "liblog"), UNKNOWN);
    }

    #[test]
    fn test_stack_resolver_uses_library_name() {
        let stack = [Frame::new("mylib::inner"), Frame::new("app")];
        let caller = Caller::new(&stack, Some("src/main.rs"), Some(7));
        assert_eq!(StackResolver::new("mylib").resolve(&caller), "app");
        assert_eq!(StackResolver::default().resolve(&caller), "mylib");
        assert_eq!(caller.module_path(), Some("mylib::inner"));
    }
}
