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

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

use crate::Caller;
use crate::Error;
use crate::IntoLevel;
use crate::Level;
use crate::Node;
use crate::Registry;
use crate::caller::Resolve;
use crate::caller::StackResolver;

/// The logging facade used by every package of the process.
///
/// Each call is attributed to the package of its caller, which gets its own child of the root
/// logger on first use. Calls below the registry's floor return before the caller is resolved or
/// the message is formatted.
///
/// Most code uses the process-wide facade through the logging macros:
///
/// ```
/// liblog::info!("listening on {}", 8080);
/// liblog::debug!("cheap when disabled");
/// ```
///
/// A facade over a private registry:
///
/// ```
/// use std::sync::Arc;
///
/// use liblog::LibLog;
/// use liblog::Registry;
/// use liblog::append;
///
/// let registry = Registry::builder().append(append::Testing::default()).build();
/// let log = LibLog::new(Arc::new(registry));
/// liblog::warning!(logger: &log, "disk at {}%", 91);
/// ```
#[derive(Debug)]
pub struct LibLog {
    registry: Arc<Registry>,
    resolver: Box<dyn Resolve>,
    // identity or explicit name to package logger
    loggers: RwLock<HashMap<String, Arc<Node>>>,
    // (caller identity, suffix) to child logger, see `register_child`
    children: RwLock<HashMap<(String, String), Arc<Node>>>,
}

impl LibLog {
    /// Create a facade over `registry` using the default [`StackResolver`].
    pub fn new(registry: Arc<Registry>) -> LibLog {
        LibLog {
            registry,
            resolver: Box::new(StackResolver::default()),
            loggers: RwLock::new(HashMap::new()),
            children: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the resolver used to name loggers after their callers.
    pub fn with_resolver(mut self, resolver: impl Into<Box<dyn Resolve>>) -> LibLog {
        self.resolver = resolver.into();
        self
    }

    /// The process-wide facade over [`Registry::global`].
    pub fn global() -> &'static LibLog {
        static FACADE: OnceLock<LibLog> = OnceLock::new();
        FACADE.get_or_init(|| LibLog::new(Registry::global()))
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Whether a call at `level` can produce output anywhere in the tree.
    #[inline]
    pub fn is_potentially_enabled(&self, level: Level) -> bool {
        self.registry.is_potentially_enabled(level)
    }

    /// Log a message at `level` on the caller's logger.
    pub fn log(&self, level: Level, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.emit(level, caller, args, None);
    }

    pub fn debug(&self, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, caller, args, None);
    }

    pub fn info(&self, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, caller, args, None);
    }

    pub fn warning(&self, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.emit(Level::Warning, caller, args, None);
    }

    pub fn error(&self, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, caller, args, None);
    }

    pub fn critical(&self, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.emit(Level::Critical, caller, args, None);
    }

    /// Log a message at [`Level::Error`] followed by `error` and its chain of sources.
    pub fn exception(
        &self,
        caller: &Caller<'_>,
        error: &(dyn std::error::Error + 'static),
        args: fmt::Arguments<'_>,
    ) {
        self.emit(Level::Error, caller, args, Some(error));
    }

    fn emit(
        &self,
        level: Level,
        caller: &Caller<'_>,
        args: fmt::Arguments<'_>,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        if !self.is_potentially_enabled(level) {
            return;
        }

        let logger = self.get_logger(caller, None);
        logger.log_error(level, caller, args, error);
    }

    /// Return the logger named `name`, or the caller's package logger if `name` is `None`.
    ///
    /// The logger is created and registered on first use, and the binding is cached on this
    /// facade.
    pub fn get_logger(&self, caller: &Caller<'_>, name: Option<&str>) -> Arc<Node> {
        match name {
            Some(name) => self.bind(name),
            None => {
                let identity = self.resolver.resolve(caller);
                self.bind(&identity)
            }
        }
    }

    fn bind(&self, name: &str) -> Arc<Node> {
        if let Some(node) = read(&self.loggers).get(name) {
            return node.clone();
        }

        let node = self.registry.register_logger(name);
        write(&self.loggers)
            .entry(name.to_string())
            .or_insert(node)
            .clone()
    }

    /// Force the registration of the caller's package logger.
    pub fn register_package(&self, caller: &Caller<'_>) -> Arc<Node> {
        self.get_logger(caller, None)
    }

    /// Register `<caller logger>.<suffix>` as a child of the caller's package logger.
    ///
    /// The child is tracked by the registry, so global level changes reach it, and can be
    /// fetched again by the same package with [`LibLog::get_child`].
    pub fn register_child(&self, caller: &Caller<'_>, suffix: &str) -> Arc<Node> {
        let identity = self.resolver.resolve(caller);
        let parent = self.bind(&identity);
        let child = self.registry.register_child(&parent, suffix);
        write(&self.children).insert((identity.into_owned(), suffix.to_string()), child.clone());
        child
    }

    /// Return the child `suffix` registered by the caller's package with
    /// [`LibLog::register_child`].
    pub fn get_child(&self, caller: &Caller<'_>, suffix: &str) -> Option<Arc<Node>> {
        let key = (self.resolver.resolve(caller).into_owned(), suffix.to_string());
        read(&self.children).get(&key).cloned()
    }

    /// Set the level of the caller's package logger.
    ///
    /// Loggers below it that have no level of their own inherit it.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`](crate::ErrorKind::InvalidLevel) error if `level` is not a
    /// recognized level. Nothing is changed in that case.
    pub fn set_level(&self, caller: &Caller<'_>, level: impl IntoLevel) -> Result<(), Error> {
        let level = level.into_level()?;
        let logger = self.get_logger(caller, None);
        self.registry.set_level(&logger, level);
        Ok(())
    }

    /// Force every logger of the library, including the root, to `level`.
    ///
    /// # Errors
    ///
    /// Return an [`InvalidLevel`](crate::ErrorKind::InvalidLevel) error if `level` is not a
    /// recognized level. Nothing is changed in that case.
    pub fn set_global_level(&self, level: impl IntoLevel) -> Result<(), Error> {
        let level = level.into_level()?;
        self.registry.broadcast_level(level);
        Ok(())
    }

    /// Flush all appenders of the registry.
    pub fn flush(&self) {
        self.registry.flush();
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::Frame;
    use crate::append::Testing;

    const APP: &[Frame<'static>] = &[Frame::new("liblog::facade"), Frame::new("app::main")];
    const CALLER: Caller<'static> = Caller::new(APP, None, None);

    fn facade() -> LibLog {
        let registry = Registry::builder()
            .debug_flag(false)
            .append(Testing::default())
            .build();
        LibLog::new(Arc::new(registry))
    }

    #[test]
    fn test_logger_named_after_caller() {
        let log = facade();
        let node = log.get_logger(&CALLER, None);
        assert_eq!(node.name(), "liblog.app");
        assert!(Arc::ptr_eq(&node, &log.register_package(&CALLER)));

        let named = log.get_logger(&CALLER, Some("worker"));
        assert_eq!(named.name(), "liblog.worker");
        assert_eq!(log.registry().registered().len(), 2);
    }

    #[test]
    fn test_register_and_get_child() {
        let log = facade();
        assert!(log.get_child(&CALLER, "db").is_none());

        let db = log.register_child(&CALLER, "db");
        assert_eq!(db.name(), "liblog.app.db");
        assert!(Arc::ptr_eq(&log.get_child(&CALLER, "db").unwrap(), &db));
        // children and package loggers do not share bindings
        assert_eq!(log.get_logger(&CALLER, Some("db")).name(), "liblog.db");
    }

    #[test]
    fn test_children_are_scoped_to_their_package() {
        const ALPHA: Caller<'static> = Caller::new(&[Frame::new("alpha::store")], None, None);
        const BETA: Caller<'static> = Caller::new(&[Frame::new("beta::store")], None, None);

        let log = facade();
        let alpha_db = log.register_child(&ALPHA, "db");
        let beta_db = log.register_child(&BETA, "db");
        assert_eq!(alpha_db.name(), "liblog.alpha.db");
        assert_eq!(beta_db.name(), "liblog.beta.db");

        assert!(Arc::ptr_eq(&log.get_child(&ALPHA, "db").unwrap(), &alpha_db));
        assert!(Arc::ptr_eq(&log.get_child(&BETA, "db").unwrap(), &beta_db));
        assert!(log.get_child(&CALLER, "db").is_none());
    }

    #[test]
    fn test_set_level_lowers_floor() {
        let log = facade();
        assert_eq!(log.registry().lowest_level(), Level::Info);

        log.set_level(&CALLER, "debug").unwrap();
        assert_eq!(log.get_logger(&CALLER, None).level(), Some(Level::Debug));
        assert_eq!(log.registry().lowest_level(), Level::Debug);

        log.set_level(&CALLER, Level::Critical).unwrap();
        assert_eq!(log.registry().lowest_level(), Level::Debug);
    }

    #[test]
    fn test_invalid_levels_change_nothing() {
        let log = facade();
        let err = log.set_level(&CALLER, "verbose").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);
        let err = log.set_global_level(42u32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLevel);

        assert_eq!(log.registry().lowest_level(), Level::Info);
        assert_eq!(log.registry().root().level(), Some(Level::Info));
        assert!(log.registry().registered().is_empty());
    }

    #[test]
    fn test_set_global_level() {
        let log = facade();
        log.set_level(&CALLER, Level::Debug).unwrap();
        let db = log.register_child(&CALLER, "db");

        log.set_global_level(100u32).unwrap();
        assert_eq!(log.registry().lowest_level(), Level::Silent);
        assert_eq!(db.level(), Some(Level::Silent));
        assert!(!log.is_potentially_enabled(Level::Critical));

        log.set_global_level("warning").unwrap();
        assert_eq!(log.get_logger(&CALLER, None).level(), Some(Level::Warning));
        assert!(log.is_potentially_enabled(Level::Warning));
        assert!(!log.is_potentially_enabled(Level::Info));
    }
}
