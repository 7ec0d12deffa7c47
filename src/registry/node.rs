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
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::Weak;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::Append;
use crate::Caller;
use crate::Level;
use crate::Trap;
use crate::record::Record;
use crate::record::strip_root;

// rank stored for a node without its own level
const UNSET: u32 = 0;

// used only if the parent chain was dropped together with its registry
const DETACHED_LEVEL: Level = Level::Info;

/// A named logger in the hierarchy.
///
/// Nodes are created and owned by the [`Registry`](crate::Registry). A node without its own level
/// inherits the effective level of its parent. Records accepted by a node are written by the
/// node's appenders and then by the appenders of every ancestor up to the root.
#[derive(Debug)]
pub struct Node {
    name: String,
    level: AtomicU32,
    appends: RwLock<Vec<Box<dyn Append>>>,
    parent: RwLock<Weak<Node>>,
    trap: Arc<dyn Trap>,
}

impl Node {
    pub(crate) fn root(
        name: impl Into<String>,
        level: Level,
        appends: Vec<Box<dyn Append>>,
        trap: Arc<dyn Trap>,
    ) -> Node {
        Node {
            name: name.into(),
            level: AtomicU32::new(level.rank()),
            appends: RwLock::new(appends),
            parent: RwLock::new(Weak::new()),
            trap,
        }
    }

    pub(crate) fn child(name: impl Into<String>, parent: &Arc<Node>) -> Node {
        Node {
            name: name.into(),
            level: AtomicU32::new(UNSET),
            appends: RwLock::new(vec![]),
            parent: RwLock::new(Arc::downgrade(parent)),
            trap: parent.trap.clone(),
        }
    }

    /// The full dotted name, including the root segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name shown in headers: the full name without its root segment.
    pub fn display_name(&self) -> &str {
        strip_root(&self.name)
    }

    /// The level set on this node, or `None` if it inherits.
    pub fn level(&self) -> Option<Level> {
        Level::from_rank(self.level.load(Ordering::Acquire))
    }

    pub(crate) fn store_level(&self, level: Level) {
        self.level.store(level.rank(), Ordering::Release);
    }

    pub fn parent(&self) -> Option<Arc<Node>> {
        self.parent
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .upgrade()
    }

    pub(crate) fn set_parent(&self, parent: &Arc<Node>) {
        *self.parent.write().unwrap_or_else(PoisonError::into_inner) = Arc::downgrade(parent);
    }

    /// The level of this node, or of its nearest ancestor that has one.
    pub fn effective_level(&self) -> Level {
        if let Some(level) = self.level() {
            return level;
        }

        let mut parent = self.parent();
        while let Some(node) = parent {
            if let Some(level) = node.level() {
                return level;
            }
            parent = node.parent();
        }
        DETACHED_LEVEL
    }

    /// Whether a record at `level` would be written by this node.
    ///
    /// [`Level::Silent`] is never written.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level != Level::Silent && level >= self.effective_level()
    }

    /// Attach one more appender to this node.
    pub fn add_append(&self, append: impl Into<Box<dyn Append>>) {
        self.appends
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(append.into());
    }

    /// Log a message at `level` if this node's effective level allows it.
    pub fn log(&self, level: Level, caller: &Caller<'_>, args: fmt::Arguments<'_>) {
        self.log_error(level, caller, args, None);
    }

    pub(crate) fn log_error(
        &self,
        level: Level,
        caller: &Caller<'_>,
        args: fmt::Arguments<'_>,
        error: Option<&(dyn std::error::Error + 'static)>,
    ) {
        if !self.is_enabled_for(level) {
            return;
        }

        let record = Record::builder(args)
            .level(level)
            .logger(&self.name)
            .error(error)
            .module_path(caller.module_path())
            .file(caller.file())
            .line(caller.line())
            .build();
        self.handle(&record);
    }

    /// Write `record` to the appenders of this node and of all its ancestors.
    fn handle(&self, record: &Record) {
        self.append(record);

        let mut parent = self.parent();
        while let Some(node) = parent {
            node.append(record);
            parent = node.parent();
        }
    }

    fn append(&self, record: &Record) {
        let appends = self.appends.read().unwrap_or_else(PoisonError::into_inner);
        for append in appends.iter() {
            if let Err(err) = append.append(record) {
                self.trap.trap(&err);
            }
        }
    }

    /// Flush the appenders attached to this node.
    pub fn flush(&self) {
        let appends = self.appends.read().unwrap_or_else(PoisonError::into_inner);
        for append in appends.iter() {
            if let Err(err) = append.flush() {
                self.trap.trap(&err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::Error;
    use crate::ErrorKind;
    use crate::Frame;
    use crate::trap::DefaultTrap;

    #[derive(Debug, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl Append for Lines {
        fn append(&self, record: &Record) -> Result<(), Error> {
            let line = format!("{}:{}", record.logger(), record.args());
            self.0.lock().unwrap().push(line);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Append for Failing {
        fn append(&self, _: &Record) -> Result<(), Error> {
            Err(Error::new(ErrorKind::Unexpected, "sink closed"))
        }
    }

    #[derive(Debug, Default)]
    struct CountingTrap(Arc<Mutex<usize>>);

    impl Trap for CountingTrap {
        fn trap(&self, _: &Error) {
            *self.0.lock().unwrap() += 1;
        }
    }

    const STACK: &[Frame<'static>] = &[Frame::new("app")];
    const CALLER: Caller<'static> = Caller::new(STACK, None, None);

    #[test]
    fn test_inherit_and_propagate() {
        let lines = Arc::new(Mutex::new(vec![]));
        let root = Arc::new(Node::root(
            "liblog",
            Level::Warning,
            vec![Box::new(Lines(lines.clone()))],
            Arc::new(DefaultTrap::default()),
        ));
        let app = Arc::new(Node::child("liblog.app", &root));
        let db = Node::child("liblog.app.db", &app);

        assert_eq!(db.level(), None);
        assert_eq!(db.effective_level(), Level::Warning);
        assert_eq!(db.display_name(), "app.db");

        db.log(Level::Info, &CALLER, format_args!("dropped"));
        app.store_level(Level::Debug);
        assert_eq!(db.effective_level(), Level::Debug);
        db.log(Level::Info, &CALLER, format_args!("kept"));
        db.log(Level::Silent, &CALLER, format_args!("never"));

        assert_eq!(*lines.lock().unwrap(), vec!["liblog.app.db:kept".to_string()]);
    }

    #[test]
    fn test_append_errors_are_trapped() {
        let count = Arc::new(Mutex::new(0));
        let root = Node::root(
            "liblog",
            Level::Debug,
            vec![Box::new(Failing)],
            Arc::new(CountingTrap(count.clone())),
        );
        root.add_append(Failing);
        root.log(Level::Error, &CALLER, format_args!("boom"));
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[test]
    fn test_detached_node() {
        let root = Arc::new(Node::root(
            "liblog",
            Level::Critical,
            vec![],
            Arc::new(DefaultTrap::default()),
        ));
        let child = Node::child("liblog.app", &root);
        drop(root);
        assert!(child.parent().is_none());
        assert_eq!(child.effective_level(), DETACHED_LEVEL);
    }
}
