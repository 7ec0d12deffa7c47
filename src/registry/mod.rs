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

//! The process-wide logger registry.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use crate::Append;
use crate::Level;
use crate::Trap;

mod builder;
mod node;

pub use self::builder::RegistryBuilder;
pub use self::node::Node;

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// Tracks every logger of the library tree and the lowest level active among them.
///
/// The registry owns a root node named after the library, every node registered under it, and
/// a floor: a watermark no higher than the effective level of any registered node. Facade calls
/// below the floor return before doing any work.
///
/// The floor is only lowered by [`Registry::set_level`] and [`Registry::lower_floor`]. Only
/// [`Registry::broadcast_level`] may raise it.
#[derive(Debug)]
pub struct Registry {
    root: Arc<Node>,
    floor: AtomicU32,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    // insertion order, no duplicates
    registered: Vec<Arc<Node>>,
    // full dotted name to node, including the root
    index: HashMap<String, Arc<Node>>,
}

impl State {
    fn nearest_ancestor(&self, name: &str) -> Option<Arc<Node>> {
        let mut name = name;
        while let Some((prefix, _)) = name.rsplit_once('.') {
            if let Some(node) = self.index.get(prefix) {
                return Some(node.clone());
            }
            name = prefix;
        }
        None
    }

    // Nodes registered before `node` whose parent sits above it are moved under it.
    fn adopt_descendants(&self, node: &Arc<Node>) {
        let prefix = format!("{}.", node.name());
        for descendant in self.registered.iter() {
            if !descendant.name().starts_with(&prefix) {
                continue;
            }
            let above = descendant
                .parent()
                .is_none_or(|parent| parent.name().len() < node.name().len());
            if above {
                descendant.set_parent(node);
            }
        }
    }
}

impl Registry {
    /// Create a new [`RegistryBuilder`].
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn new(
        lowest_level: Level,
        appends: Vec<Box<dyn Append>>,
        trap: Arc<dyn Trap>,
    ) -> Registry {
        let root = Arc::new(Node::root(crate::LIBRARY, lowest_level, appends, trap));

        let mut state = State::default();
        state.index.insert(root.name().to_string(), root.clone());

        Registry {
            root,
            floor: AtomicU32::new(lowest_level.rank()),
            state: Mutex::new(state),
        }
    }

    /// Initialize the process-wide registry from `builder`.
    ///
    /// Only the first call builds a registry. Later calls return the existing one and drop their
    /// builder, so state established earlier is never reset.
    pub fn initialize(builder: RegistryBuilder) -> Arc<Registry> {
        GLOBAL.get_or_init(|| Arc::new(builder.build())).clone()
    }

    /// The process-wide registry, initialized with a default builder on first use.
    pub fn global() -> Arc<Registry> {
        GLOBAL
            .get_or_init(|| Arc::new(RegistryBuilder::default().build()))
            .clone()
    }

    /// The root node. Its display name is empty.
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// The current floor.
    pub fn lowest_level(&self) -> Level {
        Level::from_rank(self.floor.load(Ordering::Acquire)).unwrap_or(Level::Debug)
    }

    /// Whether any registered node could write a record at `level`.
    #[inline]
    pub fn is_potentially_enabled(&self, level: Level) -> bool {
        level != Level::Silent && self.floor.load(Ordering::Acquire) <= level.rank()
    }

    /// Return the node named `<root>.<name>`, creating and registering it on first use.
    ///
    /// Concurrent first use of the same name creates exactly one node. The empty name is the
    /// root itself.
    pub fn register_logger(&self, name: &str) -> Arc<Node> {
        if name.is_empty() {
            return self.root.clone();
        }
        self.register(format!("{}.{name}", self.root.name()))
    }

    /// Return the node named `<parent>.<suffix>`, creating and registering it on first use.
    pub fn register_child(&self, parent: &Node, suffix: &str) -> Arc<Node> {
        if suffix.is_empty() {
            return self.register(parent.name().to_string());
        }
        self.register(format!("{}.{suffix}", parent.name()))
    }

    fn register(&self, name: String) -> Arc<Node> {
        let mut state = self.lock();
        if let Some(node) = state.index.get(&name) {
            return node.clone();
        }

        let parent = state
            .nearest_ancestor(&name)
            .unwrap_or_else(|| self.root.clone());
        let node = Arc::new(Node::child(name.clone(), &parent));
        state.adopt_descendants(&node);
        state.index.insert(name, node.clone());
        state.registered.push(node.clone());
        node
    }

    /// Look up a node by its name relative to the root, without creating it.
    pub fn lookup(&self, name: &str) -> Option<Arc<Node>> {
        if name.is_empty() {
            return Some(self.root.clone());
        }
        let name = format!("{}.{name}", self.root.name());
        self.lock().index.get(&name).cloned()
    }

    /// A snapshot of every registered node, in registration order. The root is not included.
    pub fn registered(&self) -> Vec<Arc<Node>> {
        self.lock().registered.clone()
    }

    /// Lower the floor to `level` if it is currently higher.
    pub fn lower_floor(&self, level: Level) {
        self.floor.fetch_min(level.rank(), Ordering::AcqRel);
    }

    /// Set the level of a single node, lowering the floor if needed.
    pub fn set_level(&self, node: &Node, level: Level) {
        let _state = self.lock();
        node.store_level(level);
        self.lower_floor(level);
    }

    /// Force the root and every registered node to `level`, and move the floor to `level`.
    ///
    /// Overrides any individually set level. This is the only operation that raises levels
    /// across the whole tree.
    pub fn broadcast_level(&self, level: Level) {
        let state = self.lock();
        self.root.store_level(level);
        for node in state.registered.iter() {
            node.store_level(level);
        }
        self.floor.store(level.rank(), Ordering::Release);
    }

    /// Flush the appenders of the root and every registered node.
    pub fn flush(&self) {
        self.root.flush();
        for node in self.registered() {
            node.flush();
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
