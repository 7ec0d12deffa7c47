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

use std::sync::Arc;

use super::Registry;
use crate::Append;
use crate::DebugFlag;
use crate::Level;
use crate::Trap;
use crate::append;
use crate::flag::ArgvFlag;
use crate::trap::DefaultTrap;

/// A builder for configuring the [`Registry`].
///
/// ```rust
/// use liblog::Level;
/// use liblog::Registry;
/// use liblog::append;
///
/// let registry = Registry::builder()
///     .debug_flag(true)
///     .append(append::Stdout::default())
///     .build();
/// assert_eq!(registry.lowest_level(), Level::Debug);
/// ```
#[must_use = "call `build` to create the registry or pass the builder to `Registry::initialize`"]
#[derive(Debug)]
pub struct RegistryBuilder {
    debug_flag: Box<dyn DebugFlag>,
    appends: Vec<Box<dyn Append>>,
    trap: Box<dyn Trap>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Create a builder that reads the debug flag from the process arguments and writes to
    /// stderr.
    pub fn new() -> Self {
        Self {
            debug_flag: Box::new(ArgvFlag::default()),
            appends: vec![],
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Set the provider consulted once to decide the initial level.
    pub fn debug_flag(mut self, flag: impl Into<Box<dyn DebugFlag>>) -> Self {
        self.debug_flag = flag.into();
        self
    }

    /// Add an [`Append`] to the root logger.
    ///
    /// If no append is configured, a default [`Stderr`](append::Stderr) is attached.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Set the [`Trap`] that receives emission errors.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the registry.
    ///
    /// The lowest active level starts at [`Level::Debug`] if the debug flag is set, otherwise at
    /// [`Level::Info`]. The root logger starts at the same level.
    pub fn build(self) -> Registry {
        let lowest_level = if self.debug_flag.is_debug(crate::LIBRARY) {
            Level::Debug
        } else {
            Level::Info
        };

        let mut appends = self.appends;
        if appends.is_empty() {
            appends.push(Box::new(append::Stderr::default()));
        }

        Registry::new(lowest_level, appends, Arc::from(self.trap))
    }
}
