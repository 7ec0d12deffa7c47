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

//! liblog gives every package of a process its own named logger, while one global policy
//! controls the verbosity of the whole tree.
//!
//! # Overview
//!
//! Loggers form a hierarchy under a root named `liblog`. A facade call is attributed to the crate
//! that made it, and that crate gets a child logger (`liblog.<crate>`) on first use. Any caller
//! can raise or silence the whole tree with [`LibLog::set_global_level`]. Output lines carry the
//! logger name in a header colored by level:
//!
//! ```text
//! [app] listening on 8080
//! [app.db] pool exhausted
//! ```
//!
//! The initial level is `Debug` if the process was launched with a `debug` (or `liblog`)
//! argument, otherwise `Info`.
//!
//! # Examples
//!
//! Log through the process-wide facade:
//!
//! ```
//! liblog::info!("Hello {}!", "world");
//! liblog::debug!("Only shown in debug mode.");
//! ```
//!
//! Configure the registry before first use and adjust levels:
//!
//! ```standalone_crate
//! use liblog::Level;
//! use liblog::LibLog;
//! use liblog::Registry;
//! use liblog::append;
//!
//! Registry::initialize(Registry::builder().append(append::Stdout::default()));
//!
//! let log = LibLog::global();
//! log.set_level(&liblog::caller!(), Level::Debug).unwrap();
//! let db = log.register_child(&liblog::caller!(), "db");
//! assert_eq!(db.display_name(), "rust_out.db");
//!
//! log.set_global_level("silent").unwrap();
//! liblog::critical!("Muted.");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod caller;
pub mod color;
pub mod flag;
pub mod layout;
pub mod record;
pub mod registry;
pub mod trap;

mod error;
mod facade;
mod level;
mod macros;

pub use append::Append;
pub use caller::Caller;
pub use caller::Frame;
pub use error::Error;
pub use error::ErrorKind;
pub use facade::LibLog;
pub use flag::DebugFlag;
pub use layout::Layout;
pub use level::IntoLevel;
pub use level::Level;
pub use record::Record;
pub use registry::Node;
pub use registry::Registry;
pub use registry::RegistryBuilder;
pub use trap::Trap;

/// The name of the library: the root logger's name and the package skipped by caller resolution.
pub const LIBRARY: &str = "liblog";
