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
use std::sync::Mutex;

use liblog::Append;
use liblog::Error;
use liblog::Level;
use liblog::LibLog;
use liblog::Record;
use liblog::Registry;

#[derive(Debug)]
struct Capture(Arc<Mutex<Vec<String>>>);

impl Append for Capture {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let line = format!("{} {} {}", record.level(), record.display_name(), record.args());
        self.0.lock().unwrap().push(line);
        Ok(())
    }
}

// The registry is process-wide, so this binary holds a single test.
#[test]
fn global_registry_is_initialized_once() {
    let lines = Arc::new(Mutex::new(vec![]));
    let first = Registry::initialize(
        Registry::builder()
            .debug_flag(true)
            .append(Capture(lines.clone())),
    );
    assert_eq!(first.lowest_level(), Level::Debug);

    let log = LibLog::global();
    log.set_level(&liblog::caller!(), Level::Warning).unwrap();

    // a second initialization keeps the established state
    let second = Registry::initialize(Registry::builder().debug_flag(false));
    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&first, &Registry::global()));
    assert!(Arc::ptr_eq(&first, log.registry()));
    assert_eq!(second.lowest_level(), Level::Debug);
    assert_eq!(second.registered().len(), 1);

    liblog::info!("filtered by the package level");
    liblog::warning!("kept {}", 1);

    liblog::bridge::try_setup_log_crate(log).unwrap();
    log::debug!("filtered too");
    log::error!("from the log crate");

    liblog::critical!("before silence");
    log.set_global_level("SILENT").unwrap();
    liblog::critical!("after silence");
    log::error!("after silence");

    assert_eq!(
        *lines.lock().unwrap(),
        vec![
            "WARNING global_registry kept 1",
            "ERROR global_registry from the log crate",
            "CRITICAL global_registry before silence",
        ]
    );
}
