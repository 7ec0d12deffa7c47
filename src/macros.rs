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

/// Capture the current call site as a [`Caller`](crate::Caller).
///
/// ```standalone_crate
/// let log = liblog::LibLog::global();
/// let node = log.register_package(&liblog::caller!());
/// assert_eq!(node.display_name(), "rust_out");
/// ```
#[macro_export]
macro_rules! caller {
    () => {{
        const STACK: &[$crate::Frame<'static>] = &[$crate::Frame::new(::core::module_path!())];
        $crate::Caller::new(
            STACK,
            ::core::option::Option::Some(::core::file!()),
            ::core::option::Option::Some(::core::line!()),
        )
    }};
}

/// Log a message at the given [`Level`](crate::Level).
///
/// The message is not formatted and the caller is not resolved unless the level is at or above
/// the registry's floor. Without `logger:`, the process-wide facade is used.
///
/// ```
/// use liblog::Level;
///
/// liblog::log_at!(Level::Warning, "retrying in {}s", 3);
/// ```
#[macro_export]
macro_rules! log_at {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {{
        let level: $crate::Level = $level;
        let facade: &$crate::LibLog = $logger;
        if facade.is_potentially_enabled(level) {
            facade.log(level, &$crate::caller!(), ::core::format_args!($($arg)+));
        }
    }};
    ($level:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $crate::LibLog::global(), $level, $($arg)+)
    };
}

/// Log a message at [`Level::Debug`](crate::Level::Debug).
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Level::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Debug, $($arg)+)
    };
}

/// Log a message at [`Level::Info`](crate::Level::Info).
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Level::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Info, $($arg)+)
    };
}

/// Log a message at [`Level::Warning`](crate::Level::Warning).
#[macro_export]
macro_rules! warning {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Level::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Warning, $($arg)+)
    };
}

/// Log a message at [`Level::Error`](crate::Level::Error).
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Level::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Error, $($arg)+)
    };
}

/// Log a message at [`Level::Critical`](crate::Level::Critical).
#[macro_export]
macro_rules! critical {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::Level::Critical, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Level::Critical, $($arg)+)
    };
}

/// Log a message at [`Level::Error`](crate::Level::Error) together with an error and its
/// sources.
///
/// ```
/// let err = std::io::Error::other("connection reset");
/// liblog::exception!(&err, "request {} failed", 17);
/// ```
#[macro_export]
macro_rules! exception {
    (logger: $logger:expr, $err:expr, $($arg:tt)+) => {{
        let facade: &$crate::LibLog = $logger;
        if facade.is_potentially_enabled($crate::Level::Error) {
            facade.exception(&$crate::caller!(), $err, ::core::format_args!($($arg)+));
        }
    }};
    ($err:expr, $($arg:tt)+) => {
        $crate::exception!(logger: $crate::LibLog::global(), $err, $($arg)+)
    };
}
