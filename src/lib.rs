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

//! SpeakUp builds named loggers from a configuration document.
//!
//! # Overview
//!
//! A [`LoggingConfig`] declares loggers (a level plus a set of handler kinds) and the handler
//! sections (formatter template, date format, file name). A [`Registry`] owns one configuration
//! and the named loggers created from it. The facades attach handlers to those loggers:
//!
//! * [`ConsoleLogger`] attaches a console handler.
//! * [`FileLogger`] attaches a file handler.
//! * [`MultiLogger`] attaches every handler the configuration declares for the name.
//!
//! Constructing a facade is idempotent: at most one handler of each kind is ever attached to a
//! named logger, so creating the same facade many times never duplicates output.
//!
//! # Examples
//!
//! ```
//! use speakup::LoggingConfig;
//! use speakup::MultiLogger;
//! use speakup::Registry;
//!
//! let config = LoggingConfig::from_toml_str(
//!     r#"
//!     [loggers.Main]
//!     level = "INFO"
//!     handlers = ["console"]
//!
//!     [handlers.console.formatter]
//!     fmt = "{level:<8} {name}: {message}"
//!     "#,
//! )
//! .unwrap();
//!
//! let registry = Registry::new(config);
//! let logger = MultiLogger::new(&registry, "main").unwrap();
//! logger.info("Hello from SpeakUp!");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod compose;
pub mod config;
pub mod facade;
pub mod layout;

mod error;
mod level;
mod logger;
mod record;
mod registry;

pub use self::append::Append;
pub use self::config::HandlerKind;
pub use self::config::LoggingConfig;
pub use self::error::Error;
pub use self::facade::ConsoleLogger;
pub use self::facade::Facade;
pub use self::facade::FileLogger;
pub use self::facade::MultiLogger;
pub use self::layout::Layout;
pub use self::level::Level;
pub use self::logger::Handler;
pub use self::logger::Logger;
pub use self::record::Record;
pub use self::registry::Registry;
pub use self::registry::title_case;

/// The version of this crate, as printed by the command line banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
