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

//! Bridge the [`log`] crate facade to the named loggers of a registry.
//!
//! A record with target `t` goes to the logger named `title_case(t)` if the registry has created
//! it, typically through one of the facades. Records for other targets are dropped.
//!
//! ```no_run
//! use speakup::MultiLogger;
//! use speakup::Registry;
//!
//! let registry = Registry::bundled().unwrap();
//! MultiLogger::new(&registry, "Main").unwrap();
//! speakup::bridge::setup(registry).unwrap();
//!
//! log::info!(target: "main", "routed to the Main logger");
//! ```

use std::sync::Arc;

use log::Metadata;

use crate::Logger;
use crate::Record;
use crate::Registry;
use crate::title_case;

/// A [`log::Log`] implementation dispatching to the loggers of a [`Registry`].
#[derive(Debug, Clone)]
pub struct LogBridge {
    registry: Registry,
}

impl LogBridge {
    /// Creates a bridge over `registry`.
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    fn resolve(&self, target: &str) -> Option<Arc<Logger>> {
        self.registry.get(&title_case(target))
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.resolve(metadata.target())
            .is_some_and(|logger| logger.is_enabled_for(metadata.level().into()))
    }

    fn log(&self, log_record: &log::Record) {
        let Some(logger) = self.resolve(log_record.target()) else {
            return;
        };

        let record = Record::new(logger.name(), log_record.level().into(), *log_record.args())
            .with_location(log_record.module_path(), log_record.file(), log_record.line());
        logger.log_record(&record);
    }

    fn flush(&self) {
        self.registry.flush();
    }
}

/// Installs a [`LogBridge`] over `registry` as the global `log` logger.
///
/// # Errors
///
/// An error is returned if the global logger has already been set.
pub fn setup(registry: Registry) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogBridge::new(registry)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use log::Log;

    use super::*;
    use crate::Handler;
    use crate::HandlerKind;
    use crate::Level;
    use crate::LoggingConfig;
    use crate::append::Buffer;
    use crate::layout::TemplateLayout;

    #[test]
    fn test_bridge_routes_by_title_cased_target() {
        let registry = Registry::new(LoggingConfig::default());
        let logger = registry.logger("Main");
        logger.set_level(Level::Info);
        let buffer = Buffer::default().with_layout(
            TemplateLayout::new("{level} {name} {module} {message}", "%Y")
                .unwrap()
                .no_color(),
        );
        logger.add_handler(Handler::new(HandlerKind::Console, buffer.clone()));

        let bridge = LogBridge::new(registry);
        for (level, message) in [
            (log::Level::Warn, "careful"),
            (log::Level::Debug, "hidden"),
            (log::Level::Info, "hello"),
        ] {
            bridge.log(
                &log::Record::builder()
                    .target("main")
                    .level(level)
                    .module_path(Some("app::worker"))
                    .args(format_args!("{message}"))
                    .build(),
            );
        }
        bridge.log(
            &log::Record::builder()
                .target("unknown")
                .level(log::Level::Error)
                .args(format_args!("dropped"))
                .build(),
        );

        assert_eq!(
            buffer.lines(),
            vec!["WARNING Main app::worker careful", "INFO Main app::worker hello"]
        );
    }

    #[test]
    fn test_bridge_enabled() {
        let registry = Registry::new(LoggingConfig::default());
        registry.logger("Main").set_level(Level::Error);
        let bridge = LogBridge::new(registry);

        fn metadata(target: &str, level: log::Level) -> log::Metadata<'_> {
            log::Metadata::builder().target(target).level(level).build()
        }

        assert!(bridge.enabled(&metadata("main", log::Level::Error)));
        assert!(!bridge.enabled(&metadata("main", log::Level::Warn)));
        assert!(!bridge.enabled(&metadata("other", log::Level::Error)));
    }
}
