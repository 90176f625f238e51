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

use crate::ConsoleLogger;
use crate::Error;
use crate::FileLogger;
use crate::HandlerKind;
use crate::Level;
use crate::Logger;
use crate::Registry;
use crate::facade::Facade;
use crate::facade::declaration;
use crate::title_case;

/// A facade that attaches every handler declared for a name.
///
/// Unlike [`ConsoleLogger`] and [`FileLogger`], only the name has to be declared: a name with no
/// handlers yields a logger with no handlers.
///
/// # Examples
///
/// ```no_run
/// use speakup::MultiLogger;
/// use speakup::Registry;
///
/// let registry = Registry::bundled().unwrap();
/// let logger = MultiLogger::new(&registry, "Main").unwrap();
/// logger.info("Written to the console and to logs/speakup.log");
/// ```
#[derive(Debug, Clone)]
pub struct MultiLogger {
    logger: Arc<Logger>,
}

impl MultiLogger {
    /// Sets up every handler declared for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if the title-cased name is not declared.
    pub fn new(registry: &Registry, name: &str) -> Result<Self, Error> {
        let name = title_case(name);
        let declared = declaration(registry, &name, None)?;

        let logger = registry.logger(&name);
        for kind in &declared.handlers {
            if logger.has_handler(*kind) {
                continue;
            }
            match kind {
                HandlerKind::Console => {
                    ConsoleLogger::new(registry, &name)?;
                }
                HandlerKind::File => {
                    FileLogger::new(registry, &name)?;
                }
            }
        }

        Ok(Self { logger })
    }

    /// Emits `message` at `level`.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        self.logger.log(level, format_args!("{message}"));
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }
}

impl Facade for MultiLogger {
    fn open(registry: &Registry, name: &str) -> Result<Self, Error> {
        Self::new(registry, name)
    }

    fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}
