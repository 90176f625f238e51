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

use crate::Error;
use crate::Handler;
use crate::HandlerKind;
use crate::Logger;
use crate::Registry;
use crate::append::Stderr;
use crate::append::Stdout;
use crate::config::ConsoleHandlerConfig;
use crate::config::ConsoleStream;
use crate::facade::Facade;
use crate::facade::declaration;
use crate::facade::missing_section;
use crate::title_case;

/// A facade that writes a named logger to the console.
///
/// # Examples
///
/// ```
/// use speakup::ConsoleLogger;
/// use speakup::Facade;
/// use speakup::Level;
/// use speakup::Registry;
///
/// let registry = Registry::bundled().unwrap();
/// let console = ConsoleLogger::new(&registry, "main").unwrap();
/// assert_eq!(console.level(), Level::Info);
/// console.logger().info("Hello console!");
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    logger: Arc<Logger>,
}

impl ConsoleLogger {
    /// Sets up the console handler of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if the title-cased name is not declared, or if it does not
    /// declare a `console` handler.
    pub fn new(registry: &Registry, name: &str) -> Result<Self, Error> {
        let name = title_case(name);
        let declared = declaration(registry, &name, Some(HandlerKind::Console))?;
        let section = registry
            .config()
            .handlers
            .console
            .as_ref()
            .ok_or_else(|| missing_section(HandlerKind::Console))?;

        let logger = registry.logger(&name);
        logger.set_level(declared.level);
        logger.add_handler_once(HandlerKind::Console, || console_handler(section))?;
        Ok(Self { logger })
    }
}

impl Facade for ConsoleLogger {
    fn open(registry: &Registry, name: &str) -> Result<Self, Error> {
        Self::new(registry, name)
    }

    fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

fn console_handler(config: &ConsoleHandlerConfig) -> Result<Handler, Error> {
    let layout = config.formatter.layout()?.color(config.color);
    let handler = match config.stream {
        ConsoleStream::Stdout => {
            Handler::new(HandlerKind::Console, Stdout::default().with_layout(layout))
        }
        ConsoleStream::Stderr => {
            Handler::new(HandlerKind::Console, Stderr::default().with_layout(layout))
        }
    };
    Ok(handler)
}
