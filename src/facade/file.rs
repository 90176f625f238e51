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
use crate::append::SingleFileBuilder;
use crate::config::FileHandlerConfig;
use crate::facade::Facade;
use crate::facade::declaration;
use crate::facade::missing_section;
use crate::title_case;

/// A facade that appends a named logger to the configured file.
#[derive(Debug, Clone)]
pub struct FileLogger {
    logger: Arc<Logger>,
}

impl FileLogger {
    /// Sets up the file handler of `name`.
    ///
    /// The directory of the configured file is created first when the handler is attached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if the title-cased name is not declared, or if it does not
    /// declare a `file` handler. Returns [`Error::Io`] if the directory or the file cannot be
    /// created; the level has already been applied at that point.
    pub fn new(registry: &Registry, name: &str) -> Result<Self, Error> {
        let name = title_case(name);
        let declared = declaration(registry, &name, Some(HandlerKind::File))?;
        let section = registry
            .config()
            .handlers
            .file
            .as_ref()
            .ok_or_else(|| missing_section(HandlerKind::File))?;

        let logger = registry.logger(&name);
        logger.set_level(declared.level);
        logger.add_handler_once(HandlerKind::File, || file_handler(section))?;
        Ok(Self { logger })
    }
}

impl Facade for FileLogger {
    fn open(registry: &Registry, name: &str) -> Result<Self, Error> {
        Self::new(registry, name)
    }

    fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

fn file_handler(config: &FileHandlerConfig) -> Result<Handler, Error> {
    let layout = config.formatter.layout()?.color(config.color);
    let appender = SingleFileBuilder::new(&config.filename)
        .layout(layout)
        .build()?;
    Ok(Handler::new(HandlerKind::File, appender))
}
