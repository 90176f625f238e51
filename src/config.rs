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

//! The logging configuration document.
//!
//! The document has two sections: `loggers` maps a logger name to its level and handler kinds,
//! and `handlers` carries one section per handler kind.
//!
//! ```toml
//! [loggers.Main]
//! level = "INFO"
//! handlers = ["console", "file"]
//!
//! [handlers.console.formatter]
//! fmt = "{time} | {level:<8} | {name} | {message}"
//! datefmt = "%Y-%m-%d %H:%M:%S"
//!
//! [handlers.file]
//! filename = "logs/speakup.log"
//!
//! [handlers.file.formatter]
//! fmt = "{time} | {level:<8} | {name} | {message}"
//! ```
//!
//! Logger names are matched verbatim against the title-cased name a facade is constructed with,
//! so keys should be written in title case.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::Error;
use crate::Level;
use crate::layout::DEFAULT_DATEFMT;
use crate::layout::DEFAULT_FMT;
use crate::layout::TemplateLayout;

/// The logging document bundled with the crate.
pub const BUNDLED_LOGGING_CONFIG: &str = include_str!("../conf/logging/log.toml");

/// The kind of a handler. A named logger holds at most one handler of each kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Writes to a console stream.
    Console,
    /// Appends to a file.
    File,
}

impl HandlerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Console => "console",
            HandlerKind::File => "file",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed and validated logging configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub loggers: BTreeMap<String, LoggerConfig>,
    #[serde(default)]
    pub handlers: HandlersConfig,
}

/// The declaration of one named logger.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: Level,
    #[serde(default)]
    pub handlers: Vec<HandlerKind>,
}

impl LoggerConfig {
    /// Returns `true` if this logger declares a handler of the given kind.
    pub fn has_handler(&self, kind: HandlerKind) -> bool {
        self.handlers.contains(&kind)
    }
}

/// One optional section per handler kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlersConfig {
    pub console: Option<ConsoleHandlerConfig>,
    pub file: Option<FileHandlerConfig>,
}

/// The formatter template and date format of a handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    #[serde(default = "default_fmt")]
    pub fmt: String,
    #[serde(default = "default_datefmt")]
    pub datefmt: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            fmt: default_fmt(),
            datefmt: default_datefmt(),
        }
    }
}

/// The console stream a console handler writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleHandlerConfig {
    #[serde(default)]
    pub stream: ConsoleStream,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub formatter: FormatterConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileHandlerConfig {
    pub filename: PathBuf,
    #[serde(default)]
    pub color: bool,
    #[serde(default)]
    pub formatter: FormatterConfig,
}

impl FormatterConfig {
    /// Builds the layout this section describes. Coloring is left enabled.
    pub fn layout(&self) -> Result<TemplateLayout, Error> {
        TemplateLayout::new(&self.fmt, self.datefmt.as_str())
    }
}

fn default_fmt() -> String {
    DEFAULT_FMT.to_string()
}

fn default_datefmt() -> String {
    DEFAULT_DATEFMT.to_string()
}

fn default_true() -> bool {
    true
}

impl LoggingConfig {
    /// Loads the logging document bundled with the crate.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_toml_str(BUNDLED_LOGGING_CONFIG)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: LoggingConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Looks up a logger declaration by its exact name.
    pub fn logger(&self, name: &str) -> Option<&LoggerConfig> {
        self.loggers.get(name)
    }

    /// Checks the semantic rules serde cannot express.
    ///
    /// Every handler kind a logger references must have a section, file names must not be empty,
    /// and every formatter must build a layout.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, logger) in &self.loggers {
            for kind in &logger.handlers {
                let declared = match kind {
                    HandlerKind::Console => self.handlers.console.is_some(),
                    HandlerKind::File => self.handlers.file.is_some(),
                };
                if !declared {
                    return Err(Error::InvalidConfig(format!(
                        "logger '{name}' references handler '{kind}' which has no [handlers.{kind}] section"
                    )));
                }
            }
        }

        if let Some(console) = &self.handlers.console {
            console.formatter.layout()?;
        }
        if let Some(file) = &self.handlers.file {
            if file.filename.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "file handler requires a non-empty filename".to_string(),
                ));
            }
            file.formatter.layout()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config() {
        let config = LoggingConfig::bundled().unwrap();
        let main = config.logger("Main").unwrap();
        assert_eq!(main.level, Level::Info);
        assert!(main.has_handler(HandlerKind::Console));
        assert!(main.has_handler(HandlerKind::File));
        assert!(config.handlers.console.is_some());
        assert!(config.handlers.file.is_some());
    }

    #[test]
    fn test_numeric_level_and_defaults() {
        let config = LoggingConfig::from_toml_str(
            r#"
            [loggers.Worker]
            level = 10
            handlers = ["console"]

            [handlers.console]
            stream = "stderr"
            "#,
        )
        .unwrap();

        let worker = config.logger("Worker").unwrap();
        assert_eq!(worker.level, Level::Debug);

        let console = config.handlers.console.unwrap();
        assert_eq!(console.stream, ConsoleStream::Stderr);
        assert!(console.color);
        assert_eq!(console.formatter.fmt, default_fmt());
        assert_eq!(console.formatter.datefmt, default_datefmt());
    }

    #[test]
    fn test_logger_names_are_verbatim() {
        let config = LoggingConfig::bundled().unwrap();
        assert!(config.logger("main").is_none());
    }

    #[test]
    fn test_undeclared_handler_section() {
        let err = LoggingConfig::from_toml_str(
            r#"
            [loggers.Main]
            level = "INFO"
            handlers = ["file"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_unknown_handler_kind() {
        let err = LoggingConfig::from_toml_str(
            r#"
            [loggers.Main]
            level = "INFO"
            handlers = ["syslog"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{err}");
    }

    #[test]
    fn test_invalid_level() {
        let err = LoggingConfig::from_toml_str(
            r#"
            [loggers.Main]
            level = "LOUD"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "{err}");
    }

    #[test]
    fn test_invalid_template() {
        let err = LoggingConfig::from_toml_str(
            r#"
            [handlers.console.formatter]
            fmt = "{when} {message}"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_invalid_datefmt() {
        let err = LoggingConfig::from_toml_str(
            r#"
            [handlers.console.formatter]
            datefmt = "%!"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
    }

    #[test]
    fn test_empty_filename() {
        let err = LoggingConfig::from_toml_str(
            r#"
            [handlers.file]
            filename = ""
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)), "{err}");
    }
}
