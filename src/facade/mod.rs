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

//! Facades that attach configured handlers to named loggers.
//!
//! Every facade title-cases the name it is given and looks it up in the registry's
//! configuration. [`ConsoleLogger`] and [`FileLogger`] additionally require their handler kind to
//! be declared for that name, while [`MultiLogger`] only requires the name and attaches whatever
//! kinds are declared, possibly none.
//!
//! Handlers are attached at most once per kind, so constructing a facade repeatedly for the same
//! name never duplicates output.

use std::sync::Arc;

use crate::Error;
use crate::HandlerKind;
use crate::Level;
use crate::Logger;
use crate::Registry;
use crate::config::LoggerConfig;

mod console;
mod file;
mod multi;

pub use self::console::ConsoleLogger;
pub use self::file::FileLogger;
pub use self::multi::MultiLogger;

/// The operations shared by every facade.
pub trait Facade {
    /// Constructs the facade for `name` against `registry`.
    fn open(registry: &Registry, name: &str) -> Result<Self, Error>
    where
        Self: Sized;

    /// The shared named logger this facade wraps.
    fn logger(&self) -> &Arc<Logger>;

    /// Sets the level of the wrapped logger.
    ///
    /// Accepts a [`Level`], a symbolic name such as `"DEBUG"`, or a numeric code such as `10u8`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLevel`] if a name or code does not denote a level. The level is
    /// left unchanged in that case.
    fn set_level<L>(&self, level: L) -> Result<(), Error>
    where
        L: TryInto<Level>,
        Error: From<L::Error>,
        Self: Sized,
    {
        self.logger().set_level(level.try_into()?);
        Ok(())
    }

    /// The effective level of the wrapped logger.
    fn level(&self) -> Level {
        self.logger().effective_level()
    }
}

/// Looks up the declaration of a normalized name, requiring `kind` when given.
fn declaration<'a>(
    registry: &'a Registry,
    name: &str,
    kind: Option<HandlerKind>,
) -> Result<&'a LoggerConfig, Error> {
    let config = registry
        .config()
        .logger(name)
        .ok_or_else(|| Error::logger_not_found(name))?;

    match kind {
        Some(kind) if !config.has_handler(kind) => Err(Error::handler_not_found(name, kind)),
        _ => Ok(config),
    }
}

fn missing_section(kind: HandlerKind) -> Error {
    Error::InvalidConfig(format!("no [handlers.{kind}] section"))
}
