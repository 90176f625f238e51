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

use std::convert::Infallible;

use crate::config::HandlerKind;

/// The error type of speakup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The logger name, or the handler kind for that name, is not declared in the configuration.
    #[error("{}", not_configured_message(.name, .handler))]
    NotConfigured {
        /// The normalized logger name that was looked up.
        name: String,
        /// The handler kind the facade required, if any.
        handler: Option<HandlerKind>,
    },
    /// The configuration document is well-formed but semantically invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// A severity could not be parsed from a name or a numeric code.
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
    /// A command line override could not be applied.
    #[error("invalid override: {0}")]
    Override(String),
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to perform IO action: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` if this error reports an undeclared logger name or handler kind.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Error::NotConfigured { .. })
    }

    pub(crate) fn logger_not_found(name: impl Into<String>) -> Self {
        Error::NotConfigured {
            name: name.into(),
            handler: None,
        }
    }

    pub(crate) fn handler_not_found(name: impl Into<String>, handler: HandlerKind) -> Self {
        Error::NotConfigured {
            name: name.into(),
            handler: Some(handler),
        }
    }
}

impl From<Infallible> for Error {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

fn not_configured_message(name: &str, handler: &Option<HandlerKind>) -> String {
    match handler {
        Some(kind) => format!("logger '{name}' with a {kind} handler not found in config"),
        None => format!("logger '{name}' not found in the configuration"),
    }
}
