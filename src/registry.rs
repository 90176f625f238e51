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

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::LoggingConfig;
use crate::Logger;

/// The shared context facades are constructed against.
///
/// A registry owns one [`LoggingConfig`] and the named loggers created from it. Asking for the
/// same name twice returns the same [`Logger`], so every facade built for a name composes onto one
/// set of handlers. Clones share the configuration and the loggers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use speakup::Registry;
///
/// let registry = Registry::bundled().unwrap();
/// let a = registry.logger("Main");
/// let b = registry.clone().logger("Main");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    config: Arc<LoggingConfig>,
    loggers: Arc<Mutex<HashMap<String, Arc<Logger>>>>,
}

impl Registry {
    /// Creates a registry with no loggers over the given configuration.
    pub fn new(config: LoggingConfig) -> Self {
        Self {
            config: Arc::new(config),
            loggers: Arc::default(),
        }
    }

    /// Creates a registry over the configuration bundled with the crate.
    pub fn bundled() -> Result<Self, Error> {
        LoggingConfig::bundled().map(Self::new)
    }

    /// Creates a registry over the configuration file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        LoggingConfig::from_path(path).map(Self::new)
    }

    /// The configuration of this registry.
    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Returns the logger with this exact name, creating it if needed.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        self.loggers()
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Logger::new(name)))
            .clone()
    }

    /// Returns the logger with this exact name if it has been created.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers().get(name).cloned()
    }

    /// The names of the created loggers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers().keys().cloned().collect();
        names.sort();
        names
    }

    /// Flushes every created logger.
    pub fn flush(&self) {
        let loggers: Vec<Arc<Logger>> = self.loggers().values().cloned().collect();
        for logger in loggers {
            logger.flush();
        }
    }

    fn loggers(&self) -> MutexGuard<'_, HashMap<String, Arc<Logger>>> {
        self.loggers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Normalizes a logger name to title case.
///
/// The first letter of every run of cased letters is title-cased and the rest of the run is
/// lower-cased. Any other character ends the run, including digits and letters without case such
/// as CJK ideographs. Letters whose title case differs from their upper case use the title case
/// form for the four Latin digraphs (`ǅ`, `ǈ`, `ǋ`, `ǲ`) and the upper case mapping otherwise, so
/// `ß` becomes `SS` and Greek letters with ypogegrammeni expand.
///
/// ```
/// assert_eq!(speakup::title_case("main"), "Main");
/// assert_eq!(speakup::title_case("TEST_INVALID_LOGGER"), "Test_Invalid_Logger");
/// ```
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        let title = titlecase_digraph(c);
        if c.is_lowercase() || c.is_uppercase() || title.is_some() {
            if in_word {
                result.extend(c.to_lowercase());
            } else if let Some(title) = title {
                result.push(title);
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }
    result
}

fn titlecase_digraph(c: char) -> Option<char> {
    match c {
        'Ǆ' | 'ǅ' | 'ǆ' => Some('ǅ'),
        'Ǉ' | 'ǈ' | 'ǉ' => Some('ǈ'),
        'Ǌ' | 'ǋ' | 'ǌ' => Some('ǋ'),
        'Ǳ' | 'ǲ' | 'ǳ' => Some('ǲ'),
        _ => None,
    }
}
