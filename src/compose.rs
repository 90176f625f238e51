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

//! Compose the application configuration from the bundled documents and command line overrides.
//!
//! The composed document is `conf/config.toml` with `conf/logging/log.toml` mounted under the
//! `logging` key. Overrides address keys with dotted paths:
//!
//! * `key.path=value` replaces an existing key.
//! * `+key.path=value` adds a key that must not exist yet.
//! * `++key.path=value` adds or replaces a key.
//! * `~key.path` removes an existing key.
//!
//! Values are read as TOML values when they parse as one (`20`, `true`, `"text"`,
//! `["console", "file"]`) and as plain strings otherwise.

use std::io::Write;
use std::str::FromStr;

use toml::Table;
use toml::Value;

use crate::Error;
use crate::VERSION;
use crate::config::BUNDLED_LOGGING_CONFIG;

/// The application document bundled with the crate.
pub const BUNDLED_APP_CONFIG: &str = include_str!("../conf/config.toml");

/// One command line override.
#[derive(Debug, Clone, PartialEq)]
pub enum Override {
    /// `key=value`: replace an existing key.
    Set { path: Vec<String>, value: Value },
    /// `+key=value`: add a new key.
    Add { path: Vec<String>, value: Value },
    /// `++key=value`: add or replace a key.
    Upsert { path: Vec<String>, value: Value },
    /// `~key`: remove an existing key.
    Remove { path: Vec<String> },
}

impl FromStr for Override {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if let Some(key) = raw.strip_prefix('~') {
            return Ok(Override::Remove {
                path: parse_path(key)?,
            });
        }

        let (op, rest) = if let Some(rest) = raw.strip_prefix("++") {
            (Op::Upsert, rest)
        } else if let Some(rest) = raw.strip_prefix('+') {
            (Op::Add, rest)
        } else {
            (Op::Set, raw)
        };

        let (key, value) = rest
            .split_once('=')
            .ok_or_else(|| Error::Override(format!("expected key=value, got {raw:?}")))?;
        let path = parse_path(key)?;
        let value = parse_value(value);
        Ok(match op {
            Op::Set => Override::Set { path, value },
            Op::Add => Override::Add { path, value },
            Op::Upsert => Override::Upsert { path, value },
        })
    }
}

enum Op {
    Set,
    Add,
    Upsert,
}

impl Override {
    /// Applies this override to `root`.
    pub fn apply(self, root: &mut Table) -> Result<(), Error> {
        match self {
            Override::Set { path, value } => {
                let (parent, key) = walk(root, &path, false)?;
                match parent.get_mut(key) {
                    Some(slot) => *slot = value,
                    None => return Err(not_found(&path)),
                }
            }
            Override::Add { path, value } => {
                let (parent, key) = walk(root, &path, true)?;
                if parent.contains_key(key) {
                    return Err(Error::Override(format!(
                        "key '{}' already exists, use '++' to replace it",
                        path.join(".")
                    )));
                }
                parent.insert(key.to_string(), value);
            }
            Override::Upsert { path, value } => {
                let (parent, key) = walk(root, &path, true)?;
                parent.insert(key.to_string(), value);
            }
            Override::Remove { path } => {
                let (parent, key) = walk(root, &path, false)?;
                if parent.remove(key).is_none() {
                    return Err(not_found(&path));
                }
            }
        }
        Ok(())
    }
}

/// Composes the bundled documents and applies `overrides` in order.
pub fn compose<S: AsRef<str>>(overrides: &[S]) -> Result<Table, Error> {
    let mut config: Table = toml::from_str(BUNDLED_APP_CONFIG)?;
    let logging: Table = toml::from_str(BUNDLED_LOGGING_CONFIG)?;
    config.insert("logging".to_string(), Value::Table(logging));

    for raw in overrides {
        raw.as_ref().parse::<Override>()?.apply(&mut config)?;
    }
    Ok(config)
}

/// Writes the version banner followed by the composed configuration.
pub fn run<S: AsRef<str>>(overrides: &[S], out: &mut impl Write) -> Result<(), Error> {
    let config = compose(overrides)?;
    writeln!(out, "SpeakUp CLI: {VERSION}")?;
    write!(out, "{}", toml::to_string_pretty(&config)?)?;
    out.flush()?;
    Ok(())
}

fn parse_path(key: &str) -> Result<Vec<String>, Error> {
    let path: Vec<String> = key.trim().split('.').map(str::to_string).collect();
    if path.iter().any(String::is_empty) {
        return Err(Error::Override(format!("invalid key {key:?}")));
    }
    Ok(path)
}

fn parse_value(raw: &str) -> Value {
    let raw = raw.trim();
    toml::from_str::<Table>(&format!("value = {raw}"))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

fn walk<'t, 'p>(
    root: &'t mut Table,
    path: &'p [String],
    create: bool,
) -> Result<(&'t mut Table, &'p str), Error> {
    let Some((last, parents)) = path.split_last() else {
        return Err(Error::Override("empty key".to_string()));
    };

    let mut table = root;
    for (i, key) in parents.iter().enumerate() {
        if create && !table.contains_key(key) {
            table.insert(key.clone(), Value::Table(Table::new()));
        }
        table = match table.get_mut(key) {
            Some(Value::Table(next)) => next,
            Some(_) => {
                return Err(Error::Override(format!(
                    "'{}' is not a table",
                    path[..=i].join(".")
                )));
            }
            None => return Err(not_found(&path[..=i])),
        };
    }
    Ok((table, last.as_str()))
}

fn not_found(path: &[String]) -> Error {
    Error::Override(format!("key '{}' not found", path.join(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoggingConfig;

    fn lookup<'a>(table: &'a Table, path: &str) -> Option<&'a Value> {
        let mut parts = path.split('.');
        let mut value = table.get(parts.next()?)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        Some(value)
    }

    #[test]
    fn test_compose_without_overrides() {
        let config = compose::<&str>(&[]).unwrap();
        assert_eq!(
            lookup(&config, "app.name").and_then(Value::as_str),
            Some("SpeakUp")
        );
        assert_eq!(
            lookup(&config, "logging.loggers.Main.level").and_then(Value::as_str),
            Some("INFO")
        );
    }

    #[test]
    fn test_set_override() {
        let config = compose(&[
            "logging.loggers.Main.level=DEBUG",
            "logging.handlers.console.color=false",
        ])
        .unwrap();
        assert_eq!(
            lookup(&config, "logging.loggers.Main.level").and_then(Value::as_str),
            Some("DEBUG")
        );
        assert_eq!(
            lookup(&config, "logging.handlers.console.color").and_then(Value::as_bool),
            Some(false)
        );
    }

    #[test]
    fn test_add_upsert_and_remove() {
        let config = compose(&[
            "+app.retries=3",
            "++app.name=Quiet",
            "++extra.nested.flag=true",
            "~app.default_logger",
        ])
        .unwrap();
        assert_eq!(
            lookup(&config, "app.retries").and_then(Value::as_integer),
            Some(3)
        );
        assert_eq!(
            lookup(&config, "app.name").and_then(Value::as_str),
            Some("Quiet")
        );
        assert_eq!(
            lookup(&config, "extra.nested.flag").and_then(Value::as_bool),
            Some(true)
        );
        assert!(lookup(&config, "app.default_logger").is_none());
    }

    #[test]
    fn test_rejected_overrides() {
        for raw in [
            "app.missing=1",
            "+app.name=Again",
            "~app.missing",
            "app.name.inner=1",
            "app.name",
            "app..name=1",
        ] {
            let err = compose(&[raw]).unwrap_err();
            assert!(matches!(err, Error::Override(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn test_list_value() {
        let config = compose(&[r#"logging.loggers.Main.handlers=["console"]"#]).unwrap();
        let handlers = lookup(&config, "logging.loggers.Main.handlers")
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(handlers, &vec![Value::String("console".to_string())]);
    }

    #[test]
    fn test_composed_logging_section_is_valid() {
        let config = compose(&["logging.loggers.Main.level=20"]).unwrap();
        let logging = lookup(&config, "logging").and_then(Value::as_table).unwrap();
        let logging = LoggingConfig::from_toml_str(&toml::to_string(logging).unwrap()).unwrap();
        assert_eq!(
            logging.logger("Main").unwrap().level,
            crate::Level::Info
        );
    }

    #[test]
    fn test_run_prints_banner() {
        let mut out = Vec::new();
        run::<&str>(&[], &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some(format!("SpeakUp CLI: {VERSION}").as_str()));
        assert!(out.contains("[app]"), "{out}");
        assert!(out.contains("name = \"SpeakUp\""), "{out}");
    }
}
