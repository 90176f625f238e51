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
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::de;

use crate::Error;

/// The severity of a log record.
///
/// From least to most severe, the levels are:
///
/// - `Debug` (10)
/// - `Info` (20)
/// - `Warning` (30)
/// - `Error` (40)
/// - `Critical` (50)
///
/// A level can be written either as its symbolic name or as its numeric code:
///
/// ```
/// use speakup::Level;
///
/// assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
/// assert_eq!("20".parse::<Level>().unwrap(), Level::Info);
/// assert_eq!(Level::from_code(20), Some(Level::Info));
/// assert_eq!(Level::Info.code(), 20);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

const LEVEL_NAMES: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

impl Level {
    /// All levels, from least to most severe.
    pub const ALL: [Level; 5] = [
        Level::Debug,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Critical,
    ];

    /// The numeric code of this level.
    pub fn code(&self) -> u8 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Converts a numeric code back to a level. Only the five standard codes are recognized.
    pub fn from_code(code: u8) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.code() == code)
    }

    /// The upper-case symbolic name of this level.
    pub fn as_str(&self) -> &'static str {
        LEVEL_NAMES[*self as usize]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<u8>() {
            return Level::from_code(code).ok_or_else(|| Error::InvalidLevel(s.to_string()));
        }

        match s.to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" | "FATAL" => Ok(Level::Critical),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Error> {
        Level::from_code(code).ok_or_else(|| Error::InvalidLevel(code.to_string()))
    }
}

impl TryFrom<&str> for Level {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        s.parse()
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.code()
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LevelVisitor;

        impl de::Visitor<'_> for LevelVisitor {
            type Value = Level;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a level name such as \"INFO\" or a numeric code such as 20")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Level, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Level, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Level::from_code)
                    .ok_or_else(|| E::custom(Error::InvalidLevel(v.to_string())))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Level, E> {
                u8::try_from(v)
                    .ok()
                    .and_then(Level::from_code)
                    .ok_or_else(|| E::custom(Error::InvalidLevel(v.to_string())))
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warning);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Error < Level::Critical);
    }

    #[test]
    fn test_level_names_and_codes() {
        for level in Level::ALL {
            assert_eq!(level.as_str().parse::<Level>().unwrap(), level);
            assert_eq!(level.code().to_string().parse::<Level>().unwrap(), level);
            assert_eq!(Level::try_from(level.code()).unwrap(), level);
            assert_eq!(Level::try_from(level.as_str()).unwrap(), level);
        }

        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("Fatal".parse::<Level>().unwrap(), Level::Critical);
        assert!("LOUD".parse::<Level>().is_err());
        assert!("25".parse::<Level>().is_err());
        assert!(Level::from_code(0).is_none());
        assert!(matches!(Level::try_from(25u8), Err(Error::InvalidLevel(_))));
    }

    #[test]
    fn test_level_padding() {
        assert_eq!(format!("{:<8}|", Level::Info), "INFO    |");
        assert_eq!(format!("{:>8}|", Level::Error), "   ERROR|");
    }

    #[test]
    fn test_level_from_log_crate() {
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
    }
}
