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

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::Level;

/// Colors for different log levels.
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for critical level logs.
    pub critical: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warning: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for debug level logs.
    pub debug: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            critical: Color::BrightRed,
            error: Color::Red,
            warning: Color::Yellow,
            info: Color::Green,
            debug: Color::Blue,
        }
    }
}

impl LevelColor {
    /// The color of the given level.
    pub fn of(&self, level: Level) -> Color {
        match level {
            Level::Critical => self.critical,
            Level::Error => self.error,
            Level::Warning => self.warning,
            Level::Info => self.info,
            Level::Debug => self.debug,
        }
    }

    /// Colorize `text` with the color of `level`.
    pub fn colorize(&self, level: Level, text: &str) -> ColoredString {
        text.color(self.of(level))
    }
}
