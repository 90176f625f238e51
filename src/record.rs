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

use jiff::Zoned;

use crate::Level;

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: Zoned,

    // the metadata
    logger: &'a str,
    level: Level,
    module_path: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,

    // the payload
    args: fmt::Arguments<'a>,
}

impl<'a> Record<'a> {
    /// Creates a record observed now, in the system time zone.
    pub fn new(logger: &'a str, level: Level, args: fmt::Arguments<'a>) -> Self {
        Self {
            now: Zoned::now(),
            logger,
            level,
            module_path: None,
            file: None,
            line: None,
            args,
        }
    }

    /// Attaches the source location of the message.
    pub fn with_location(
        mut self,
        module_path: Option<&'a str>,
        file: Option<&'a str>,
        line: Option<u32>,
    ) -> Self {
        self.module_path = module_path;
        self.file = file;
        self.line = line;
        self
    }

    /// The observed time.
    pub fn time(&self) -> &Zoned {
        &self.now
    }

    /// The name of the logger that emitted the message.
    pub fn logger(&self) -> &'a str {
        self.logger
    }

    /// The severity of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The module path of the message.
    pub fn module_path(&self) -> Option<&'a str> {
        self.module_path
    }

    /// The source file containing the message.
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// The line containing the message.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The message body.
    pub fn args(&self) -> &fmt::Arguments<'a> {
        &self.args
    }
}
