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
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU8;
use std::sync::atomic::Ordering;

use crate::Append;
use crate::Error;
use crate::HandlerKind;
use crate::Level;
use crate::record::Record;

// level code stored when no level has been set
const UNSET: u8 = 0;

/// A sink attached to a [`Logger`], tagged with its kind.
///
/// The kind tag is what the duplicate-handler guard inspects: a logger never holds two handlers of
/// the same kind when they are attached through the facades.
#[derive(Debug)]
pub struct Handler {
    kind: HandlerKind,
    append: Box<dyn Append>,
}

impl Handler {
    /// Creates a handler of the given kind writing through `append`.
    pub fn new(kind: HandlerKind, append: impl Into<Box<dyn Append>>) -> Self {
        Self {
            kind,
            append: append.into(),
        }
    }

    /// The kind tag of this handler.
    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    /// Writes one record.
    pub fn handle(&self, record: &Record) -> anyhow::Result<()> {
        self.append.append(record)
    }

    /// Flushes the underlying appender.
    pub fn flush(&self) -> anyhow::Result<()> {
        self.append.flush()
    }
}

/// A named logger: a level and the handlers attached to it.
///
/// Loggers are shared through a [`Registry`](crate::Registry), which hands out the same
/// `Arc<Logger>` for the same name. Attached handlers stay attached until
/// [`clear_handlers`](Logger::clear_handlers) is called.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: AtomicU8,
    handlers: Mutex<Vec<Arc<Handler>>>,
}

impl Logger {
    /// The effective level of a logger whose level was never set.
    pub const DEFAULT_LEVEL: Level = Level::Warning;

    /// Creates a logger with no level and no handlers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: AtomicU8::new(UNSET),
            handlers: Mutex::new(vec![]),
        }
    }

    /// The name of this logger.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The level explicitly set on this logger, if any.
    pub fn level(&self) -> Option<Level> {
        Level::from_code(self.level.load(Ordering::Relaxed))
    }

    /// Sets the level of this logger.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.code(), Ordering::Relaxed);
    }

    /// The level records are checked against: the explicit level, or
    /// [`DEFAULT_LEVEL`](Logger::DEFAULT_LEVEL) when none was set.
    pub fn effective_level(&self) -> Level {
        self.level().unwrap_or(Self::DEFAULT_LEVEL)
    }

    /// Returns `true` if a record at `level` would be emitted.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.effective_level()
    }

    /// A snapshot of the attached handlers, in attachment order.
    pub fn handlers(&self) -> Vec<Arc<Handler>> {
        self.handlers_guard().clone()
    }

    /// Returns `true` if a handler of the given kind is attached.
    pub fn has_handler(&self, kind: HandlerKind) -> bool {
        self.handlers_guard().iter().any(|h| h.kind() == kind)
    }

    /// Attaches a handler. Attaching a handler that is already attached is a no-op.
    ///
    /// Returns `true` if the handler was attached.
    pub fn add_handler(&self, handler: impl Into<Arc<Handler>>) -> bool {
        let handler = handler.into();
        let mut handlers = self.handlers_guard();
        if handlers.iter().any(|h| Arc::ptr_eq(h, &handler)) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Builds and attaches a handler of `kind` unless one of that kind is already attached.
    ///
    /// The check and the attachment happen under the same lock. `build` is only called when a
    /// handler is missing. Returns `true` if a handler was attached.
    pub fn add_handler_once<F>(&self, kind: HandlerKind, build: F) -> Result<bool, Error>
    where
        F: FnOnce() -> Result<Handler, Error>,
    {
        let mut handlers = self.handlers_guard();
        if handlers.iter().any(|h| h.kind() == kind) {
            return Ok(false);
        }

        let handler = build()?;
        debug_assert_eq!(handler.kind(), kind);
        handlers.push(Arc::new(handler));
        Ok(true)
    }

    /// Detaches every handler.
    pub fn clear_handlers(&self) {
        self.handlers_guard().clear();
    }

    /// Emits a message at `level` if the level is enabled.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.is_enabled_for(level) {
            self.emit(&Record::new(&self.name, level, args));
        }
    }

    /// Emits a prepared record if its level is enabled.
    pub fn log_record(&self, record: &Record) {
        if self.is_enabled_for(record.level()) {
            self.emit(record);
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, format_args!("{message}"));
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, format_args!("{message}"));
    }

    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, format_args!("{message}"));
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, format_args!("{message}"));
    }

    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, format_args!("{message}"));
    }

    /// Flushes every attached handler.
    pub fn flush(&self) {
        for handler in self.handlers() {
            if let Err(err) = handler.flush() {
                self.handle_error(&handler, err);
            }
        }
    }

    fn emit(&self, record: &Record) {
        // snapshot so that handlers run without holding the lock
        for handler in self.handlers() {
            if let Err(err) = handler.handle(record) {
                self.handle_error(&handler, err);
            }
        }
    }

    fn handle_error(&self, handler: &Handler, err: anyhow::Error) {
        let _ = writeln!(
            io::stderr(),
            "failed to emit to the {} handler of logger '{}': {err}",
            handler.kind(),
            self.name
        );
    }

    fn handlers_guard(&self) -> MutexGuard<'_, Vec<Arc<Handler>>> {
        self.handlers.lock().unwrap_or_else(|e| e.into_inner())
    }
}
