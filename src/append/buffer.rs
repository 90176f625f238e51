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
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Layout;
use crate::append::Append;
use crate::layout::TemplateLayout;
use crate::record::Record;

/// An appender that keeps formatted records in memory.
///
/// Clones share the same buffer, so a test can keep one handle and give the other to a handler.
///
/// # Examples
///
/// ```
/// use speakup::append::Buffer;
/// use speakup::layout::TemplateLayout;
///
/// let buffer = Buffer::default().with_layout(TemplateLayout::new("{message}", "%Y").unwrap());
/// assert!(buffer.contents().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Buffer {
    bytes: Arc<Mutex<Vec<u8>>>,
    layout: Arc<dyn Layout>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self {
            bytes: Arc::default(),
            layout: Arc::new(TemplateLayout::default().no_color()),
        }
    }
}

impl Buffer {
    /// Sets the layout for the [`Buffer`] appender.
    pub fn with_layout(mut self, layout: impl Layout) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// The written lines, without their terminators.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.bytes().clear();
    }

    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for Buffer {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        self.bytes().extend_from_slice(&bytes);
        Ok(())
    }
}
