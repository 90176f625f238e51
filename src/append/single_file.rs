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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Layout;
use crate::append::Append;
use crate::layout::TemplateLayout;
use crate::record::Record;

/// A builder to configure and create a [`SingleFile`] appender.
#[derive(Debug)]
pub struct SingleFileBuilder {
    filepath: PathBuf,
    layout: Box<dyn Layout>,
}

impl SingleFileBuilder {
    /// Create a new builder.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            layout: Box::new(TemplateLayout::default().no_color()),
        }
    }

    /// Sets the layout for the logs.
    ///
    /// Default to an uncolored [`TemplateLayout`].
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Build the [`SingleFile`] appender.
    ///
    /// The parent directory of the file is created first, including any missing intermediate
    /// directories. The file is opened for appending and created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or the file cannot be created.
    pub fn build(self) -> io::Result<SingleFile> {
        let SingleFileBuilder { filepath, layout } = self;
        if let Some(dir) = filepath.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&filepath)?;

        Ok(SingleFile {
            filepath,
            writer: Mutex::new(file),
            layout,
        })
    }
}

/// An appender that writes log records to a file, one line per record.
///
/// Every record is written and flushed before [`Append::append`] returns.
#[derive(Debug)]
pub struct SingleFile {
    filepath: PathBuf,
    writer: Mutex<File>,
    layout: Box<dyn Layout>,
}

impl SingleFile {
    /// The path this appender writes to.
    pub fn path(&self) -> &Path {
        &self.filepath
    }

    fn writer(&self) -> MutexGuard<'_, File> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for SingleFile {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        let mut writer = self.writer();
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.writer().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;
    use crate::Level;

    #[test]
    fn test_single_file_creates_directories() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("nested").join("deeper").join("app.log");

        let appender = SingleFileBuilder::new(&path)
            .layout(TemplateLayout::new("{message}", "%Y").unwrap().no_color())
            .build()
            .unwrap();
        assert_eq!(appender.path(), path.as_path());

        let rand_str = generate_random_string();
        appender
            .append(&Record::new("Main", Level::Info, format_args!("{rand_str}")))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{rand_str}\n"));
    }

    #[test]
    fn test_single_file_appends() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("app.log");
        fs::write(&path, "existing\n").unwrap();

        let appender = SingleFileBuilder::new(&path)
            .layout(TemplateLayout::new("{message}", "%Y").unwrap().no_color())
            .build()
            .unwrap();
        appender
            .append(&Record::new("Main", Level::Info, format_args!("appended")))
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "existing\nappended\n");
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        let random_string: String = std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect();

        random_string
    }
}
