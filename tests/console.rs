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

//! Console output checked on the real process streams.
//!
//! Each case re-runs this test binary filtered down to `console_child`, which builds the facades
//! from the environment and logs once. The parent inspects the captured stdout and stderr.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use rand::Rng;
use rand::distr::Alphanumeric;
use speakup::ConsoleLogger;
use speakup::Facade;
use speakup::MultiLogger;
use speakup::Registry;
use tempfile::TempDir;

const FACADE_ENV: &str = "SPEAKUP_TEST_FACADE";
const CONFIG_ENV: &str = "SPEAKUP_TEST_CONFIG";
const MESSAGE_ENV: &str = "SPEAKUP_TEST_MESSAGE";

const CONSTRUCTIONS: usize = 5;

#[test]
fn console_child() {
    let Ok(facade) = env::var(FACADE_ENV) else {
        return;
    };
    let config = env::var(CONFIG_ENV).unwrap();
    let message = env::var(MESSAGE_ENV).unwrap();
    let registry = Registry::from_path(config).unwrap();

    match facade.as_str() {
        "console" => {
            let mut last = None;
            for _ in 0..CONSTRUCTIONS {
                last = Some(ConsoleLogger::new(&registry, "main").unwrap());
            }
            let console = last.unwrap();
            console.logger().info(&message);
            console.logger().flush();
        }
        "multi" => {
            let mut last = None;
            for _ in 0..CONSTRUCTIONS {
                last = Some(MultiLogger::new(&registry, "main").unwrap());
            }
            let multi = last.unwrap();
            multi.info(&message);
            multi.logger().flush();
        }
        other => panic!("unknown facade {other}"),
    }
}

fn write_config(dir: &Path, stream: &str) -> String {
    let path = dir.join("log.toml");
    let filename = dir.join("logs").join("speakup.log");
    let text = format!(
        r#"
[loggers.Main]
level = "INFO"
handlers = ["console", "file"]

[handlers.console]
stream = "{stream}"
color = false

[handlers.console.formatter]
fmt = "{{level}} {{name}} {{message}}"

[handlers.file]
filename = '{}'
"#,
        filename.display()
    );
    fs::write(&path, text).unwrap();
    path.display().to_string()
}

fn run_child(facade: &str, stream: &str) -> (Output, String) {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), stream);
    let message: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    let output = Command::new(env::current_exe().unwrap())
        .args(["console_child", "--exact", "--nocapture", "--quiet", "--test-threads=1"])
        .env(FACADE_ENV, facade)
        .env(CONFIG_ENV, &config)
        .env(MESSAGE_ENV, &message)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "child failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    (output, message)
}

fn matching_lines(bytes: &[u8], message: &str) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| line.contains(message))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_console_logger_writes_one_line_to_stdout() {
    let (output, message) = run_child("console", "stdout");
    assert_eq!(
        matching_lines(&output.stdout, &message),
        vec![format!("INFO Main {message}")]
    );
    assert!(matching_lines(&output.stderr, &message).is_empty());
}

#[test]
fn test_console_logger_writes_one_line_to_stderr() {
    let (output, message) = run_child("console", "stderr");
    assert_eq!(
        matching_lines(&output.stderr, &message),
        vec![format!("INFO Main {message}")]
    );
    assert!(matching_lines(&output.stdout, &message).is_empty());
}

#[test]
fn test_multi_logger_writes_one_line_to_stdout() {
    let (output, message) = run_child("multi", "stdout");
    assert_eq!(
        matching_lines(&output.stdout, &message),
        vec![format!("INFO Main {message}")]
    );
    assert!(matching_lines(&output.stderr, &message).is_empty());
}

#[test]
fn test_multi_logger_writes_one_line_to_stderr() {
    let (output, message) = run_child("multi", "stderr");
    assert_eq!(
        matching_lines(&output.stderr, &message),
        vec![format!("INFO Main {message}")]
    );
    assert!(matching_lines(&output.stdout, &message).is_empty());
}
