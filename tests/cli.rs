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

use std::process::Command;

fn speakup(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_speakup"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_prints_version_and_config() {
    let output = speakup(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some(format!("SpeakUp CLI: {}", env!("CARGO_PKG_VERSION")).as_str())
    );
    assert!(stdout.contains("[logging.loggers.Main]"), "{stdout}");
    assert!(stdout.contains("level = \"INFO\""), "{stdout}");
}

#[test]
fn test_applies_overrides() {
    let output = speakup(&["logging.loggers.Main.level=DEBUG", "+app.verbose=true"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("level = \"DEBUG\""), "{stdout}");
    assert!(stdout.contains("verbose = true"), "{stdout}");
}

#[test]
fn test_rejects_unknown_key() {
    let output = speakup(&["app.missing=1"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("app.missing"), "{stderr}");
}
