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

use clap::Parser;

/// Print the composed SpeakUp configuration.
#[derive(Debug, Parser)]
#[command(name = "speakup", version, about)]
struct Command {
    /// Overrides applied in order: `key=value`, `+key=value`, `++key=value` or `~key`.
    #[arg(value_name = "OVERRIDE")]
    overrides: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cmd = Command::parse();
    speakup::compose::run(&cmd.overrides, &mut std::io::stdout().lock())?;
    Ok(())
}
