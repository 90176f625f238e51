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

use std::borrow::Cow;
use std::fmt::Write;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::Error;
use crate::layout::Layout;
use crate::layout::LevelColor;
use crate::record::Record;

/// The template used when a formatter section omits `fmt`.
pub const DEFAULT_FMT: &str = "{time} | {level:<8} | {name} | {message}";

/// The date format used when a formatter section omits `datefmt`.
pub const DEFAULT_DATEFMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Time,
    Level,
    LevelNo,
    Name,
    Message,
    Module,
    File,
    Line,
}

impl Field {
    fn from_name(name: &str) -> Option<Field> {
        match name {
            "time" => Some(Field::Time),
            "level" => Some(Field::Level),
            "levelno" => Some(Field::LevelNo),
            "name" => Some(Field::Name),
            "message" => Some(Field::Message),
            "module" => Some(Field::Module),
            "file" => Some(Field::File),
            "line" => Some(Field::Line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

/// The widest padding a placeholder may ask for.
const MAX_WIDTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    align: Align,
    width: usize,
}

impl Spec {
    fn parse(spec: &str) -> Option<Spec> {
        let (align, width) = match spec.chars().next()? {
            '<' => (Align::Left, &spec[1..]),
            '>' => (Align::Right, &spec[1..]),
            '^' => (Align::Center, &spec[1..]),
            _ => (Align::Left, spec),
        };
        let width = width.parse().ok().filter(|width| *width <= MAX_WIDTH)?;
        Some(Spec { align, width })
    }

    fn pad<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let len = text.chars().count();
        if len >= self.width {
            return Cow::Borrowed(text);
        }

        let fill = self.width - len;
        let (left, right) = match self.align {
            Align::Left => (0, fill),
            Align::Right => (fill, 0),
            Align::Center => (fill / 2, fill - fill / 2),
        };
        Cow::Owned(format!("{}{text}{}", " ".repeat(left), " ".repeat(right)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field, Option<Spec>),
}

/// A parsed formatter template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub(crate) fn parse(fmt: &str) -> Result<Template, Error> {
        let mut segments = vec![];
        let mut literal = String::new();
        let mut chars = fmt.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut placeholder = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => return Err(invalid(fmt, "unclosed '{'")),
                            Some(c) => placeholder.push(c),
                        }
                    }

                    let (name, spec) = match placeholder.split_once(':') {
                        Some((name, spec)) => (name, Some(spec)),
                        None => (placeholder.as_str(), None),
                    };
                    let field = Field::from_name(name.trim()).ok_or_else(|| {
                        invalid(fmt, &format!("unknown placeholder '{{{name}}}'"))
                    })?;
                    let spec = match spec {
                        None | Some("") => None,
                        Some(spec) => Some(Spec::parse(spec).ok_or_else(|| {
                            invalid(fmt, &format!("invalid format spec '{spec}'"))
                        })?),
                    };

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field, spec));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(invalid(fmt, "unmatched '}'")),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Template { segments })
    }
}

fn invalid(fmt: &str, reason: &str) -> Error {
    Error::InvalidConfig(format!("invalid template {fmt:?}: {reason}"))
}

/// A layout that renders a record through a brace template.
///
/// Supported placeholders are `{time}`, `{level}`, `{levelno}`, `{name}`, `{message}`,
/// `{module}`, `{file}` and `{line}`. A placeholder may carry an alignment and a width, as in
/// `{level:<8}`, `{level:>8}` or `{level:^8}`. Write `{{` and `}}` for literal braces.
///
/// Output format of the default template:
///
/// ```text
/// 2024-08-11 22:44:57 | INFO     | Main | Hello info!
/// 2024-08-11 22:44:57 | WARNING  | Main | Hello warning!
/// ```
///
/// By default, the level is colored. Call [`no_color`](TemplateLayout::no_color) to disable it.
///
/// # Examples
///
/// ```
/// use speakup::layout::TemplateLayout;
///
/// let layout = TemplateLayout::new("{level:>8} {name}: {message}", "%H:%M:%S")
///     .unwrap()
///     .no_color();
/// ```
#[derive(Debug, Clone)]
pub struct TemplateLayout {
    template: Template,
    datefmt: String,
    colors: LevelColor,
    no_color: bool,
    timezone: TimeZone,
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            template: Template::parse(DEFAULT_FMT).expect("default template must parse"),
            datefmt: DEFAULT_DATEFMT.to_string(),
            colors: LevelColor::default(),
            no_color: false,
            timezone: TimeZone::system(),
        }
    }
}

impl TemplateLayout {
    /// Creates a layout from a template and a strftime date format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the template does not parse or the date format cannot
    /// render a timestamp.
    pub fn new(fmt: &str, datefmt: impl Into<String>) -> Result<Self, Error> {
        let template = Template::parse(fmt)?;
        let datefmt = datefmt.into();
        jiff::fmt::strtime::format(&datefmt, &Zoned::now()).map_err(|err| {
            Error::InvalidConfig(format!("invalid date format {datefmt:?}: {err}"))
        })?;

        Ok(Self {
            template,
            datefmt,
            ..Self::default()
        })
    }

    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Enable or disable colored output.
    pub fn color(mut self, enabled: bool) -> Self {
        self.no_color = !enabled;
        self
    }

    /// Customize the color of each level.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    fn render(&self, field: Field, record: &Record) -> anyhow::Result<String> {
        Ok(match field {
            Field::Time => {
                let time = record.time().with_time_zone(self.timezone.clone());
                jiff::fmt::strtime::format(&self.datefmt, &time)?
            }
            Field::Level => record.level().as_str().to_string(),
            Field::LevelNo => record.level().code().to_string(),
            Field::Name => record.logger().to_string(),
            Field::Message => record.args().to_string(),
            Field::Module => record.module_path().unwrap_or_default().to_string(),
            Field::File => record.file().unwrap_or_default().to_string(),
            Field::Line => record.line().map(|l| l.to_string()).unwrap_or_default(),
        })
    }
}

impl Layout for TemplateLayout {
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let mut text = String::new();

        for segment in &self.template.segments {
            match segment {
                Segment::Literal(literal) => text.push_str(literal),
                Segment::Field(field, spec) => {
                    let value = self.render(*field, record)?;
                    let value = match spec {
                        Some(spec) => spec.pad(&value),
                        None => Cow::Borrowed(value.as_str()),
                    };
                    if *field == Field::Level && !self.no_color {
                        let level = record.level();
                        write!(&mut text, "{}", self.colors.colorize(level, &value))?;
                    } else {
                        text.push_str(&value);
                    }
                }
            }
        }

        Ok(text.into_bytes())
    }
}
