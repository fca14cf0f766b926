//! Pattern-based record formatting.
//!
//! Patterns use `%(field)s` placeholders with an optional `-` for left
//! alignment and a minimum width, e.g. `[%(asctime)s] %(levelname)-8s->%(message)s`.
//! `%%` renders a literal `%`. Unknown fields render as an empty string.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::LogRecord;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%\((\w+)\)(-?)(\d*)s").expect("placeholder pattern is valid")
});

/// Timestamp layout used for `%(asctime)s`.
pub const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Asctime,
    Created,
    LevelName,
    LevelNo,
    Message,
    Name,
    Unknown,
}

impl Field {
    fn parse(name: &str) -> Self {
        match name {
            "asctime" => Field::Asctime,
            "created" => Field::Created,
            "levelname" => Field::LevelName,
            "levelno" => Field::LevelNo,
            "message" => Field::Message,
            "name" => Field::Name,
            _ => Field::Unknown,
        }
    }

    fn value(self, record: &LogRecord) -> String {
        match self {
            Field::Asctime => record.timestamp.format(ASCTIME_FORMAT).to_string(),
            Field::Created => record.timestamp.timestamp().to_string(),
            Field::LevelName => record.level.name().to_string(),
            Field::LevelNo => record.level.as_number().to_string(),
            Field::Message => record.message.clone(),
            Field::Name => record.logger.clone(),
            Field::Unknown => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Field {
        field: Field,
        left_align: bool,
        width: usize,
    },
}

/// A named, immutable record formatter.
#[derive(Debug, Clone)]
pub struct Formatter {
    name: String,
    pattern: String,
    segments: Vec<Segment>,
}

impl Formatter {
    /// Compile a pattern.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let segments = compile(&pattern);
        Self {
            name: name.into(),
            pattern,
            segments,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Render a record.
    pub fn render(&self, record: &LogRecord) -> String {
        let mut out = String::with_capacity(self.pattern.len() + record.message.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field {
                    field,
                    left_align,
                    width,
                } => {
                    let value = field.value(record);
                    if *left_align {
                        out.push_str(&format!("{:<width$}", value, width = *width));
                    } else {
                        out.push_str(&format!("{:>width$}", value, width = *width));
                    }
                }
            }
        }
        out
    }
}

fn compile(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(pattern) {
        let whole = caps.get(0).expect("group 0 always matches");
        if whole.start() > last {
            segments.push(Segment::Literal(pattern[last..whole.start()].to_string()));
        }
        last = whole.end();

        match caps.get(1) {
            None => segments.push(Segment::Literal("%".to_string())),
            Some(name) => segments.push(Segment::Field {
                field: Field::parse(name.as_str()),
                left_align: !caps[2].is_empty(),
                width: caps[3].parse().unwrap_or(0),
            }),
        }
    }

    if last < pattern.len() {
        segments.push(Segment::Literal(pattern[last..].to_string()));
    }
    segments
}
