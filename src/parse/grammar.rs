use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Open-box status glyph
pub const BOX_GLYPH: char = '☐';
/// Done status glyph
pub const DONE_GLYPH: char = '✔';
/// Cancelled status glyph
pub const CANCELLED_GLYPH: char = '✘';
/// Every inline tag starts with this symbol
pub const TAG_SYMBOL: char = '@';

/// Timestamp format used by `@created`/`@started`/`@finished` payloads
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Ranked priority vocabulary, lowest to highest urgency, `@today` last.
/// Order is significant: it indexes the export colour palette.
pub const PRIORITY_NAMES: [&str; 5] = ["low", "medium", "high", "critical", "today"];

// The `regex` crate keeps no match position between calls: every find scans
// fresh from offset 0, so repeated classification of adjacent identical lines
// always reports the same spans.
static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(\S[^\r\n]*?):[ \t]*$").unwrap());
static TODO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)([☐✔✘])[ \t]?(.*)$").unwrap());

static TAG_CREATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@created\(([^)]*)\)").unwrap());
static TAG_STARTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@started\(([^)]*)\)").unwrap());
static TAG_FINISHED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@finished\(([^)]*)\)").unwrap());
static TAG_ELAPSED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@elapsed\(([^)]*)\)").unwrap());
static TAG_EST_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@est\(([^)]*)\)").unwrap());
static TAG_PRIORITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(low|medium|high|critical|today)\b").unwrap());

/// Inline tag kinds, in the fixed scan order used when two kinds would start
/// at the same offset (first matching kind wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Created,
    Started,
    Finished,
    Elapsed,
    Estimate,
    Priority,
}

impl TagKind {
    /// The tag word as written in the file (priority tags carry the keyword
    /// itself instead)
    pub fn word(self) -> &'static str {
        match self {
            TagKind::Created => "created",
            TagKind::Started => "started",
            TagKind::Finished => "finished",
            TagKind::Elapsed => "elapsed",
            TagKind::Estimate => "est",
            TagKind::Priority => "priority",
        }
    }

    /// All kinds in scan order
    pub fn all() -> [TagKind; 6] {
        [
            TagKind::Created,
            TagKind::Started,
            TagKind::Finished,
            TagKind::Elapsed,
            TagKind::Estimate,
            TagKind::Priority,
        ]
    }

    pub(crate) fn regex(self) -> &'static Regex {
        match self {
            TagKind::Created => &TAG_CREATED_RE,
            TagKind::Started => &TAG_STARTED_RE,
            TagKind::Finished => &TAG_FINISHED_RE,
            TagKind::Elapsed => &TAG_ELAPSED_RE,
            TagKind::Estimate => &TAG_EST_RE,
            TagKind::Priority => &TAG_PRIORITY_RE,
        }
    }
}

/// A priority keyword from the ranked vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    Today,
}

impl Priority {
    /// Index into `PRIORITY_NAMES` and the export colour palette
    pub fn rank(self) -> usize {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
            Priority::Today => 4,
        }
    }

    pub fn keyword(self) -> &'static str {
        PRIORITY_NAMES[self.rank()]
    }

    /// Exact keyword match only; anything else is not a priority tag
    pub fn from_keyword(word: &str) -> Option<Priority> {
        match word {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            "today" => Some(Priority::Today),
            _ => None,
        }
    }
}

pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

/// Split a todo line into (indent, status glyph, rest after the glyph and
/// its separating space). Returns None for non-todo lines.
pub fn todo_parts(raw: &str) -> Option<(&str, char, &str)> {
    let caps = TODO_RE.captures(raw)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let glyph = caps.get(2)?.as_str().chars().next()?;
    let rest = caps.get(3).map_or("", |m| m.as_str());
    Some((indent, glyph, rest))
}

/// Split a project line into (indent, name without the trailing colon).
/// A line whose first non-space character is a status glyph is a todo even
/// if it happens to end with a colon.
pub fn project_parts(raw: &str) -> Option<(&str, &str)> {
    if todo_parts(raw).is_some() {
        return None;
    }
    let caps = PROJECT_RE.captures(raw)?;
    let indent = caps.get(1).map_or("", |m| m.as_str());
    let name = caps.get(2)?.as_str();
    Some((indent, name))
}

/// Comment lines: non-blank, not a todo, not a project. Checked first during
/// classification and excluded from every toggle/export pass.
pub fn is_comment(raw: &str) -> bool {
    !is_blank(raw) && todo_parts(raw).is_none() && project_parts(raw).is_none()
}

/// Indent depth: one level per tab or per two leading spaces
pub fn indent_level(indent: &str) -> usize {
    let tabs = indent.chars().filter(|&c| c == '\t').count();
    let spaces = indent.chars().filter(|&c| c == ' ').count();
    tabs + spaces / 2
}
