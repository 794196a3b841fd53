use chrono::NaiveDateTime;
use serde::Serialize;

use crate::ops::edit_batch::Edit;
use crate::parse::grammar::{self, TIMESTAMP_FORMAT, TagKind};
use crate::parse::line::{TagSpan, extract_tags, find_tag};
use crate::util::duration;

/// Status box glyph variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMark {
    Open,
    Done,
    Cancelled,
}

impl StatusMark {
    pub fn glyph(self) -> char {
        match self {
            StatusMark::Open => grammar::BOX_GLYPH,
            StatusMark::Done => grammar::DONE_GLYPH,
            StatusMark::Cancelled => grammar::CANCELLED_GLYPH,
        }
    }

    pub fn from_glyph(c: char) -> Option<StatusMark> {
        match c {
            _ if c == grammar::BOX_GLYPH => Some(StatusMark::Open),
            _ if c == grammar::DONE_GLYPH => Some(StatusMark::Done),
            _ if c == grammar::CANCELLED_GLYPH => Some(StatusMark::Cancelled),
            _ => None,
        }
    }
}

/// One todo line. The raw text is the source of truth: status and tags are
/// derived views recomputed on each query, and transitions rewrite the raw
/// text surgically so an untouched line round-trips byte-identically.
///
/// Todos are transient: constructed from a document line when a command
/// runs, discarded when it finishes. Mutation happens only through the
/// named transition operations below.
#[derive(Debug, Clone)]
pub struct Todo {
    line_number: usize,
    original: String,
    raw: String,
}

impl Todo {
    /// Parse a line into a todo. Returns None when the line is not a todo
    /// (callers validate before invoking transitions).
    pub fn from_line(line_number: usize, raw: &str) -> Option<Todo> {
        grammar::todo_parts(raw)?;
        Some(Todo {
            line_number,
            original: raw.to_string(),
            raw: raw.to_string(),
        })
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn status(&self) -> StatusMark {
        grammar::todo_parts(&self.raw)
            .and_then(|(_, glyph, _)| StatusMark::from_glyph(glyph))
            .unwrap_or(StatusMark::Open)
    }

    pub fn indent_level(&self) -> usize {
        grammar::todo_parts(&self.raw)
            .map(|(indent, _, _)| grammar::indent_level(indent))
            .unwrap_or(0)
    }

    /// Human-readable description with status glyph and tag spans stripped
    pub fn text(&self) -> String {
        let mut s = self.raw.clone();
        for span in extract_tags(&s).into_iter().rev() {
            s.replace_range(span.range, "");
        }
        match grammar::todo_parts(&s) {
            Some((_, _, rest)) => rest.trim().to_string(),
            None => s.trim().to_string(),
        }
    }

    pub fn tags(&self) -> Vec<TagSpan> {
        extract_tags(&self.raw)
    }

    pub fn tag_value(&self, kind: TagKind) -> Option<String> {
        find_tag(&self.raw, kind).map(|s| s.value)
    }

    pub fn is_box(&self) -> bool {
        self.status() == StatusMark::Open
    }

    pub fn is_done(&self) -> bool {
        self.status() == StatusMark::Done
    }

    pub fn is_cancelled(&self) -> bool {
        self.status() == StatusMark::Cancelled
    }

    /// Started = open with an active `@started` and no `@finished`
    pub fn is_started(&self) -> bool {
        self.is_box() && self.tag_value(TagKind::Started).is_some()
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Open ⇄ Done. Entering done finalizes timing; leaving done keeps
    /// `@elapsed` as a historical record. No-op on cancelled todos.
    pub fn toggle_box(&mut self, now: NaiveDateTime) {
        match self.status() {
            StatusMark::Open => self.enter_terminal(StatusMark::Done, now),
            StatusMark::Done => self.reopen(),
            StatusMark::Cancelled => {}
        }
    }

    /// Done axis: open/cancelled → done, done → open. Done and cancelled
    /// are mutually exclusive terminals; entering one clears the other.
    pub fn toggle_done(&mut self, now: NaiveDateTime) {
        match self.status() {
            StatusMark::Done => self.reopen(),
            _ => self.enter_terminal(StatusMark::Done, now),
        }
    }

    /// Cancelled axis, mirror of `toggle_done`
    pub fn toggle_cancelled(&mut self, now: NaiveDateTime) {
        match self.status() {
            StatusMark::Cancelled => self.reopen(),
            _ => self.enter_terminal(StatusMark::Cancelled, now),
        }
    }

    /// Open → started sets `@started(now)`; started → open removes it and
    /// folds the elapsed time. Callers filter with `is_box()` first.
    pub fn toggle_start(&mut self, now: NaiveDateTime) {
        if self.is_started() {
            self.fold_elapsed(now);
        } else {
            self.set_tag(TagKind::Started, &format_timestamp(now));
        }
    }

    /// The textual edit implied by the transitions applied so far, if any
    pub fn make_edit(&self) -> Option<Edit> {
        (self.raw != self.original).then(|| Edit {
            line_number: self.line_number,
            new_text: self.raw.clone(),
        })
    }

    // -----------------------------------------------------------------------
    // Tag surgery
    // -----------------------------------------------------------------------

    fn enter_terminal(&mut self, mark: StatusMark, now: NaiveDateTime) {
        self.fold_elapsed(now);
        self.set_status(mark);
        self.set_tag(TagKind::Finished, &format_timestamp(now));
    }

    fn reopen(&mut self) {
        self.set_status(StatusMark::Open);
        self.remove_tag(TagKind::Finished);
    }

    fn set_status(&mut self, mark: StatusMark) {
        if let Some((indent, glyph, _)) = grammar::todo_parts(&self.raw) {
            let start = indent.len();
            let end = start + glyph.len_utf8();
            self.raw
                .replace_range(start..end, mark.glyph().encode_utf8(&mut [0; 4]));
        }
    }

    /// Replace an existing tag's payload in place, or append the tag at end
    /// of line. Keeps the at-most-one-per-kind invariant.
    fn set_tag(&mut self, kind: TagKind, payload: &str) {
        let rendered = format!("@{}({})", kind.word(), payload);
        if let Some(span) = find_tag(&self.raw, kind) {
            self.raw.replace_range(span.range, &rendered);
        } else {
            if !self.raw.is_empty() && !self.raw.ends_with([' ', '\t']) {
                self.raw.push(' ');
            }
            self.raw.push_str(&rendered);
        }
    }

    /// Remove a tag span together with the single space that preceded it
    fn remove_tag(&mut self, kind: TagKind) {
        if let Some(span) = find_tag(&self.raw, kind) {
            let mut start = span.range.start;
            if start > 0 && self.raw.as_bytes()[start - 1] == b' ' {
                start -= 1;
            }
            self.raw.replace_range(start..span.range.end, "");
        }
    }

    /// Fold the time since `@started` into `@elapsed` and drop `@started`.
    /// A zero-minute delta leaves any existing `@elapsed` untouched, so
    /// start/unstart round-trips byte-identically. An unparsable start
    /// timestamp is dropped without accumulating.
    fn fold_elapsed(&mut self, now: NaiveDateTime) {
        let Some(started) = self.tag_value(TagKind::Started) else {
            return;
        };
        if let Ok(t0) = NaiveDateTime::parse_from_str(&started, TIMESTAMP_FORMAT) {
            let delta = (now - t0).num_minutes();
            if delta > 0 {
                let prev = self
                    .tag_value(TagKind::Elapsed)
                    .and_then(|v| duration::parse_minutes(&v))
                    .unwrap_or(0);
                self.set_tag(TagKind::Elapsed, &duration::format_minutes(prev + delta));
            }
        }
        self.remove_tag(TagKind::Started);
    }
}

pub fn format_timestamp(t: NaiveDateTime) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}
