use std::ops::Range;

use crate::model::todo::StatusMark;
use crate::parse::grammar::{self, Priority, TagKind};

/// Classification of one raw line of a todo file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Project { name: String, indent_level: usize },
    Todo { status: StatusMark, tags: Vec<TagSpan> },
}

/// One matched inline tag: its kind, its byte range in the raw line
/// (including the `@`), and its payload (the text inside the parentheses,
/// or the keyword itself for priority tags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    pub kind: TagKind,
    pub range: Range<usize>,
    pub value: String,
}

impl TagSpan {
    pub fn priority(&self) -> Option<Priority> {
        match self.kind {
            TagKind::Priority => Priority::from_keyword(&self.value),
            _ => None,
        }
    }
}

/// Classify one raw line. Comment is checked first and short-circuits all
/// further processing; then project; then todo status detection plus tag
/// extraction; whitespace-only lines are blank.
pub fn classify(raw: &str) -> LineKind {
    if grammar::is_comment(raw) {
        return LineKind::Comment;
    }
    if let Some((indent, name)) = grammar::project_parts(raw) {
        return LineKind::Project {
            name: name.to_string(),
            indent_level: grammar::indent_level(indent),
        };
    }
    if let Some((_, glyph, _)) = grammar::todo_parts(raw) {
        let status = StatusMark::from_glyph(glyph).unwrap_or(StatusMark::Open);
        return LineKind::Todo {
            status,
            tags: extract_tags(raw),
        };
    }
    LineKind::Blank
}

/// Extract every inline tag span from a raw line: at most one match per
/// kind, returned in document order of appearance. This is the single
/// shared implementation used by both the transition engine and the HTML
/// exporter. Comment lines never yield tags.
pub fn extract_tags(raw: &str) -> Vec<TagSpan> {
    if grammar::is_comment(raw) {
        return Vec::new();
    }

    // Scan kinds in fixed order so that a degenerate same-offset overlap
    // resolves to the first matching kind.
    let mut spans = Vec::new();
    for kind in TagKind::all() {
        if let Some(caps) = kind.regex().captures(raw) {
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            let value = caps.get(1).map_or(String::new(), |m| m.as_str().to_string());
            spans.push(TagSpan {
                kind,
                range: whole,
                value,
            });
        }
    }
    spans.sort_by_key(|s| s.range.start);
    // Drop any span that starts inside the previously accepted one (a tag
    // match nested in another tag's payload, or a same-offset tie); the
    // earlier kind in scan order wins and the survivors never overlap.
    let mut end = 0;
    spans.retain(|s| {
        if s.range.start < end {
            return false;
        }
        end = s.range.end;
        true
    });
    spans
}

/// First span of the given kind, if the line carries one
pub fn find_tag(raw: &str, kind: TagKind) -> Option<TagSpan> {
    extract_tags(raw).into_iter().find(|s| s.kind == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_blank() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Blank);
    }

    #[test]
    fn test_classify_comment() {
        assert_eq!(classify("Just a note to self"), LineKind::Comment);
    }

    #[test]
    fn test_classify_project() {
        assert_eq!(
            classify("  Errands:"),
            LineKind::Project {
                name: "Errands".to_string(),
                indent_level: 1
            }
        );
    }

    #[test]
    fn test_classify_todo_statuses() {
        for (line, expected) in [
            ("☐ open item", StatusMark::Open),
            ("✔ done item", StatusMark::Done),
            ("✘ cancelled item", StatusMark::Cancelled),
        ] {
            match classify(line) {
                LineKind::Todo { status, .. } => assert_eq!(status, expected),
                other => panic!("expected todo for {:?}, got {:?}", line, other),
            }
        }
    }

    #[test]
    fn test_comment_yields_no_tags() {
        // A comment mentioning tag-like text still extracts nothing
        assert!(extract_tags("note: @created(2024-01-01 10:00) was here").is_empty());
    }

    #[test]
    fn test_extract_tags_document_order() {
        let line = "☐ Fix roof @high @created(2024-01-01 10:00)";
        let tags = extract_tags(line);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].kind, TagKind::Priority);
        assert_eq!(tags[0].value, "high");
        assert_eq!(tags[1].kind, TagKind::Created);
        assert_eq!(tags[1].value, "2024-01-01 10:00");
        assert_eq!(&line[tags[1].range.clone()], "@created(2024-01-01 10:00)");
    }

    #[test]
    fn test_extract_tags_one_match_per_kind() {
        let tags = extract_tags("☐ x @est(1h) @est(2h)");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].value, "1h");
    }

    #[test]
    fn test_extract_all_kinds() {
        let line = "✔ x @created(2024-01-01 09:00) @started(2024-01-01 10:00) \
                    @finished(2024-01-01 11:00) @elapsed(1h) @est(2h) @today";
        let kinds: Vec<_> = extract_tags(line).iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TagKind::Created,
                TagKind::Started,
                TagKind::Finished,
                TagKind::Elapsed,
                TagKind::Estimate,
                TagKind::Priority,
            ]
        );
    }

    #[test]
    fn test_tag_nested_in_payload_is_not_a_span() {
        // A keyword inside another tag's payload must not produce a second,
        // overlapping span; the enclosing tag wins.
        let tags = extract_tags("☐ x @created(see @low)");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::Created);
        assert_eq!(tags[0].value, "see @low");

        let tags = extract_tags("☐ x @est(@today 2h)");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].kind, TagKind::Estimate);
    }

    #[test]
    fn test_spans_never_overlap() {
        let lines = [
            "☐ x @created(see @low)",
            "☐ x @elapsed(1h) @started(2024-01-01 10:00)",
            "☐ x @created(@started(x)) @high",
        ];
        for line in lines {
            let mut end = 0;
            for span in extract_tags(line) {
                assert!(span.range.start >= end, "overlap in {:?}", line);
                end = span.range.end;
            }
        }
    }

    #[test]
    fn test_unknown_at_word_is_not_a_tag() {
        // `@`-prefixed words outside the vocabulary are plain text
        assert!(extract_tags("☐ email bob@example.com about @stuff").is_empty());
    }

    #[test]
    fn test_extraction_is_call_count_independent() {
        // Regression: two structurally identical lines classified back to
        // back must produce identical results both times.
        let a = classify("☐ Item 1 @low");
        let b = classify("☐ Item 2 @low");
        let (LineKind::Todo { tags: ta, .. }, LineKind::Todo { tags: tb, .. }) = (a, b) else {
            panic!("expected todos");
        };
        assert_eq!(ta.len(), 1);
        assert_eq!(ta[0].range, tb[0].range);
    }
}
