use serde::Serialize;

use crate::parse::grammar::TAG_SYMBOL;

/// One pending single-line replacement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub line_number: usize,
    pub new_text: String,
}

/// A selected range of lines, with the caret column of the selection start
/// (used only by the caret-repositioning heuristic)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_line: usize,
    pub end_line: usize,
    pub start_col: usize,
}

impl Selection {
    pub fn line(n: usize) -> Selection {
        Selection {
            start_line: n,
            end_line: n,
            start_col: 0,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = usize> {
        self.start_line..=self.end_line
    }
}

/// Suggested caret position after a batch applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Caret {
    pub line: usize,
    pub col: usize,
}

/// Collects per-line edits from one or more transitions into one atomic
/// batch. No-op edits are dropped; a line is never edited twice in one
/// command invocation (the first edit wins).
#[derive(Debug, Default)]
pub struct EditBatch {
    edits: Vec<Edit>,
}

impl EditBatch {
    pub fn new() -> EditBatch {
        EditBatch::default()
    }

    pub fn push(&mut self, edit: Edit, old_text: &str) {
        if edit.new_text == old_text {
            return;
        }
        if self.edits.iter().any(|e| e.line_number == edit.line_number) {
            return;
        }
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn into_edits(self) -> Vec<Edit> {
        self.edits
    }
}

/// For each selection whose caret sat at end-of-line on a line that had no
/// tag before the batch, suggest moving the caret to the first tag the
/// batch inserted on that line (so the cursor lands just before the new
/// tag rather than at the old end-of-line). Columns are char offsets.
pub fn caret_suggestions(
    selections: &[Selection],
    old_lines: &[String],
    edits: &[Edit],
) -> Vec<Option<Caret>> {
    selections
        .iter()
        .map(|sel| {
            let old = old_lines.get(sel.start_line)?;
            if old.contains(TAG_SYMBOL) {
                return None;
            }
            if sel.start_col != old.chars().count() {
                return None;
            }
            let edit = edits.iter().find(|e| e.line_number == sel.start_line)?;
            let byte_idx = edit.new_text.find(TAG_SYMBOL)?;
            Some(Caret {
                line: sel.start_line,
                col: edit.new_text[..byte_idx].chars().count(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drops_noops_and_duplicates() {
        let mut batch = EditBatch::new();
        batch.push(
            Edit {
                line_number: 1,
                new_text: "☐ same".into(),
            },
            "☐ same",
        );
        assert!(batch.is_empty());

        batch.push(
            Edit {
                line_number: 1,
                new_text: "✔ first".into(),
            },
            "☐ first",
        );
        batch.push(
            Edit {
                line_number: 1,
                new_text: "✔ second".into(),
            },
            "☐ first",
        );
        let edits = batch.into_edits();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].new_text, "✔ first");
    }

    #[test]
    fn test_caret_moves_to_first_inserted_tag() {
        let old_lines = vec!["☐ Buy milk".to_string()];
        let sel = Selection {
            start_line: 0,
            end_line: 0,
            start_col: "☐ Buy milk".chars().count(),
        };
        let edits = vec![Edit {
            line_number: 0,
            new_text: "✔ Buy milk @finished(2024-01-01 10:00)".to_string(),
        }];
        let carets = caret_suggestions(&[sel], &old_lines, &edits);
        assert_eq!(
            carets,
            vec![Some(Caret {
                line: 0,
                col: "✔ Buy milk ".chars().count()
            })]
        );
    }

    #[test]
    fn test_caret_untouched_when_line_already_tagged() {
        let old_lines = vec!["☐ Buy milk @est(1h)".to_string()];
        let sel = Selection {
            start_line: 0,
            end_line: 0,
            start_col: old_lines[0].chars().count(),
        };
        let edits = vec![Edit {
            line_number: 0,
            new_text: "✔ Buy milk @est(1h) @finished(2024-01-01 10:00)".to_string(),
        }];
        assert_eq!(caret_suggestions(&[sel], &old_lines, &edits), vec![None]);
    }

    #[test]
    fn test_caret_untouched_when_not_at_end_of_line() {
        let old_lines = vec!["☐ Buy milk".to_string()];
        let sel = Selection {
            start_line: 0,
            end_line: 0,
            start_col: 2,
        };
        let edits = vec![Edit {
            line_number: 0,
            new_text: "✔ Buy milk @finished(2024-01-01 10:00)".to_string(),
        }];
        assert_eq!(caret_suggestions(&[sel], &old_lines, &edits), vec![None]);
    }

    #[test]
    fn test_caret_none_without_matching_edit() {
        let old_lines = vec!["☐ Buy milk".to_string()];
        let sel = Selection {
            start_line: 0,
            end_line: 0,
            start_col: old_lines[0].chars().count(),
        };
        assert_eq!(caret_suggestions(&[sel], &old_lines, &[]), vec![None]);
    }
}
