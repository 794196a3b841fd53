use chrono::NaiveDateTime;
use serde::Serialize;

use crate::host::{EditSink, HostError, Notification, NotificationSink, TextSource};
use crate::model::document::Document;
use crate::model::todo::Todo;
use crate::ops::edit_batch::{Caret, Edit, EditBatch, Selection, caret_suggestions};

/// The state transitions a command can run over the selected todos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    Box,
    Done,
    Cancelled,
    Start,
}

impl Transition {
    /// Start additionally requires the whole document to validate as a
    /// todo file before its entity lookup succeeds
    fn check_validity(self) -> bool {
        matches!(self, Transition::Start)
    }

    fn invalid_message(self) -> &'static str {
        match self {
            Transition::Start => "Only todos can be started",
            _ => "Only todos can perform this action",
        }
    }

    fn filtered_message(self) -> &'static str {
        match self {
            Transition::Start => "Only not done/cancelled todos can be started",
            _ => "This todo cannot perform this action",
        }
    }

    /// Precondition applied after the todos parse; entities failing it are
    /// dropped from the batch with a distinct notification
    fn admits(self, todo: &Todo) -> bool {
        match self {
            Transition::Start => todo.is_box(),
            _ => true,
        }
    }

    fn apply(self, todo: &mut Todo, now: NaiveDateTime) {
        match self {
            Transition::Box => todo.toggle_box(now),
            Transition::Done => todo.toggle_done(now),
            Transition::Cancelled => todo.toggle_cancelled(now),
            Transition::Start => todo.toggle_start(now),
        }
    }
}

/// Everything one transition command produced: the atomic edit batch,
/// per-selection caret suggestions, and the user-facing notifications.
#[derive(Debug, Default)]
pub struct TransitionOutcome {
    pub edits: Vec<Edit>,
    pub carets: Vec<Option<Caret>>,
    pub notifications: Vec<Notification>,
}

/// Run a transition over the selected lines of a document.
///
/// Failure semantics: an unsupported document aborts with one error; lines
/// that don't parse as todos are dropped with one combined "invalid"
/// message; todos failing the transition's precondition are dropped with a
/// distinct "filtered" message; an empty remainder exits quietly. One bad
/// line never blocks the valid lines in the same batch.
pub fn run_transition(
    doc: &Document,
    selections: &[Selection],
    transition: Transition,
    now: NaiveDateTime,
) -> TransitionOutcome {
    let mut outcome = TransitionOutcome::default();

    if !doc.is_supported() {
        outcome
            .notifications
            .push(Notification::error("This is not a todo file"));
        return outcome;
    }

    let lines = selected_lines(selections);
    let todos: Vec<Todo> = lines
        .iter()
        .filter_map(|&n| doc.get_todo_at(n, transition.check_validity()))
        .collect();

    if todos.len() != lines.len() {
        outcome
            .notifications
            .push(Notification::error(transition.invalid_message()));
    }
    if todos.is_empty() {
        return outcome;
    }

    let admitted: Vec<Todo> = todos
        .iter()
        .filter(|t| transition.admits(t))
        .cloned()
        .collect();
    if admitted.len() != todos.len() {
        outcome
            .notifications
            .push(Notification::error(transition.filtered_message()));
    }
    if admitted.is_empty() {
        return outcome;
    }

    let mut batch = EditBatch::new();
    for mut todo in admitted {
        let old = doc.line(todo.line_number()).unwrap_or_default().to_string();
        transition.apply(&mut todo, now);
        if let Some(edit) = todo.make_edit() {
            batch.push(edit, &old);
        }
    }

    outcome.edits = batch.into_edits();
    if !outcome.edits.is_empty() {
        outcome.carets = caret_suggestions(selections, doc.lines(), &outcome.edits);
    }
    outcome
}

/// Unique selected line numbers in selection order
fn selected_lines(selections: &[Selection]) -> Vec<usize> {
    let mut lines = Vec::new();
    for sel in selections {
        for n in sel.lines() {
            if !lines.contains(&n) {
                lines.push(n);
            }
        }
    }
    lines
}

/// Run a transition against a host: read its lines and selections, report
/// notifications as they surface, and apply the resulting batch atomically.
pub fn call_todos<H: TextSource + EditSink>(
    host: &mut H,
    notifier: &mut impl NotificationSink,
    transition: Transition,
    now: NaiveDateTime,
) -> Result<TransitionOutcome, HostError> {
    let doc = Document::new(host.lines().to_vec());
    let selections = host.selections();
    let outcome = run_transition(&doc, &selections, transition, now);

    for n in &outcome.notifications {
        notifier.notify(n.severity, &n.message);
    }
    if !outcome.edits.is_empty() {
        host.apply(&outcome.edits, &outcome.carets)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Severity;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn doc(text: &str) -> Document {
        Document::from_text(text)
    }

    #[test]
    fn test_unsupported_document_aborts_with_one_error() {
        let d = doc("free text\nmore free text");
        let out = run_transition(&d, &[Selection::line(0)], Transition::Done, noon());
        assert!(out.edits.is_empty());
        assert_eq!(out.notifications.len(), 1);
        assert_eq!(out.notifications[0].severity, Severity::Error);
    }

    #[test]
    fn test_mixed_selection_produces_one_edit_and_one_combined_message() {
        // Project line, well-formed todo, plain text: exactly one edit,
        // invalid lines collapse into a single notification.
        let d = doc("Errands:\n  ☐ Buy milk\nremember the coupons");
        let sels = [Selection {
            start_line: 0,
            end_line: 2,
            start_col: 0,
        }];
        let out = run_transition(&d, &sels, Transition::Done, noon());

        assert_eq!(out.edits.len(), 1);
        assert_eq!(out.edits[0].line_number, 1);
        assert_eq!(
            out.edits[0].new_text,
            "  ✔ Buy milk @finished(2024-01-01 12:00)"
        );
        assert_eq!(out.notifications.len(), 1);
        assert_eq!(
            out.notifications[0].message,
            "Only todos can perform this action"
        );
    }

    #[test]
    fn test_start_filters_done_todos_with_distinct_message() {
        let d = doc("Work:\n  ☐ Draft email\n  ✔ Old task @finished(2024-01-01 09:00)");
        let sels = [Selection {
            start_line: 1,
            end_line: 2,
            start_col: 0,
        }];
        let out = run_transition(&d, &sels, Transition::Start, noon());

        assert_eq!(out.edits.len(), 1);
        assert_eq!(
            out.edits[0].new_text,
            "  ☐ Draft email @started(2024-01-01 12:00)"
        );
        assert_eq!(out.notifications.len(), 1);
        assert_eq!(
            out.notifications[0].message,
            "Only not done/cancelled todos can be started"
        );
    }

    #[test]
    fn test_nothing_left_after_filtering_exits_quietly() {
        let d = doc("Work:\n  ✔ Old task @finished(2024-01-01 09:00)");
        let out = run_transition(&d, &[Selection::line(1)], Transition::Start, noon());
        assert!(out.edits.is_empty());
        // already reported as filtered; no extra "empty" notification
        assert_eq!(out.notifications.len(), 1);
    }

    #[test]
    fn test_overlapping_selections_touch_each_line_once() {
        let d = doc("Errands:\n  ☐ Buy milk");
        let sels = [
            Selection {
                start_line: 1,
                end_line: 1,
                start_col: 0,
            },
            Selection {
                start_line: 1,
                end_line: 1,
                start_col: 3,
            },
        ];
        let out = run_transition(&d, &sels, Transition::Box, noon());
        assert_eq!(out.edits.len(), 1);
    }

    #[test]
    fn test_toggle_box_on_multiple_lines() {
        let d = doc("Errands:\n  ☐ Buy milk\n  ☐ Walk dog");
        let sels = [Selection {
            start_line: 1,
            end_line: 2,
            start_col: 0,
        }];
        let out = run_transition(&d, &sels, Transition::Box, noon());
        assert_eq!(out.edits.len(), 2);
        assert!(out.notifications.is_empty());
        assert_eq!(out.carets.len(), 1);
    }
}
