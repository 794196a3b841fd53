use serde::Serialize;

use crate::host::{Notification, Severity};
use crate::ops::commands::{Transition, TransitionOutcome};
use crate::ops::edit_batch::{Caret, Edit};

// ---------------------------------------------------------------------------
// JSON output structs (line numbers are 1-based, matching --lines input)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct EditJson {
    pub line: usize,
    pub text: String,
}

impl From<&Edit> for EditJson {
    fn from(e: &Edit) -> EditJson {
        EditJson {
            line: e.line_number + 1,
            text: e.new_text.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct CaretJson {
    pub line: usize,
    pub col: usize,
}

impl From<&Caret> for CaretJson {
    fn from(c: &Caret) -> CaretJson {
        CaretJson {
            line: c.line + 1,
            col: c.col,
        }
    }
}

#[derive(Serialize)]
pub struct NotificationJson {
    pub severity: Severity,
    pub message: String,
}

impl From<&Notification> for NotificationJson {
    fn from(n: &Notification) -> NotificationJson {
        NotificationJson {
            severity: n.severity,
            message: n.message.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct TransitionReportJson {
    pub transition: Transition,
    pub edits: Vec<EditJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub carets: Vec<Option<CaretJson>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<NotificationJson>,
}

impl TransitionReportJson {
    pub fn new(transition: Transition, outcome: &TransitionOutcome) -> TransitionReportJson {
        TransitionReportJson {
            transition,
            edits: outcome.edits.iter().map(EditJson::from).collect(),
            carets: outcome
                .carets
                .iter()
                .map(|c| c.as_ref().map(CaretJson::from))
                .collect(),
            notifications: outcome
                .notifications
                .iter()
                .map(NotificationJson::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
pub struct ArchiveReportJson {
    pub moved: usize,
}

#[derive(Serialize)]
pub struct TimerReportJson {
    pub timer: bool,
}
