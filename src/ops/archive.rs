use crate::model::document::Document;
use crate::model::todo::StatusMark;
use crate::parse::line::LineKind;

const ARCHIVE_NAME: &str = "Archive";
const ARCHIVE_INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOutcome {
    pub lines: Vec<String>,
    pub moved: usize,
}

/// Move every done/cancelled todo under a trailing `Archive:` project.
/// Archived entries are re-indented to one level and annotated with a
/// `@project(A / B)` breadcrumb of their enclosing projects. Newly archived
/// entries go to the top of the archive section. Returns the new line set,
/// or None when there is nothing to archive.
pub fn archive(doc: &Document) -> Option<ArchiveOutcome> {
    let mut to_move = Vec::new();
    for n in 0..doc.line_count() {
        let Some(LineKind::Todo { status, .. }) = doc.classify_line(n) else {
            continue;
        };
        if status == StatusMark::Open {
            continue;
        }
        let path = doc.project_path_for(n);
        // Items already in the archive stay where they are
        if path.first().map(|p| p.as_str()) == Some(ARCHIVE_NAME) {
            continue;
        }
        let raw = doc.line(n).unwrap_or_default();
        to_move.push((n, archived_entry(raw, &path)));
    }

    if to_move.is_empty() {
        return None;
    }

    let mut lines: Vec<String> = doc.lines().to_vec();
    for (n, _) in to_move.iter().rev() {
        lines.remove(*n);
    }

    let entries: Vec<String> = to_move.into_iter().map(|(_, e)| e).collect();
    let moved = entries.len();
    match archive_header_index(&lines) {
        Some(idx) => {
            for (offset, entry) in entries.into_iter().enumerate() {
                lines.insert(idx + 1 + offset, entry);
            }
        }
        None => {
            if lines.last().is_some_and(|l| !l.trim().is_empty()) {
                lines.push(String::new());
            }
            lines.push(format!("{}:", ARCHIVE_NAME));
            lines.extend(entries);
        }
    }
    Some(ArchiveOutcome { lines, moved })
}

fn archived_entry(raw: &str, path: &[String]) -> String {
    let mut entry = format!("{}{}", ARCHIVE_INDENT, raw.trim_start());
    if !path.is_empty() {
        entry.push_str(&format!(" @project({})", path.join(" / ")));
    }
    entry
}

fn archive_header_index(lines: &[String]) -> Option<usize> {
    lines.iter().position(|l| {
        matches!(
            crate::parse::line::classify(l),
            LineKind::Project { name, indent_level: 0 } if name == ARCHIVE_NAME
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(text: &str) -> Document {
        Document::from_text(text)
    }

    #[test]
    fn test_archive_moves_done_and_cancelled() {
        let d = doc("Errands:\n  ☐ Buy milk\n  ✔ Mail letter @finished(2024-01-02 09:00)\n  ✘ Call Bob @finished(2024-01-02 10:00)");
        let out = archive(&d).unwrap();
        assert_eq!(out.moved, 2);
        assert_eq!(
            out.lines,
            vec![
                "Errands:",
                "  ☐ Buy milk",
                "",
                "Archive:",
                "  ✔ Mail letter @finished(2024-01-02 09:00) @project(Errands)",
                "  ✘ Call Bob @finished(2024-01-02 10:00) @project(Errands)",
            ]
        );
    }

    #[test]
    fn test_archive_breadcrumb_nests_projects() {
        let d = doc("Home:\n  Garage:\n    ✔ Sort tools @finished(2024-01-02 09:00)");
        let out = archive(&d).unwrap();
        assert_eq!(
            out.lines.last().unwrap(),
            "  ✔ Sort tools @finished(2024-01-02 09:00) @project(Home / Garage)"
        );
    }

    #[test]
    fn test_archive_inserts_at_top_of_existing_section() {
        let d = doc("Errands:\n  ✔ New @finished(2024-01-03 09:00)\n\nArchive:\n  ✔ Old @finished(2024-01-01 09:00) @project(Errands)");
        let out = archive(&d).unwrap();
        assert_eq!(out.moved, 1);
        assert_eq!(
            out.lines,
            vec![
                "Errands:",
                "",
                "Archive:",
                "  ✔ New @finished(2024-01-03 09:00) @project(Errands)",
                "  ✔ Old @finished(2024-01-01 09:00) @project(Errands)",
            ]
        );
    }

    #[test]
    fn test_archive_with_nothing_to_move() {
        let d = doc("Errands:\n  ☐ Buy milk");
        assert!(archive(&d).is_none());

        // already-archived items are not re-archived
        let d = doc("Archive:\n  ✔ Old @finished(2024-01-01 09:00) @project(Errands)");
        assert!(archive(&d).is_none());
    }

    #[test]
    fn test_archive_todo_outside_any_project() {
        let d = doc("✔ stray done item @finished(2024-01-01 09:00)\n☐ keep me");
        let out = archive(&d).unwrap();
        assert_eq!(
            out.lines,
            vec![
                "☐ keep me",
                "",
                "Archive:",
                "  ✔ stray done item @finished(2024-01-01 09:00)",
            ]
        );
    }
}
