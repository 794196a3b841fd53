use crate::model::project::Project;
use crate::model::todo::Todo;
use crate::ops::edit_batch::Edit;
use crate::parse::grammar;
use crate::parse::line::{LineKind, classify};

/// The entity owning a given line, when one exists
#[derive(Debug, Clone)]
pub enum Entity {
    Todo(Todo),
    Project(Project),
}

/// The ordered lines of one todo file for the duration of one command.
/// Classification is re-derived from the current text on every query —
/// there is no cache to invalidate, and single-line edits keep line
/// numbers stable across a batch.
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(lines: Vec<String>) -> Document {
        Document { lines }
    }

    pub fn from_text(text: &str) -> Document {
        Document {
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, n: usize) -> Option<&str> {
        self.lines.get(n).map(|l| l.as_str())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// A document is supported when at least one line is a project or todo;
    /// a pure comment (or empty) file is not a todo file.
    pub fn is_supported(&self) -> bool {
        self.lines.iter().any(|l| {
            matches!(
                classify(l),
                LineKind::Project { .. } | LineKind::Todo { .. }
            )
        })
    }

    pub fn classify_line(&self, n: usize) -> Option<LineKind> {
        self.line(n).map(classify)
    }

    /// The todo at line `n`, if that line parses as one. With
    /// `validate = true` the document as a whole must also be supported.
    pub fn get_todo_at(&self, n: usize, validate: bool) -> Option<Todo> {
        if validate && !self.is_supported() {
            return None;
        }
        let raw = self.line(n)?;
        Todo::from_line(n, raw)
    }

    /// The entity (todo or project) owning line `n`
    pub fn get_entity_at(&self, n: usize, validate: bool) -> Option<Entity> {
        if validate && !self.is_supported() {
            return None;
        }
        let raw = self.line(n)?;
        if let Some(todo) = Todo::from_line(n, raw) {
            return Some(Entity::Todo(todo));
        }
        Project::from_line(n, raw).map(Entity::Project)
    }

    /// Enclosing project names for line `n`, outermost first. Walks upward
    /// collecting each project line at a strictly shallower indent.
    pub fn project_path_for(&self, n: usize) -> Vec<String> {
        let Some(raw) = self.line(n) else {
            return Vec::new();
        };
        let mut limit = line_indent_level(raw);
        let mut path = Vec::new();
        for i in (0..n).rev() {
            if let Some(LineKind::Project { name, indent_level }) = self.classify_line(i)
                && indent_level < limit
            {
                path.push(name);
                limit = indent_level;
                if limit == 0 {
                    break;
                }
            }
        }
        path.reverse();
        path
    }

    /// Apply single-line replacements. Out-of-range edits are ignored;
    /// callers collect edits against this same document so they never are.
    pub fn apply(&mut self, edits: &[Edit]) {
        for edit in edits {
            if let Some(slot) = self.lines.get_mut(edit.line_number) {
                *slot = edit.new_text.clone();
            }
        }
    }
}

fn line_indent_level(raw: &str) -> usize {
    let indent: String = raw.chars().take_while(|c| c.is_whitespace()).collect();
    grammar::indent_level(&indent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::todo::StatusMark;

    fn doc(text: &str) -> Document {
        Document::from_text(text)
    }

    const SAMPLE: &str = "\
Errands:
  ☐ Buy milk @created(2024-01-01 10:00)
  ✔ Mail letter @finished(2024-01-02 09:00)
  Some note about errands
Home:
  Garage:
    ☐ Sort tools
";

    #[test]
    fn test_is_supported() {
        assert!(doc(SAMPLE).is_supported());
        assert!(!doc("just a comment\nanother comment").is_supported());
        assert!(!doc("").is_supported());
    }

    #[test]
    fn test_get_todo_at() {
        let d = doc(SAMPLE);
        let todo = d.get_todo_at(1, false).unwrap();
        assert_eq!(todo.status(), StatusMark::Open);
        assert_eq!(todo.text(), "Buy milk");

        assert!(d.get_todo_at(0, false).is_none()); // project
        assert!(d.get_todo_at(3, false).is_none()); // comment
        assert!(d.get_todo_at(99, false).is_none());
    }

    #[test]
    fn test_get_todo_at_validate_requires_supported_document() {
        // The line itself would parse, but the document is not a todo file
        let d = doc("only a comment");
        assert!(d.get_todo_at(0, true).is_none());

        let d = doc(SAMPLE);
        assert!(d.get_todo_at(1, true).is_some());
    }

    #[test]
    fn test_get_entity_at() {
        let d = doc(SAMPLE);
        match d.get_entity_at(0, false) {
            Some(Entity::Project(p)) => assert_eq!(p.name, "Errands"),
            other => panic!("expected project, got {:?}", other),
        }
        match d.get_entity_at(6, false) {
            Some(Entity::Todo(t)) => assert_eq!(t.text(), "Sort tools"),
            other => panic!("expected todo, got {:?}", other),
        }
        assert!(d.get_entity_at(3, false).is_none());
    }

    #[test]
    fn test_project_path_for_nested() {
        let d = doc(SAMPLE);
        assert_eq!(d.project_path_for(6), vec!["Home", "Garage"]);
        assert_eq!(d.project_path_for(1), vec!["Errands"]);
        assert_eq!(d.project_path_for(0), Vec::<String>::new());
    }

    #[test]
    fn test_apply_replaces_single_lines() {
        let mut d = doc(SAMPLE);
        d.apply(&[Edit {
            line_number: 1,
            new_text: "  ✔ Buy milk @finished(2024-01-03 08:00)".to_string(),
        }]);
        assert_eq!(d.line(1).unwrap(), "  ✔ Buy milk @finished(2024-01-03 08:00)");
        // neighbours untouched
        assert_eq!(d.line(0).unwrap(), "Errands:");
        assert_eq!(d.line(2).unwrap(), "  ✔ Mail letter @finished(2024-01-02 09:00)");
    }

    #[test]
    fn test_classification_stable_across_repeated_queries() {
        let d = doc(SAMPLE);
        let first = d.classify_line(1);
        let second = d.classify_line(1);
        assert_eq!(first, second);
    }
}
