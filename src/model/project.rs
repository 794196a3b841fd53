use serde::Serialize;

use crate::parse::grammar;

/// A project header line (`Name:`). Carries no tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    pub indent_level: usize,
    pub line_number: usize,
}

impl Project {
    pub fn from_line(line_number: usize, raw: &str) -> Option<Project> {
        let (indent, name) = grammar::project_parts(raw)?;
        Some(Project {
            name: name.to_string(),
            indent_level: grammar::indent_level(indent),
            line_number,
        })
    }
}
