pub mod grammar;
pub mod line;

pub use line::{LineKind, TagSpan, classify, extract_tags, find_tag};
