pub mod config;
pub mod document;
pub mod project;
pub mod todo;

pub use config::*;
pub use document::*;
pub use project::*;
pub use todo::*;
