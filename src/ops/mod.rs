pub mod archive;
pub mod commands;
pub mod edit_batch;
