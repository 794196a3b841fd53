pub mod config_io;
pub mod fs_host;
