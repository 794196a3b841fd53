pub mod cli;
pub mod export;
pub mod host;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
pub mod util;
