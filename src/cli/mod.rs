pub mod core;
pub mod io;
pub mod output;
mod shell;

pub use shell::run_cli;
