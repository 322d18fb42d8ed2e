mod commands;
mod render;
mod setup;
mod shell;
mod worker;

pub use commands::run;
