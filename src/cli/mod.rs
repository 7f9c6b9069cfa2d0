mod args;
mod commands;
mod config_cmd;
mod form;
mod providers;
mod setup;
mod util;

pub use args::Cli;
