mod bootstrap;
mod cli;
mod config;
mod gameplay;
mod loop_runner;

pub(crate) use bootstrap::{build_app, BootstrapError, Startup};
pub(crate) use cli::usage_text;
pub(crate) use loop_runner::run;
