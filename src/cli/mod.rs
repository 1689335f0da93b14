pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, resolve_top_n};
pub(crate) use commands::Commands;
