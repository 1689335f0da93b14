mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod extract;
mod output;
mod utils;

use clap::Parser;

use app::CommandContext;
use cli::Cli;
use config::Config;
use crate::core::{DateFilter, default_store_path};
use error::AppError;
use output::{DisplayOptions, NumberFormat};
use utils::{parse_date, set_parse_debug};

fn build_context<'a>(cli: &'a Cli, config: &'a Config) -> Result<CommandContext<'a>, AppError> {
    let since = cli.since.as_deref().map(parse_date).transpose()?;
    let until = cli.until.as_deref().map(parse_date).transpose()?;
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let store_path = match &cli.store {
        Some(path) => path.clone(),
        None => default_store_path().ok_or(AppError::NoStorePath)?,
    };

    Ok(CommandContext {
        cli,
        config,
        store_path,
        filter: DateFilter::new(since, until),
        display: DisplayOptions {
            use_color: cli.use_color(),
            number_format,
        },
    })
}

fn main() {
    let cli = Cli::parse();

    let config = if cli.is_quiet() {
        Config::load_quiet()
    } else {
        Config::load()
    };
    let cli = cli.with_config(&config);
    set_parse_debug(cli.debug);

    let result = build_context(&cli, &config).and_then(|ctx| app::run(&ctx));
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
