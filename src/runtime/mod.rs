use clap::Parser;
use tracing::warn;

mod cli;
mod commands;
mod logging;
mod settings;

use cli::{Cli, Command};
use commands::Context;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (settings, load_error) = settings::load_settings();

    logging::init(&settings.log);
    if let Some(e) = load_error {
        // Config is optional; failures should not prevent the tool from running.
        warn!("{e}; using defaults");
    }

    let cx = Context::new(settings, cli.timeout);
    match cli.command {
        Command::Inspect { files } => commands::inspect::run(&cx, &files),
        Command::Normalize { dir, apply } => commands::normalize::run(&cx, &dir, apply),
        Command::Tag {
            dir,
            apply,
            no_prompt,
        } => commands::tag::run(&cx, &dir, apply, no_prompt),
        Command::Organize { dir, apply } => commands::organize::run(&cx, &dir, apply),
        Command::Audit { root, report } => commands::audit::run(&cx, &root, report.as_deref()),
        Command::Confirm { album_dirs } => commands::audit::confirm(&cx, &album_dirs),
        Command::Clear { root } => commands::audit::clear(&cx, &root),
    }
}
