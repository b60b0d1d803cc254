use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

use menu_content::cli::{Cli, Command};
use menu_content::commands;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    menu_content::logging::init().context("init logging")?;

    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    let config = commands::load_config(&cli.config).context("config")?;

    match cli.command {
        Command::Slugify(args) => commands::slugify(args).context("slugify")?,
        Command::StripJsonLd(args) => commands::strip_json_ld(args).context("strip-json-ld")?,
        Command::InjectIds(args) => commands::inject_ids(args, &config).context("inject-ids")?,
        Command::Toc(args) => commands::toc(args).context("toc")?,
        Command::Process(args) => commands::process(args, &config).context("process")?,
        Command::Responsive(args) => commands::responsive(args, &config).context("responsive")?,
        Command::Render(args) => commands::render(args, &config).context("render")?,
    }

    Ok(())
}
