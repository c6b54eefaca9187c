use anyhow::Result;
use clap::Parser;

use openrchat::cli::Args;
use openrchat::cli::commands::chat;
use openrchat::error::StartupError;
use openrchat::output::{self, OutputConfig};
use openrchat::ui::Style;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    output::init_tracing();

    let options = chat::ChatOptions::from(&args);
    if let Err(e) = chat::run_chat(options).await {
        if let Some(startup) = e.downcast_ref::<StartupError>() {
            eprintln!("{} {startup}", Style::error("Error:"));
            output::flush();
            std::process::exit(startup.exit_code());
        }
        return Err(e);
    }

    Ok(())
}
