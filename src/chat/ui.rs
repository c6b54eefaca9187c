//! Chat mode UI components.

use crate::completion::CompletionError;
use crate::ui::Style;

use super::command::SLASH_COMMANDS;
use super::controller::{CatalogUpdate, StatusSnapshot};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(title: &str, model: &str) {
    println!(
        "{} {} - {}",
        Style::header("openrchat"),
        Style::version(format!("v{VERSION}")),
        title
    );
    println!(
        "{} {}",
        Style::label("model"),
        Style::value(model)
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_system_prompt(prompt: &str) {
    println!("{} {}", Style::system("SYSTEM:"), Style::secondary(prompt));
    println!();
}

pub fn print_reset(prompt: &str) {
    println!("{} Chat context cleared.", Style::system("SYSTEM:"));
    print_system_prompt(prompt);
}

pub fn print_reply(reply: &str) {
    println!("{}", Style::assistant("Assistant:"));
    println!("{reply}");
    println!();
}

pub fn print_request_failure(error: &CompletionError) {
    match error.hint() {
        Some(hint) => {
            eprintln!("{} {error}", Style::error("Error:"));
            eprintln!("{}", Style::hint(hint));
            eprintln!();
        }
        None => print_error(&error.to_string()),
    }
}

pub fn print_model_switched(model: &str, catalog: &CatalogUpdate) {
    println!(
        "{} Model switched to {}",
        Style::success("✓"),
        Style::value(model)
    );
    match catalog {
        CatalogUpdate::Known => {}
        CatalogUpdate::Added => println!("  {}", Style::secondary("Added to the model list")),
        CatalogUpdate::Unsaved(reason) => {
            print_error(&format!("Could not save the model list: {reason}"));
        }
    }
    println!();
}

pub fn print_status(status: &StatusSnapshot) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}        {}",
        Style::label("model"),
        Style::value(&status.model)
    );
    println!(
        "  {}  {}",
        Style::label("temperature"),
        Style::value(status.temperature)
    );
    println!(
        "  {}        {}",
        Style::label("turns"),
        Style::value(status.user_turns)
    );
    println!(
        "  {}       {}",
        Style::label("models"),
        Style::secondary(format!("{} known", status.catalog_size))
    );
    if status.busy {
        println!("  {}", Style::warning("waiting for a reply"));
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let width = SLASH_COMMANDS
        .iter()
        .map(|(cmd, _)| cmd.len())
        .max()
        .unwrap_or(0);
    for (cmd, desc) in SLASH_COMMANDS {
        println!(
            "  {}{}  {}",
            Style::command(cmd),
            " ".repeat(width - cmd.len()),
            Style::secondary(desc)
        );
    }
    println!(
        "  {}",
        Style::hint("/save takes an optional file name; the default is timestamped.")
    );
    println!();
}

pub fn print_notice(message: &str) {
    println!("{} {message}", Style::system("SYSTEM:"));
    println!();
}

pub fn print_warning(message: &str) {
    eprintln!("{} {message}", Style::warning("Warning:"));
    eprintln!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
