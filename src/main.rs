use basket_lens::cli::Args;
use basket_lens::config::{AppConfig, load_config};
use basket_lens::loader::{CsvLoader, Loader};
use basket_lens::model::{Dataset, LineItem};
use basket_lens::report;
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    // Load configuration from file
    let config = match load_config(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    // Load every configured month into one in-memory snapshot
    let loader = CsvLoader::new(config.columns.clone());
    let mut rows = Vec::new();
    for month in &config.months {
        match loader.load(&month.path, &month.label) {
            Ok(mut loaded) => {
                info!(
                    "Loaded {} rows from {} ({})",
                    loaded.len(),
                    month.path,
                    month.label
                );
                rows.append(&mut loaded);
            }
            Err(e) => warn!("Skipping {}: {}", month.path, e),
        }
    }

    let dataset = Dataset::new(rows);
    if dataset.is_empty() {
        error!("No analyzable data loaded; nothing to report");
        return;
    }

    match args.month.as_deref() {
        Some(label) => render_selection(&dataset, &config, label),
        None => run_prompt(&dataset, &config),
    }
}

/// Recomputes and renders the report for one selection. Every call
/// reads the immutable snapshot from scratch; nothing is cached.
fn render_selection(dataset: &Dataset, config: &AppConfig, input: &str) {
    match resolve_selection(dataset, config, input) {
        Some((label, rows)) => report::render(&label, &rows, config),
        None => {
            warn!("Unknown month: {}", input);
            print_menu(config);
        }
    }
}

/// Prints the raw transaction table for one selection.
fn show_rows(dataset: &Dataset, config: &AppConfig, input: &str) {
    match resolve_selection(dataset, config, input) {
        Some((label, rows)) => report::render_rows(&label, &rows),
        None => {
            warn!("Unknown month: {}", input);
            print_menu(config);
        }
    }
}

fn resolve_selection(
    dataset: &Dataset,
    config: &AppConfig,
    input: &str,
) -> Option<(String, Vec<LineItem>)> {
    if input.eq_ignore_ascii_case("all") {
        return Some(("All".to_string(), dataset.select(None)));
    }
    let label = resolve_label(config, input)?;
    let rows = dataset.select(Some(&label));
    Some((label, rows))
}

fn resolve_label(config: &AppConfig, input: &str) -> Option<String> {
    config
        .months
        .iter()
        .map(|m| &m.label)
        .find(|label| label.eq_ignore_ascii_case(input))
        .cloned()
}

/// Interactive month prompt, one full recomputation per selection.
fn run_prompt(dataset: &Dataset, config: &AppConfig) {
    print_menu(config);
    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if !handle_command(dataset, config, input) {
            break;
        }
    }
    info!("Bye.");
}

/// Handles one prompt line; returns false to leave the loop.
fn handle_command(dataset: &Dataset, config: &AppConfig, input: &str) -> bool {
    match input {
        "q" | "quit" | "exit" => return false,
        "help" => print_help(),
        "months" => print_menu(config),
        "rows" => show_rows(dataset, config, "all"),
        other => match other.strip_prefix("rows ") {
            Some(label) => show_rows(dataset, config, label.trim()),
            None => render_selection(dataset, config, other),
        },
    }
    true
}

fn print_menu(config: &AppConfig) {
    println!("Available months:");
    println!("  all");
    for month in &config.months {
        println!("  {}", month.label);
    }
    println!("Type a month label to render its report ('help' for commands).");
}

fn print_help() {
    println!(
        "Commands:\n  \
         <month label> — render the report for that month\n  \
         all           — render the report over every month\n  \
         rows [month]  — show the raw transactions for a month (default: all)\n  \
         months        — list the configured months\n  \
         help          — this list\n  \
         quit          — exit"
    );
}
