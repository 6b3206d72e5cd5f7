//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Monthly transaction viewer: co-purchase combos, revenue and margins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json")]
    pub config: String,

    /// Render one month ("all" for every month) and exit instead of prompting
    #[arg(short, long)]
    pub month: Option<String>,
}
