use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lingo")]
#[command(about = "A rate-limit-friendly command-line text translator.")]
#[command(version)]
pub struct Cli {
    /// Target language code for this run (overrides the saved preference)
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Translate each non-empty line of a file
    #[arg(short = 'b', long)]
    pub batch: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Choose color theme
    #[arg(short = 'T', long)]
    pub theme: Option<String>,

    /// Save the default target language
    #[arg(long, value_name = "CODE")]
    pub set_language: Option<String>,

    /// List supported target languages
    #[arg(long)]
    pub languages: bool,

    /// Show status
    #[arg(long)]
    pub status: bool,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Edit configuration file
    #[arg(long)]
    pub edit_config: bool,

    /// Text to translate
    #[arg(num_args = 0..)]
    pub text: Vec<String>,
}
