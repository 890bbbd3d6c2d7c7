// Main entry point
use clap::Parser;
use colored::Colorize;
use lingo::application::translate;
use lingo::domain::model::{language_name, TranslationOrigin, TranslationReport, SUPPORTED_LANGUAGES};
use lingo::infrastructure::config;
use lingo::infrastructure::storage::prefs;
use lingo::interfaces::cli::Cli;
use lingo::presentation::theme::Theme;
use lingo::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn signal handler task
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            eprintln!("\nInterrupted, shutting down...");
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = config::load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Maintenance flags that need no state
    if cli.generate_config {
        config::generate_config_sample()?;
        return Ok(());
    }
    if cli.edit_config {
        if let Some(config_path) = config::get_config_path() {
            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            let config_path_clone = config_path.clone();
            // Run editor in blocking task
            tokio::task::spawn_blocking(move || {
                std::process::Command::new(editor)
                    .arg(&config_path_clone)
                    .status()
            })
            .await??;
        } else {
            eprintln!("{}", "Config file not found".red());
        }
        return Ok(());
    }

    // Setup preference database path (from config or default)
    let db_path = config::get_database_path(&config);
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Initialize AppState
    let db = prefs::init_database(&db_path).await?;
    let state = AppState::new(db, config.clone()).await?;

    // Handle commands (flags)
    if let Some(code) = cli.set_language.as_deref() {
        state.service.set_language(code).await?;
        let name = language_name(code).unwrap_or(code);
        println!("Default target language set to {} ({})", name, code);
        return Ok(());
    }
    if cli.languages {
        print_languages(&state);
        return Ok(());
    }
    if cli.status {
        print_status(&state).await;
        return Ok(());
    }

    // Load theme
    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);

    // Batch file mode
    if let Some(path) = &cli.batch {
        // Use select! so a long paced batch can be interrupted
        tokio::select! {
            result = translate::translate_file(&state, path, cli.lang.as_deref(), !cli.json) => {
                let reports = result?;
                if cli.json {
                    println!("{}", serde_json::to_string_pretty(&reports)?);
                } else {
                    print!("{}", format_batch(&reports, &theme, config.enable_emoji));
                }
            }
            _ = shutdown_rx => {
                eprintln!("Batch translation interrupted");
                return Ok(());
            }
        }
        return Ok(());
    }

    // Handle single text
    if cli.text.is_empty() {
        eprintln!("{}", "Please provide text to translate".red());
        std::process::exit(1);
    }

    let text = cli.text.join(" ");
    let report = translate::translate_text(&state, &text, cli.lang.as_deref()).await?;

    // Output result
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report, &theme, config.enable_emoji));
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn origin_indicator(origin: &TranslationOrigin, enable_emoji: bool) -> &'static str {
    match origin {
        TranslationOrigin::LocalCache => {
            if enable_emoji {
                "💾 [cached]"
            } else {
                "[cached]"
            }
        }
        TranslationOrigin::Online => {
            if enable_emoji {
                "🌐 [online]"
            } else {
                "[online]"
            }
        }
        TranslationOrigin::Passthrough => {
            if enable_emoji {
                "📄 [as-is]"
            } else {
                "[as-is]"
            }
        }
    }
}

/// Format a single translation as string (shared by single and batch output)
fn format_report(report: &TranslationReport, theme: &Theme, enable_emoji: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    let lang_tag = format!("[{}]", report.language);

    writeln!(output, "{}", (theme.source)(&report.source_text)).ok();
    let prefix = if enable_emoji { "→" } else { ">" };
    writeln!(
        output,
        "  {} {}  {} {}",
        prefix,
        (theme.translated)(&report.translated_text),
        (theme.lang)(&lang_tag),
        origin_indicator(&report.origin, enable_emoji).cyan()
    )
    .ok();

    if !report.changed && report.origin != TranslationOrigin::Passthrough {
        writeln!(
            output,
            "  {}",
            (theme.hint)("(provider returned the text unchanged)")
        )
        .ok();
    }

    output
}

fn format_batch(reports: &[TranslationReport], theme: &Theme, enable_emoji: bool) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    let cutoff = "⸺".repeat(40);
    writeln!(output, "{}", (theme.line)(&cutoff)).ok();

    for (i, report) in reports.iter().enumerate() {
        write!(
            output,
            "{}. {}",
            (theme.idx)(&(i + 1).to_string()),
            format_report(report, theme, enable_emoji)
        )
        .ok();
    }

    writeln!(output, "{}", (theme.line)(&cutoff)).ok();
    output
}

fn print_languages(state: &AppState) {
    let current = state.service.current_language();

    println!("{}", "Supported target languages".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for lang in SUPPORTED_LANGUAGES.iter() {
        let marker = if lang.code == current { "*" } else { " " };
        println!(" {} {}  {}", marker, lang.code.cyan(), lang.name);
    }
    println!();
    println!("(* = current; source language is always English)");
}

async fn print_status(state: &AppState) {
    println!("{}", "lingo Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = state.config.read().await;
    let db_path = config::get_database_path(&config);

    println!(
        "Config: {}",
        config::get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Preferences: {}", db_path.display());

    let code = state.service.current_language();
    let name = language_name(&code).unwrap_or("Unknown");
    println!("Target language: {} ({})", name, code);

    println!("Provider: {}", config.provider.endpoint);
    if config.provider.contact_email.is_some() {
        println!("Provider contact: Configured");
    } else {
        println!("Provider contact: Not configured");
    }
    println!("Request spacing: {} ms", config.min_interval_ms);

    println!("Session cache: {} entries", state.service.cache_len());
    println!("Pending requests: {}", state.service.pending_requests());
}
