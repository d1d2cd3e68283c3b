// CLI front end: feed a document through the translation engine.

use clap::Parser;
use colored::Colorize;
use mail_translate::application::translate::{translate_html, translate_text, TranslateOptions};
use mail_translate::infrastructure::config::{self, load_config, Logging};
use mail_translate::interfaces::cli::Cli;
use mail_translate::state::AppState;
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    // Handle commands (flags)
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

    // CLI overrides
    if let Some(target) = &cli.target {
        config.target_language = target.clone();
    }
    if let Some(provider) = &cli.provider {
        config.provider_id = provider.clone();
    }

    let state = AppState::new(config);

    if cli.list_providers {
        let mut descriptors = state.registry.descriptors();
        descriptors.sort_by_key(|d| d.id);
        for descriptor in descriptors {
            println!("{:<10} {}", descriptor.id, descriptor.display_name);
        }
        return Ok(());
    }

    // Input from arguments or stdin
    let input = if cli.input.is_empty() {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        buffer
    } else {
        cli.input.join(" ")
    };
    if input.trim().is_empty() {
        eprintln!("{}", "Please provide input to translate".red());
        std::process::exit(1);
    }

    let options = TranslateOptions {
        report_progress: !cli.no_progress,
    };
    let ticket = if cli.text {
        translate_text(&state, &input, options).await
    } else {
        translate_html(&state, &input, options).await
    };

    let ticket = match ticket {
        Ok(ticket) => ticket,
        Err(e) => {
            eprintln!("{}", format!("Translation failed: {}", e).red());
            std::process::exit(1);
        }
    };

    // Ctrl-C cancels the in-flight request
    let cancel = ticket.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling translation...");
            cancel.cancel();
        }
    });

    match ticket.finish().await {
        Ok(translated) => {
            println!("{}", translated.text);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format!("Translation failed: {}", e).red());
            std::process::exit(1);
        }
    }
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
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
