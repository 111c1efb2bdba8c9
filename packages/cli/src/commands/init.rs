use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_workspace::{BlobStore, FileStore};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Page document path
    #[arg(short, long, default_value = "page.json")]
    pub document: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let config = Config {
        document_path: args.document.clone(),
        ..Config::default()
    };

    // Start from an empty page unless one is already there
    let store = FileStore::new(config.get_document_path(cwd));
    match store.read() {
        Ok(None) => {
            store.write(&json!([]))?;
            println!("  {} Created {}", "✓".green(), args.document);
        }
        Ok(Some(_)) => {}
        Err(err) => {
            println!(
                "  {} Left {} untouched: {}",
                "⚠️".yellow(),
                args.document.bright_white(),
                err
            );
        }
    }

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft palette");
    println!("  2. Run: pagecraft add heading");
    println!("  3. Run: pagecraft show");

    Ok(())
}
