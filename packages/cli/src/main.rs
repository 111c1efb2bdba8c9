mod commands;
mod config;
mod project;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, init, move_node, palette, remove, set_content, set_style, show, AddArgs, DragArgs,
    InitArgs, RemoveArgs, SetContentArgs, SetStyleArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - drag-and-drop page builder
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Pagecraft project
    Init(InitArgs),

    /// List palette templates
    Palette,

    /// Print the page outline
    Show(ShowArgs),

    /// Drop a palette template onto the page
    Add(AddArgs),

    /// Drag an existing node onto a container or next to a sibling
    Drag(DragArgs),

    /// Remove a node and everything inside it
    Remove(RemoveArgs),

    /// Replace a node's text
    SetContent(SetContentArgs),

    /// Set or clear a style property
    SetStyle(SetStyleArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let cwd = std::env::current_dir()
        .expect("Cannot get current directory")
        .display()
        .to_string();

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Palette => palette(),
        Command::Show(args) => show(args, &cwd).await,
        Command::Add(args) => add(args, &cwd).await,
        Command::Drag(args) => move_node(args, &cwd).await,
        Command::Remove(args) => remove(args, &cwd).await,
        Command::SetContent(args) => set_content(args, &cwd).await,
        Command::SetStyle(args) => set_style(args, &cwd).await,
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
