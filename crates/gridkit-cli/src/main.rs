//! gridkit CLI - check grid manifests, preview menus and look up rows.

mod logging;

use clap::{Parser, Subcommand};
use gridkit_core::Table;
use gridkit_editing::{Editor, EditorOptions, GridManifest, MenuEntry};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gridkit")]
#[command(about = "Interactive table manifests: validation and preview")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check grid manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "grid.yaml")]
        manifest: PathBuf,
    },

    /// Print the context menu a manifest configures
    Menu {
        /// Path to manifest file
        #[arg(default_value = "grid.yaml")]
        manifest: PathBuf,
    },

    /// Find the first seed row whose cell contains a value
    Find {
        /// Path to manifest file
        manifest: PathBuf,

        /// Column to search
        #[arg(short, long, default_value = "0")]
        column: usize,

        /// Value to look for (case-insensitive substring)
        value: String,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { manifest } => check_manifest(&manifest),
        Commands::Menu { manifest } => print_menu(&manifest),
        Commands::Find {
            manifest,
            column,
            value,
        } => find_row(&manifest, column, &value),
    }
}

fn load(path: &Path) -> (GridManifest, Table, EditorOptions) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read manifest: {e}");
            std::process::exit(1);
        }
    };

    let manifest = match GridManifest::from_yaml(&content) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Manifest invalid: {e}");
            std::process::exit(1);
        }
    };

    match manifest.build() {
        Ok((table, options)) => (manifest, table, options),
        Err(e) => {
            eprintln!("Manifest invalid: {e}");
            std::process::exit(1);
        }
    }
}

fn check_manifest(path: &Path) {
    println!("Checking manifest: {}", path.display());
    let (manifest, table, options) = load(path);

    println!("Manifest valid!");
    match manifest.width() {
        Some(width) => println!("  Columns: {width}"),
        None => println!("  Columns: any"),
    }
    println!("  Rows: {}", table.len());
    println!("  Excluded columns: {}", options.exclude_columns.len());
    println!(
        "  Context menu: {}",
        if options.context_menu {
            format!("{} items", options.menu_items.len())
        } else {
            "disabled".to_string()
        }
    );
}

fn print_menu(path: &Path) {
    let (_, _, options) = load(path);
    if !options.context_menu {
        println!("Context menu disabled");
        return;
    }
    let editor = Editor::new(options);
    for entry in editor.menu_entries() {
        println!("{}", format_entry(&entry));
    }
}

fn format_entry(entry: &MenuEntry) -> String {
    match entry {
        MenuEntry::Command { index, label } => format!("{index:>2}  {label}"),
        MenuEntry::Separator { index } => format!("{index:>2}  ----"),
        MenuEntry::Link { index, label, url } => format!("{index:>2}  {label} <{url}>"),
    }
}

fn find_row(path: &Path, column: usize, value: &str) {
    let (_, table, _) = load(path);
    match format_match(&table, column, value) {
        Some(line) => println!("{line}"),
        None => {
            println!("No row matches '{value}' in column {column}");
            std::process::exit(1);
        }
    }
}

fn format_match(table: &Table, column: usize, value: &str) -> Option<String> {
    let found = table.find_row(column, value);
    let index = found.index?;
    let cols: Vec<String> = found.cols.iter().map(ToString::to_string).collect();
    Some(format!("row {index}: {}", cols.join(" | ")))
}
