//! appfiles CLI - Command line interface for the appfiles helpers
//!
//! Every command prints one JSON object. Failures print
//! `{"status": "error", ...}` and exit with status 1.

use appfiles::{
    config_file_location, default_files_root, logging, DirAssets, FileStore, Settings,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "appfiles")]
#[command(about = "Filesystem helpers: text files, tree copies, bundled assets, settings")]
#[command(version)]
struct Cli {
    /// Files root holding config/settings.json (defaults to the user data dir)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a text file
    Read {
        path: PathBuf,
    },

    /// Replace a file's contents, creating parent directories
    Write {
        path: PathBuf,
        content: String,
    },

    /// Copy a single file
    Copy {
        source: PathBuf,
        destination: PathBuf,
    },

    /// Copy a directory tree
    CopyDir {
        source: PathBuf,
        destination: PathBuf,
    },

    /// Delete everything inside a directory
    Clear {
        dir: PathBuf,
    },

    /// Print the settings file location for the files root
    ConfigPath,

    /// Read or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Print a bundled asset
    Asset {
        /// Directory the assets are bundled in
        #[arg(short, long)]
        assets: PathBuf,
        /// Asset key, e.g. "config/defaults.json"
        key: String,
    },

    /// Print the content digest of a directory tree
    Digest {
        dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print every setting
    List,
    /// Print one setting
    Get { key: String },
    /// Set a value (parsed as JSON, otherwise stored as a string)
    Set { key: String, value: String },
    /// Remove a setting
    Unset { key: String },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("{}", e);
    }

    if let Err(e) = run(&cli) {
        output(
            &cli.format,
            &serde_json::json!({
                "status": "error",
                "message": format!("{:#}", e)
            }),
        );
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let store = FileStore::new();

    match &cli.command {
        Commands::Read { path } => {
            let content = store.read_text(path)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "path": path.display().to_string(),
                    "found": content.is_some(),
                    "content": content
                }),
            );
        }

        Commands::Write { path, content } => {
            store.write_text(path, content)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "path": path.display().to_string(),
                    "bytes": content.len()
                }),
            );
        }

        Commands::Copy {
            source,
            destination,
        } => {
            let bytes = store.copy_file(source, destination)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "source": source.display().to_string(),
                    "destination": destination.display().to_string(),
                    "bytes": bytes
                }),
            );
        }

        Commands::CopyDir {
            source,
            destination,
        } => {
            let report = store.copy_directory(source, destination)?;
            let failures: Vec<_> = report
                .failures
                .iter()
                .map(|f| {
                    serde_json::json!({
                        "source": f.source.display().to_string(),
                        "destination": f.destination.display().to_string(),
                        "error": f.error.to_string()
                    })
                })
                .collect();
            let status = if report.is_complete() { "ok" } else { "partial" };
            output(
                &cli.format,
                &serde_json::json!({
                    "status": status,
                    "files": report.files_copied,
                    "bytes": report.bytes_copied,
                    "directories": report.directories_created,
                    "failures": failures
                }),
            );
            if !report.is_complete() {
                std::process::exit(1);
            }
        }

        Commands::Clear { dir } => {
            store.clear_directory(dir)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "dir": dir.display().to_string()
                }),
            );
        }

        Commands::ConfigPath => {
            let root = files_root(cli)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "path": config_file_location(&root).display().to_string()
                }),
            );
        }

        Commands::Settings { action } => {
            let root = files_root(cli)?;
            run_settings(cli, &store, &root, action)?;
        }

        Commands::Asset { assets, key } => {
            let source = DirAssets::new(assets);
            let content = store.read_bundled_asset(Some(&source), key)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "key": key,
                    "found": content.is_some(),
                    "content": content
                }),
            );
        }

        Commands::Digest { dir } => {
            let digest = store.tree_digest(dir)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "dir": dir.display().to_string(),
                    "digest": digest.to_hex()
                }),
            );
        }
    }

    Ok(())
}

fn run_settings(
    cli: &Cli,
    store: &FileStore,
    root: &Path,
    action: &SettingsAction,
) -> anyhow::Result<()> {
    let mut settings = Settings::load(store, root)?;

    match action {
        SettingsAction::List => {
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "settings": settings
                }),
            );
        }

        SettingsAction::Get { key } => {
            let value = settings
                .get(key)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Setting not found: {}", key))?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "key": key,
                    "value": value
                }),
            );
        }

        SettingsAction::Set { key, value } => {
            let value = serde_json::from_str(value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone()));
            settings.set(key.clone(), value.clone());
            settings.save(store, root)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "key": key,
                    "value": value
                }),
            );
        }

        SettingsAction::Unset { key } => {
            let removed = settings.remove(key);
            settings.save(store, root)?;
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "key": key,
                    "removed": removed.is_some()
                }),
            );
        }
    }

    Ok(())
}

fn files_root(cli: &Cli) -> anyhow::Result<PathBuf> {
    cli.root
        .clone()
        .or_else(default_files_root)
        .ok_or_else(|| anyhow::anyhow!("Could not determine a files root; pass --root"))
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}
