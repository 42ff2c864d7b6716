use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use just_vfs::config::SandboxConfig;
use just_vfs::{FileStore, Sandbox};

#[derive(Parser)]
#[command(name = "just-vfs")]
#[command(about = "Build and inspect virtual file store snapshots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a store from a TOML manifest and save it as a snapshot
    Pack {
        /// Manifest describing the mounts
        manifest: PathBuf,
        /// Snapshot file to write
        #[arg(short = 'o', long = "output")]
        output: PathBuf,
    },
    /// List the immediate children of a directory in a snapshot
    Ls {
        snapshot: PathBuf,
        #[arg(default_value = "/")]
        dir: String,
        /// Treat DIR as a literal path prefix and list every match
        #[arg(long = "prefix")]
        prefix: bool,
        /// Output as JSON
        #[arg(long = "json")]
        json: bool,
    },
    /// Print a file's content from a snapshot
    Cat { snapshot: PathBuf, path: String },
    /// Show entry count and total size of a snapshot
    Stat {
        snapshot: PathBuf,
        #[arg(long = "json")]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    if let Err(message) = run(cli.command).await {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Pack { manifest, output } => {
            let config = SandboxConfig::load(&manifest).map_err(|e| e.to_string())?;
            let base_dir = manifest.parent().unwrap_or_else(|| Path::new("."));
            let opts = config.into_options(base_dir).map_err(|e| e.to_string())?;
            let sandbox = Sandbox::create(Some(opts)).await.map_err(|e| e.to_string())?;
            sandbox.save_snapshot(&output).await.map_err(|e| e.to_string())?;
            println!("{} files -> {}", sandbox.store().count().await, output.display());
        }
        Command::Ls { snapshot, dir, prefix, json } => {
            let store = open(&snapshot).await?;
            let mut paths = if prefix {
                store.paths_by_prefix(&dir).await
            } else {
                store.children(&dir).await.map_err(|e| e.to_string())?
            };
            paths.sort();
            if json {
                println!("{}", serde_json::json!(paths));
            } else {
                for p in paths {
                    println!("{}", p);
                }
            }
        }
        Command::Cat { snapshot, path } => {
            let store = open(&snapshot).await?;
            let entry = store
                .get(&path)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| format!("no such file: {}", path))?;
            std::io::stdout()
                .write_all(entry.content())
                .map_err(|e| e.to_string())?;
        }
        Command::Stat { snapshot, json } => {
            let store = open(&snapshot).await?;
            let entries = store.get_all().await;
            let bytes: u64 = entries.iter().map(|(_, e)| e.size()).sum();
            if json {
                println!("{}", serde_json::json!({ "entries": entries.len(), "bytes": bytes }));
            } else {
                println!("entries: {}\nbytes: {}", entries.len(), bytes);
            }
        }
    }
    Ok(())
}

async fn open(snapshot: &Path) -> Result<std::sync::Arc<dyn FileStore>, String> {
    let sandbox = Sandbox::create(None).await.map_err(|e| e.to_string())?;
    sandbox.load_snapshot(snapshot).await.map_err(|e| e.to_string())?;
    Ok(sandbox.store())
}
