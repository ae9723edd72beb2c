use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use anyhow::Result;
use serde::Serialize;

use pickel::{dirs_in, files_in, PathStream, Picker, PickerConfig, Report};

#[derive(Parser)]
#[command(name = "pickel")]
#[command(about = "Pick files out of a directory tree, skipping duplicates and empty files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recursively pick files under a directory
    Pick {
        /// Directory to walk
        path: PathBuf,
        /// Also pick files whose content was already picked
        #[arg(long)]
        include_seen: bool,
        /// Also pick zero-length files
        #[arg(long)]
        include_empty: bool,
        /// Print paths joined onto the given root instead of absolute paths
        #[arg(long)]
        relative: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the immediate subdirectories of a directory
    Dirs {
        path: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the immediate non-empty files of a directory
    Files {
        path: PathBuf,
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let (path, format, stream) = match cli.command {
        Commands::Pick { path, include_seen, include_empty, relative, format } => {
            ensure_exists(&path);
            let config = PickerConfig::new()
                .include_already_seen(include_seen)
                .include_empty_files(include_empty)
                .use_relative_paths(relative);
            let stream = Picker::new(config).pick(&path);
            return emit(path, format, stream).await;
        }
        Commands::Dirs { path, format } => {
            ensure_exists(&path);
            let stream = dirs_in(&path);
            (path, format, stream)
        }
        Commands::Files { path, format } => {
            ensure_exists(&path);
            let stream = files_in(&path);
            (path, format, stream)
        }
    };

    emit(path, format, stream).await
}

fn ensure_exists(path: &Path) {
    if !path.exists() {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

async fn emit<S>(root: PathBuf, format: Format, mut stream: PathStream<S>) -> Result<()>
where
    S: Serialize + Send + 'static,
{
    match format {
        Format::Text => {
            while let Some(path) = stream.recv().await {
                println!("{}", path.display());
            }
            // Failures were already logged by the walk; what was printed stands
            let _ = stream.finish().await;
        }
        Format::Json => {
            let paths = stream.collect_paths().await;
            let report = Report::new(root, paths, stream.finish().await);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
