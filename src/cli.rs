use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::StackConfig;
use crate::config::constants::CONFIG_FILE;
use crate::core::Library;
use crate::error::{MiddlewareError, Result};
use crate::fetch::HttpFetcher;
use crate::pipeline::{Pipeline, build_fetch_stack, build_read_stack, build_write_stack};

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct StackArgs {
    /// Library JSON to transform
    #[arg(required = true)]
    pub input: PathBuf,
    /// Output path; stdout when omitted
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// Library root for relative file references
    #[clap(short = 'r', long = "lib-root")]
    pub lib_root: Option<PathBuf>,
    /// Configuration file (JSON)
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// Also write debug logs to this file
    #[clap(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
#[command(version, about, long_about = None)]
pub enum Commands {
    /// Run the read stack: decode LaTeX, parse names, tags and paths
    Read(StackArgs),
    /// Run the write stack: merge names, encode LaTeX, enclose values
    Write(StackArgs),
    /// Download documents for `online` entries
    Fetch {
        #[command(flatten)]
        args: StackArgs,
        /// Directory the documents are saved to
        #[clap(short = 't', long)]
        target: Option<PathBuf>,
    },
}

impl Commands {
    pub fn args(&self) -> &StackArgs {
        match self {
            Self::Read(args) | Self::Write(args) | Self::Fetch { args, .. } => args,
        }
    }
}

/// bib-middleware command line
#[derive(Parser)]
#[command(about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Resolve the stack configuration: an explicit file, else `bibmw.json` in
/// the library root when present, else defaults. `--lib-root` always wins.
pub fn load_config(args: &StackArgs) -> Result<StackConfig> {
    let config = match (&args.config, &args.lib_root) {
        (Some(path), _) => StackConfig::from_file(path)?,
        (None, Some(root)) if root.join(CONFIG_FILE).is_file() => {
            StackConfig::from_file(&root.join(CONFIG_FILE))?
        }
        (None, Some(root)) => StackConfig::new(root.clone()),
        (None, None) => {
            return Err(MiddlewareError::invalid_config(
                "Either --lib-root or --config is required",
            ));
        }
    };

    Ok(match &args.lib_root {
        Some(root) => config.with_library_root(root.clone()),
        None => config,
    })
}

pub fn load_library(path: &Path) -> Result<Library> {
    debug!("Loading library from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_library(library: &Library, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(library)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Library written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Log every entry a stack could not fully transform
pub fn report_failures(library: &Library) -> usize {
    let mut count = 0;
    for failed in library.failed_blocks() {
        warn!("Entry {}: {}", failed.entry.key, failed.error);
        count += 1;
    }
    count
}

async fn run_stack(pipeline: Pipeline, args: &StackArgs) -> Result<()> {
    let library = load_library(&args.input)?;
    info!(
        "Running {} stack over {} entries",
        pipeline.name(),
        library.len()
    );

    let library = pipeline.execute(library).await?;
    let failed = report_failures(&library);
    if failed > 0 {
        warn!("{} of {} entries had field errors", failed, library.len());
    }

    save_library(&library, args.output.as_deref())
}

pub async fn read_command(args: &StackArgs) -> Result<()> {
    let config = load_config(args)?;
    run_stack(build_read_stack(&config)?, args).await
}

pub async fn write_command(args: &StackArgs) -> Result<()> {
    let config = load_config(args)?;
    run_stack(build_write_stack(&config)?, args).await
}

pub async fn fetch_command(args: &StackArgs, target: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(args)?;
    if target.is_some() {
        config.download_dir = target;
    }
    let fetcher = HttpFetcher::new()?;
    run_stack(build_fetch_stack(&config, Arc::new(fetcher))?, args).await
}
