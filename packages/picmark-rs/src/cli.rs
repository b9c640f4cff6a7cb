//! Command line arguments backing the `picmark` binary.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
  name = "picmark",
  about = "Detects labels for a batch of images concurrently and prints the results as JSON",
  version
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Print version information
  Version,
  /// Enrich a batch of image keys with detected labels
  Enrich(EnrichArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct EnrichArgs {
  /// Image keys to enrich. When omitted the batch is read as a JSON array from --input or stdin
  pub identifiers: Vec<String>,

  /// File holding a JSON array of image keys ("-" for stdin)
  #[arg(long, short = 'i')]
  pub input: Option<PathBuf>,

  /// Bucket the image keys live in
  #[arg(long, short = 'b', env = "BUCKET_NAME")]
  pub bucket: Option<String>,

  /// DetectLabels endpoint URL. Requests are not signed, so point this at a signing proxy or a local stand-in
  #[arg(long, short = 'e', env = "PICMARK_ENDPOINT")]
  pub endpoint: Option<String>,

  /// Answer from a JSON fixture file instead of calling the service
  #[arg(long, short = 'f')]
  pub fixtures: Option<PathBuf>,

  /// Maximum concurrent detector calls (unbounded when unset)
  #[arg(long, short = 'c', env = "PICMARK_MAX_CONCURRENCY")]
  pub max_concurrency: Option<usize>,

  /// Maximum labels requested per image
  #[arg(long, default_value = "10")]
  pub max_labels: u32,

  /// Minimum confidence (0-100) for a label to be returned
  #[arg(long, default_value = "90")]
  pub min_confidence: f64,

  /// Per-request timeout in seconds for the HTTP detector
  #[arg(long, default_value = "30")]
  pub timeout_secs: u64,

  /// Pretty-print the JSON output
  #[arg(long)]
  pub pretty: bool,

  /// Enable debug logging on stderr
  #[arg(long, short = 'v')]
  pub verbose: bool,
}

impl EnrichArgs {
  /// Resolves the batch from positional keys, the input file, or stdin.
  pub fn load_identifiers(&self) -> Result<Vec<String>> {
    if !self.identifiers.is_empty() {
      return Ok(self.identifiers.clone());
    }

    let raw = match self.input.as_deref() {
      Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?,
      _ => {
        let mut buf = String::new();
        std::io::stdin()
          .read_to_string(&mut buf)
          .context("Failed to read batch from stdin")?;
        buf
      }
    };

    parse_identifiers(&raw)
  }
}

pub fn parse_identifiers(raw: &str) -> Result<Vec<String>> {
  serde_json::from_str(raw).context("Input must be a JSON array of image keys")
}
