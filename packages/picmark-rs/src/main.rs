use anyhow::{Context, Result};
use clap::Parser;
use picmark_rs::cli::{Args, Commands, EnrichArgs};
use picmark_rs::config::Settings;
use picmark_rs::EnrichmentEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
  let args = Args::parse();

  match args.command {
    Commands::Version => {
      println!("picmark {}", env!("CARGO_PKG_VERSION"));
    }
    Commands::Enrich(enrich) => {
      init_tracing(enrich.verbose);
      if let Err(e) = run_enrich(enrich).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
      }
    }
  }
}

/// Logs go to stderr so stdout carries only the JSON results.
fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

async fn run_enrich(args: EnrichArgs) -> Result<()> {
  let settings = Settings::from_args(&args)?;
  let identifiers = args.load_identifiers()?;
  let detector = settings.build_detector()?;

  let engine = EnrichmentEngine::with_options(detector, settings.engine.clone());
  let results = engine.enrich(identifiers).await;

  let json = if args.pretty {
    serde_json::to_string_pretty(&results)
  } else {
    serde_json::to_string(&results)
  }
  .context("Failed to encode results")?;

  println!("{}", json);
  Ok(())
}
