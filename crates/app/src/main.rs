//! Hemo - donor eligibility report
//!
//! Reads a donor export from the donor-management API, evaluates every
//! donor's eligibility at one instant, and prints the filtered directory.

use clap::Parser;
use hemo_core::{Config, DonorDirectory, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod report;

use cli::Args;

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let path = args.donors_path(config)?;
    let now = args.evaluation_instant()?;

    tracing::info!(path = %path.display(), %now, "Evaluating donor directory");

    let directory = DonorDirectory::load(&path)?;
    let filter = args.filter(config);
    let entries = directory.search(&filter, now);
    let summary = DonorDirectory::summarize(&entries);

    if args.json {
        println!("{}", report::render_json(&entries, &summary)?);
    } else {
        print!("{}", report::render_text(&entries, &summary));
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&args, &config) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
