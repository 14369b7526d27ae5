use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rxsnap_cli::download_all;
use rxsnap_core::{Config, Pharmacy};

#[derive(Parser, Debug)]
#[command(name = "photo_downloader")]
#[command(about = "Bulk-download delivery photos for a month/pharmacy pair")]
struct Args {
    /// Full English month name, e.g. "June"
    #[arg(long)]
    month: String,

    /// Pharmacy name, e.g. "Pharmacy 3"
    #[arg(long)]
    pharmacy: String,

    /// Local mirror root directory
    #[arg(long, default_value = "Pharmacy Data")]
    dest: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Catch typos before touching the drive.
    let pharmacy: Pharmacy = args
        .pharmacy
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let config = Config::from_env()?;
    let drive = rxsnap_drive::create_drive(&config)?;

    let report = download_all(
        drive,
        &config.root_folder_id,
        &args.month,
        pharmacy.as_str(),
        &args.dest,
    )
    .await?;

    println!(
        "Downloaded {} file(s) to {}",
        report.files_written,
        report.dest.display()
    );

    Ok(())
}
