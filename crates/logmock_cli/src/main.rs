//! logread-mock
//!
//! Drop-in stand-in for OpenWrt's `logread`, replaying a seeded log as if it
//! were happening now.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::Parser;
use color_eyre::Result;
use logmock_cli::{telemetry, LogreadArgs};
use logmock_replay::ReplayDriver;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init()?;
    let args = LogreadArgs::parse();
    debug!(?args, "starting");

    let mut driver = ReplayDriver::load(&args.log_file, args.to_config())?;

    let cancel = CancellationToken::new();
    let listener = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            listener.cancel();
        }
    });
    // let the listener register its handler before any output
    tokio::task::yield_now().await;

    driver.run(std::io::stdout().lock(), &cancel).await?;
    Ok(())
}
