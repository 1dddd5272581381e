use clap::Parser;
use log_monitor::{ClassifierChain, Cli, StdoutSink, Supervisor, init_logging, shutdown_signal};
use std::process;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if cli.wants_usage() {
        println!("{}", Cli::usage());
        process::exit(0);
    }

    init_logging();

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("shutdown requested, stopping monitors");
        signal_token.cancel();
    });

    let supervisor = Supervisor::new(cli.into_config(), ClassifierChain::errors(), StdoutSink::default());

    if let Err(e) = supervisor.run(shutdown).await {
        error!(error = %e, "log monitor failed");
        process::exit(1);
    }
}
