use log_monitor::{
    ClassifierChain, DefaultClassifier, ErrorClassifier, MonitorConfig, StdoutSink, Supervisor,
    TailConfig,
};
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Log Monitor Supervisor Example ===\n");

    let dir = tempfile::tempdir()?;
    for name in ["api.log", "worker.log", "notes.txt"] {
        std::fs::write(dir.path().join(name), "")?;
    }

    let config = MonitorConfig {
        root: dir.path().to_path_buf(),
        suffixes: vec!["log".to_string()],
        tail: TailConfig {
            poll_interval: Duration::from_millis(100),
            ..TailConfig::default()
        },
        ..MonitorConfig::default()
    };

    // Echo every line, and report the ones that look like failures
    let chain = ClassifierChain::new()
        .with(DefaultClassifier::default())
        .with(ErrorClassifier);

    let shutdown = CancellationToken::new();
    let supervisor = Supervisor::new(config, chain, StdoutSink::default());
    let run = tokio::spawn(supervisor.run(shutdown.clone()));

    tokio::time::sleep(Duration::from_millis(300)).await;

    let writes = [
        ("api.log", "GET /health 200"),
        ("worker.log", "job 41 done"),
        ("api.log", "POST /orders ERROR upstream timeout"),
        ("notes.txt", "error in a file nobody watches"),
        ("worker.log", "job 42 failed: NullPointerException"),
    ];
    for (name, line) in writes {
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(dir.path().join(name))?;
        writeln!(file, "{}", line)?;
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    tokio::time::sleep(Duration::from_millis(500)).await;
    shutdown.cancel();

    let summary = run.await??;
    println!(
        "\nWatched {} files, skipped {}",
        summary.watched, summary.skipped
    );

    Ok(())
}
