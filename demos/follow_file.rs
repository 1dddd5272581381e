use log_monitor::{TailConfig, TailItem, follow_file};
use std::io::Write;
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("app.log");
    std::fs::write(&path, "written before we attached\n")?;

    let config = TailConfig {
        poll_interval: Duration::from_millis(100),
        ..TailConfig::default()
    };
    let cancel = CancellationToken::new();
    let stream = follow_file(&path, config, cancel.clone()).await?;
    tokio::pin!(stream);

    // Simulate an application writing to its log
    let writer_path = path.clone();
    tokio::spawn(async move {
        for i in 1..=3 {
            tokio::time::sleep(Duration::from_millis(250)).await;
            let appended = std::fs::OpenOptions::new()
                .append(true)
                .open(&writer_path)
                .and_then(|mut file| writeln!(file, "request {} handled", i));
            if let Err(e) = appended {
                eprintln!("Error: {}", e);
            }
        }
    });

    println!("Following {}...", path.display());

    let mut count = 0;
    while let Some(item) = stream.next().await {
        match item {
            TailItem::Attached => println!("  attached"),
            TailItem::Line(line) => {
                count += 1;
                println!("  [{}]: {}", count, line);
            }
            TailItem::Missing => println!("  file went away"),
        }

        if count >= 3 {
            cancel.cancel();
        }
    }

    Ok(())
}
