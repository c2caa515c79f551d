use anyhow::Context;
use solidforge::{init_logging, Config, ToolServer, BUILD_DATE, VERSION};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().skip(1).any(|arg| arg == "--version" || arg == "-V") {
        println!("solidforge {} (built {})", VERSION, BUILD_DATE);
        return Ok(());
    }

    let config = Config::load().context("loading configuration")?;
    init_logging(&config.logging)?;
    info!("SolidForge {} starting", VERSION);

    let server = Arc::new(ToolServer::from_config(&config).context("starting tool server")?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        // Editor launches block for the startup grace period
        let handler = Arc::clone(&server);
        let reply = match tokio::task::spawn_blocking(move || handler.handle_line(&line)).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Request handler panicked: {}", e);
                continue;
            }
        };

        if let Some(reply) = reply {
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    info!("Input closed, shutting down");
    let handler = Arc::clone(&server);
    tokio::task::spawn_blocking(move || handler.shutdown()).await?;
    Ok(())
}
