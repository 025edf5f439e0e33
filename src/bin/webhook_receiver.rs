use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use tokio::net::TcpListener;

use webhook_receiver::{report, serve, ReceiverConfig, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "webhook-receiver")]
#[command(about = "Receive alert webhooks and print a readable summary of each one")]
struct Args {
    /// Port to listen on
    #[arg(default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ReceiverConfig::with_port(args.port);
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;

    print!("{}", report::banner(&config));

    serve(listener, shutdown_signal()).await?;

    println!("{}", report::FAREWELL);
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
