use anyhow::Context;

use clap::Parser;

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Serves the Sudoku solving and placement-checking API over HTTP.
#[derive(Parser)]
#[command(name = "sudoku-api", version, about)]
struct Args {

    /// The socket address to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let listener = TcpListener::bind(args.listen).await
        .with_context(|| format!("failed to bind {}", args.listen))?;

    log::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, sudoku_api::api::router()).await
        .context("server terminated abnormally")?;

    Ok(())
}
