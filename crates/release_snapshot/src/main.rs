use clap::Parser;
use tracing::error;

use release_snapshot::config::CliArgs;
use release_snapshot::logging::init_logging;

#[tokio::main]
async fn main() {
    let cli = CliArgs::parse();
    let logging = match init_logging() {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("failed to initialize logging: {}", err);
            None
        }
    };

    if let Err(err) = release_snapshot::run(cli).await {
        match err.data() {
            Some(data) => error!(data = %data, "release snapshot failed: {}", err),
            None => error!("release snapshot failed: {}", err),
        }
        drop(logging);
        std::process::exit(1);
    }
}
