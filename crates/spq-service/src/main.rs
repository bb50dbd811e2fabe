use clap::Parser;
use spq_service::{init_logging, run, Cli};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli).await {
        error!(error = %e, "SPQ server failed");
        std::process::exit(e.exit_code());
    }

    info!("SPQ server stopped");
}
