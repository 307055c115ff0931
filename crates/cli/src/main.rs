use clap::Parser;
use tracing::error;
use uiv_cli::{cli::Cli, logging, runner};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose > 0);

    if let Err(err) = runner::run(cli).await {
        error!(target = "uiv", error = %err, "verification failed");
        std::process::exit(1);
    }
}
