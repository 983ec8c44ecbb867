use clap::Parser;
use imagegen::config::{AppConfig, setup_logging};
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = imagegen::cli::CliOptions::parse();

    if setup_logging(cli.debug).is_err() {
        return;
    }

    let config = AppConfig::from(&cli);

    if let Err(err) = imagegen::web::setup_server(&cli.listen_address, cli.port, &config).await {
        error!("Application error: {}", err);
    }
}
