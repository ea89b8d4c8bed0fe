use clap::Parser;
use typeroute::cli::{run_cli, Cli};
use typeroute::logging::{init_logging_with_config, LogConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_config = LogConfig::from_env();
    let config = if cli.verbose {
        LogConfig {
            format: env_config.format,
            target_filter: env_config.target_filter,
            ..LogConfig::default_dev()
        }
    } else {
        env_config
    };
    init_logging_with_config(&config)?;

    run_cli(cli).await
}
