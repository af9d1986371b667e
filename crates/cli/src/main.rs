use clap::Parser;
use deploy_core::deploy_from_config;
use env_logger::Env;
use eyre::Result;

/// Deploy the FakeNFTMarketplace and the ZeeCardsDAO that trades through it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the deployment config file
    #[arg(long = "config", short = 'c', default_value = "config.toml")]
    config_path: String,

    /// Network ID, defaults to `default_network` from the config
    #[arg(long = "network", short = 'n')]
    network_id: Option<u64>,
}

#[tokio::main]
async fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("warn,deploy=info,deploy_core=info"));

    if let Err(err) = run(Cli::parse()).await {
        log::error!("Deployment failed: {:?}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let report = deploy_from_config(Some(&cli.config_path), cli.network_id).await?;
    log::debug!("Deployment report: {}", serde_json::to_string(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_flags() {
        let cli = Cli::try_parse_from(["deploy"]).unwrap();
        assert_eq!(cli.config_path, "config.toml");
        assert_eq!(cli.network_id, None);
    }

    #[test]
    fn test_network_override() {
        let cli = Cli::try_parse_from(["deploy", "-n", "11155111", "--config", "sepolia.toml"])
            .unwrap();
        assert_eq!(cli.config_path, "sepolia.toml");
        assert_eq!(cli.network_id, Some(11155111));
    }

    #[tokio::test]
    async fn test_missing_config_fails() {
        let cli = Cli::try_parse_from(["deploy", "--config", "does-not-exist.toml"]).unwrap();
        assert!(run(cli).await.is_err());
    }
}
