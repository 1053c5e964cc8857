use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "config.json";

#[derive(Debug, Parser)]
#[command(name = "dual-momentum")]
#[command(about = "Fetch prices and report relative momentum per module", long_about = None)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, default_value = DEFAULT_CONFIG)]
    pub conf: PathBuf,

    /// Download prices for every configured ticker
    #[arg(long)]
    pub fetch: bool,

    /// Print the momentum report
    #[arg(long)]
    pub suggest: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dual-momentum"]);
        assert_eq!(cli.conf, PathBuf::from("config.json"));
        assert!(!cli.fetch);
        assert!(!cli.suggest);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["dual-momentum", "--conf", "prod.json", "--fetch", "--suggest"]);
        assert_eq!(cli.conf, PathBuf::from("prod.json"));
        assert!(cli.fetch && cli.suggest);
    }
}
