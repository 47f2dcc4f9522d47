use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "find-my-car", version, about = "Describe a car, get its details")]
pub struct Cli {
    #[arg(long, default_value = "config.json", help = "Path to the JSON config file")]
    pub config: PathBuf,
    #[arg(long, help = "Reference table to use instead of the configured one")]
    pub table: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_config() {
        let cli = Cli::try_parse_from(["find-my-car"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("config.json"));
        assert!(cli.table.is_none());
    }

    #[test]
    fn table_override() {
        let cli = Cli::try_parse_from(["find-my-car", "--table", "cars.json"]).unwrap();
        assert_eq!(cli.table, Some(PathBuf::from("cars.json")));
    }
}
