//! Argument parsing for the `stockroom` binary

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "stockroom",
    version,
    about = "Interactive warehouse stock browser and order desk",
    long_about = "Runs an interactive session against warehouse stock: list \
warehouses, search and order items as an authenticated employee, browse by \
category, and get a session report at exit."
)]
pub struct Cli {
    /// Stock data file (JSON); the built-in demo stock when omitted
    #[arg(long, value_name = "FILE")]
    pub stock: Option<PathBuf>,

    /// Personnel data file (JSON); the built-in demo roster when omitted
    #[arg(long, value_name = "FILE")]
    pub personnel: Option<PathBuf>,

    /// Directory the session report log is appended to
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Skip appending the session report to the log file
    #[arg(long)]
    pub no_log: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["stockroom"]);
        assert!(cli.stock.is_none());
        assert!(cli.personnel.is_none());
        assert!(cli.log_dir.is_none());
        assert!(!cli.no_log);
    }

    #[test]
    fn test_paths_parse() {
        let cli = Cli::parse_from([
            "stockroom",
            "--stock",
            "data/stock.json",
            "--personnel",
            "data/personnel.json",
            "--log-dir",
            "/tmp/logs",
            "--no-log",
        ]);
        assert_eq!(cli.stock.unwrap(), PathBuf::from("data/stock.json"));
        assert_eq!(cli.personnel.unwrap(), PathBuf::from("data/personnel.json"));
        assert_eq!(cli.log_dir.unwrap(), PathBuf::from("/tmp/logs"));
        assert!(cli.no_log);
    }
}
