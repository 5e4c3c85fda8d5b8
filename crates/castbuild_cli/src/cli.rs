//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Build demo GIFs from scripted terminal recordings
#[derive(Debug, Parser)]
#[command(name = "castbuild", version, about)]
pub struct Cli {
    /// Config file path (created with defaults if missing)
    #[arg(short, long, default_value = "castbuild.toml")]
    pub config: PathBuf,

    /// Override the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of worker threads (defaults to the processor count)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Build only the named jobs (repeatable)
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<String>,

    /// List resolved jobs and exit
    #[arg(long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_full_batch() {
        let cli = Cli::parse_from(["castbuild"]);
        assert_eq!(cli.config, PathBuf::from("castbuild.toml"));
        assert!(cli.only.is_empty());
        assert!(!cli.list);
        assert!(cli.workers.is_none());
    }

    #[test]
    fn only_is_repeatable() {
        let cli = Cli::parse_from(["castbuild", "--only", "forloop", "--only", "rename"]);
        assert_eq!(cli.only, vec!["forloop", "rename"]);
    }
}
