use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cache-sift")]
#[command(about = "🧹 Deduplicate the indexer cache CSVs by address and rewrite a fresh 1..N id column")]
#[command(version)]
pub struct Args {
    #[arg(short, long, help = "Directory holding the cache CSV files (overrides the config)")]
    pub base_dir: Option<PathBuf>,

    #[arg(short, long, help = "JSON configuration file; built-in file table when omitted")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Verbose output")]
    pub verbose: bool,

    #[arg(long, value_name = "FILE", help = "Write the effective configuration to FILE and exit")]
    pub write_config: Option<PathBuf>,
}
