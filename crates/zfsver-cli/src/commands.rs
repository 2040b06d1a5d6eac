use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zfsver", version)]
#[command(about = "Find earlier versions of a file in ZFS snapshots", long_about = None)]
pub struct Cli {
    /// Show modification time, size and full path of every snapshot copy
    #[arg(short, long)]
    pub verbose: bool,

    /// Render timestamps in UTC instead of local time
    #[arg(long)]
    pub utc: bool,

    /// Read configuration from this file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Regular file to look for
    pub file: PathBuf,
}
