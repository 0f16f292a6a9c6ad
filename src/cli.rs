use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chat with a local city guide", long_about = None)]
pub struct Args {
    /// One-shot question; omit to open an interactive chat
    pub question: Option<String>,

    /// Guide persona to use (defaults to the configured active profile)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Model to use (overrides the configured one)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Alternate config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}
