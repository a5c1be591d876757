pub mod init;
pub mod replay;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Watch focus, idle time, clipboard, keystrokes and selections")]
    Watch(watch::WatchArgs),
    #[command(about = "Replay a recorded signal feed and print the resulting log")]
    Replay(replay::ReplayArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::Replay(args) => replay::cmd(args).await,
        }
    }
}
