use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pulseboard", about = "Live presence and donation toast daemon")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "pulseboard.toml")]
    pub config: String,
}
