use clap::Parser;
use std::path::PathBuf;

/// Serves the live game roster and player notes to a browser UI.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Host update cycles per second
    #[arg(short, long, default_value = "30")]
    pub tick_rate: u32,

    /// Directory containing index.html and Character.png
    #[arg(short, long, default_value = "assets")]
    pub assets: PathBuf,

    /// Players in the simulated lobby
    #[arg(long, default_value = "10")]
    pub players: usize,

    /// Seed for the simulated lobby
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL a browser on this machine should open
    pub fn ui_url(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "127.0.0.1" => "localhost",
            other => other,
        };
        format!("http://{}:{}", host, self.port)
    }
}
