//! Management CLI for the linkboard resolution service.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;

use linkboard::config::{load_config, AppConfig};
use linkboard::ident::HashidCodec;

#[derive(Parser)]
#[command(name = "board-cli")]
#[command(about = "Management CLI for the linkboard resolution service", long_about = None)]
struct Cli {
    /// Config file to read codec settings from.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the codec salt.
    #[arg(long)]
    salt: Option<String>,

    /// Base URL of a running server (for `resolve`).
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a primary key into a public token
    Encode { key: u64 },
    /// Decode a public token back into its values
    Decode { token: String },
    /// Resolve a segment against a running server
    Resolve { kind: String, segment: String },
    /// Generate a random salt
    GenSalt {
        #[arg(long, default_value_t = 32)]
        length: usize,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode { key } => {
            let codec = build_codec(&cli)?;
            println!("{}", codec.encode(*key));
        }
        Commands::Decode { token } => {
            let codec = build_codec(&cli)?;
            let values = codec.decode(token);
            if values.is_empty() {
                eprintln!("Error: token does not decode under this configuration");
                std::process::exit(1);
            }
            for value in values {
                println!("{value}");
            }
        }
        Commands::Resolve { kind, segment } => {
            let client = reqwest::Client::new();
            let res = client
                .get(format!("{}/resolve/{}/{}", cli.url, kind, segment))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::GenSalt { length } => {
            let salt: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(*length)
                .map(char::from)
                .collect();
            println!("{salt}");
        }
    }

    Ok(())
}

/// Build a codec from the config file (or defaults), with the salt flag
/// taking precedence.
fn build_codec(cli: &Cli) -> Result<HashidCodec, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(salt) = &cli.salt {
        config.hashid.salt = salt.clone();
    }
    Ok(HashidCodec::new(&config.hashid)?)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
