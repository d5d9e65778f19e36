use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "drinks-cli")]
#[command(about = "Command-line client for the drinks API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Bearer credential: an API key, or a `mock-jwt-` token for `users`.
    #[arg(short, long, default_value = "admin-api-key-123456")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search drinks by name
    Search { term: String },
    /// Fetch the featured random drink
    Random,
    /// Issue a mock token for a user
    Token { username: String },
    /// List users (needs a token from an admin or moderator)
    Users,
    /// Create a drink from a JSON file
    Create {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Delete a drink by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Search { term } => {
            client
                .get(format!("{}/drinks", cli.url))
                .query(&[("search", term)])
                .send()
                .await?
        }
        Commands::Random => client.get(format!("{}/drinks/random", cli.url)).send().await?,
        Commands::Token { username } => {
            client
                .post(format!("{}/auth/token", cli.url))
                .json(&json!({ "username": username }))
                .send()
                .await?
        }
        Commands::Users => {
            client
                .get(format!("{}/auth/users", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Create { file } => {
            let body: Value = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            client
                .post(format!("{}/drinks", cli.url))
                .headers(headers)
                .json(&body)
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{}/drinks/{}", cli.url, id))
                .headers(headers)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_success() {
        println!("{}", rendered);
    } else {
        eprintln!("Error: API returned status {}", status);
        eprintln!("{}", rendered);
    }
    Ok(())
}
