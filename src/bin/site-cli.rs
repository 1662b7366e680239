use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use url::Url;

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Management CLI for the site router", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "SITE_URL")]
    url: Url,

    #[arg(short, long, env = "SITE_ADMIN_KEY", hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check admin site status
    Status,
    /// Show the configured route table
    Routes,
    /// Verify the admin key
    Login,
    /// Probe the health responder
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
    } else if !matches!(cli.command, Commands::Health) {
        return Err("admin key required: pass --key or set SITE_ADMIN_KEY".into());
    }

    let res = match cli.command {
        Commands::Status => {
            client.get(cli.url.join("/admin/status")?)
                .headers(headers)
                .send()
                .await?
        }
        Commands::Routes => {
            client.get(cli.url.join("/admin/routes")?)
                .headers(headers)
                .send()
                .await?
        }
        Commands::Login => {
            client.post(cli.url.join("/admin/login")?)
                .headers(headers)
                .send()
                .await?
        }
        Commands::Health => {
            client.get(cli.url.join("/")?)
                .header(reqwest::header::ACCEPT, "application/json")
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: site returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
