use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "names-cli")]
#[command(about = "Client for the reserved-names service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Admin API key, required for `mount`.
    #[arg(short, long)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Status,
    /// List every reserved name
    Reserved,
    /// Check whether a name can be used for a new account
    Check { name: String },
    /// Register a page mount at runtime (admin)
    Mount {
        path: String,
        /// Register as a static resource mount
        #[arg(long)]
        resource: bool,
    },
    /// Show the registered route table (admin)
    Routes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(key) = &cli.key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key))?,
        );
    }

    let res = match cli.command {
        Commands::Status => client.get(format!("{}/health", cli.url)).send().await?,
        Commands::Reserved => client.get(format!("{}/api/reserved", cli.url)).send().await?,
        Commands::Check { name } => {
            client
                .get(format!("{}/api/names/{}", cli.url, name))
                .send()
                .await?
        }
        Commands::Mount { path, resource } => {
            let kind = if resource { "resource" } else { "mounted" };
            client
                .post(format!("{}/admin/routes", cli.url))
                .headers(headers)
                .json(&json!({ "type": kind, "path": path }))
                .send()
                .await?
        }
        Commands::Routes => {
            client
                .get(format!("{}/admin/routes", cli.url))
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

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        std::process::exit(1);
    }
    Ok(())
}
