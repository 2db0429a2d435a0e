use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio_tungstenite::tungstenite::{client::IntoClientRequest, http::HeaderValue, Message};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the dashboard context gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the sanitized context and recent warnings
    Context,
    /// List board tasks
    Tasks,
    /// Move a task to a new status (pending, in_progress, done)
    Move { id: String, status: String },
    /// Send a message through the host bridge
    Send {
        /// Origin header to present, as a host page would
        #[arg(short, long, default_value = "http://localhost:3000")]
        origin: String,

        /// Read the payload from a file
        #[arg(short, long, conflicts_with = "payload")]
        file: Option<PathBuf>,

        /// Inline payload
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Context => {
            let res = client.get(format!("{}/context", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Tasks => {
            let res = client.get(format!("{}/tasks", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Move { id, status } => {
            let res = client
                .post(format!("{}/tasks/{}/status", cli.url, id))
                .json(&json!({ "status": status }))
                .send()
                .await?;
            if res.status().is_success() {
                println!("Task {} moved to {}", id, status);
            } else {
                eprintln!("Error: gateway returned status {}", res.status());
            }
        }
        Commands::Send { origin, file, payload } => {
            let payload = match (file, payload) {
                (Some(path), _) => std::fs::read_to_string(path)?,
                (None, Some(inline)) => inline,
                (None, None) => return Err("provide a payload or --file".into()),
            };
            send_via_bridge(&cli.url, &origin, payload).await?;
        }
    }

    Ok(())
}

async fn send_via_bridge(
    base_url: &str,
    origin: &str,
    payload: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let ws_url = format!("{}/host", base_url.replacen("http", "ws", 1));
    let mut request = ws_url.into_client_request()?;
    request
        .headers_mut()
        .insert("Origin", HeaderValue::from_str(origin)?);

    let (mut socket, _) = tokio_tungstenite::connect_async(request).await?;

    if let Some(Ok(Message::Text(command))) = socket.next().await {
        println!("Host command received: {}", command.as_str());
    }

    socket.send(Message::text(payload)).await?;
    socket.close(None).await?;
    println!("Payload sent from origin {}", origin);
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
