use clap::Parser;
use json_relay::relay::error::ErrorBody;
use json_relay::CallSpec;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Send one call through a running json-relay", long_about = None)]
struct Cli {
    /// Base URL of the relay.
    #[arg(short, long, default_value = "http://localhost:8080")]
    relay: String,

    /// HTTP method of the outbound call.
    method: String,

    /// Target URL of the outbound call.
    url: String,

    /// Request body for the outbound call.
    #[arg(short, long)]
    body: Option<String>,

    /// Print the relayed body verbatim instead of pretty-printing JSON.
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut spec = CallSpec::new(cli.method, cli.url);
    spec.body = cli.body;

    let res = reqwest::Client::new()
        .post(format!("{}/api", cli.relay.trim_end_matches('/')))
        .json(&spec)
        .send()
        .await?;

    let status = res.status();
    let bytes = res.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|e| e.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        eprintln!("Error: relay returned {}: {}", status, message);
        std::process::exit(1);
    }

    println!("{}", render(&bytes, cli.raw));
    Ok(())
}

/// Pretty-print JSON bodies; anything else is shown as-is.
fn render(bytes: &[u8], raw: bool) -> String {
    if !raw {
        if let Ok(json) = serde_json::from_slice::<Value>(bytes) {
            if let Ok(pretty) = serde_json::to_string_pretty(&json) {
                return pretty;
            }
        }
    }
    String::from_utf8_lossy(bytes).into_owned()
}
