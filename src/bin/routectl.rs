use clap::{Parser, Subcommand};
use serde::Serialize;

use widget_router::routing::{widget_router, MatchStrategy, Method};

#[derive(Parser)]
#[command(name = "routectl")]
#[command(about = "Inspect the route table and probe a running widget-router", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled route table
    Routes {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Send one request and print status, Allow and body
    Probe {
        /// HTTP method (GET, HEAD, POST, ...)
        method: String,
        /// Request path, e.g. /api/widgets/foo
        path: String,
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

#[derive(Serialize)]
struct RouteRow<'a> {
    method: Method,
    template: &'a str,
    handler: &'a str,
    params: Vec<&'a str>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Routes { json } => {
            let router = widget_router(MatchStrategy::Linear)?;
            let rows: Vec<RouteRow<'_>> = router
                .routes()
                .iter()
                .map(|route| RouteRow {
                    method: route.pattern().method(),
                    template: route.pattern().template(),
                    handler: route.name(),
                    params: route.pattern().param_names().collect(),
                })
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{:<5} {:<44} {}", row.method.as_str(), row.template, row.handler);
                }
            }
        }
        Commands::Probe { method, path, url } => {
            let method = reqwest::Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;
            let client = reqwest::Client::new();
            let res = client
                .request(method, format!("{}{}", url.trim_end_matches('/'), path))
                .send()
                .await?;

            println!("{}", res.status());
            if let Some(allow) = res.headers().get(reqwest::header::ALLOW) {
                println!("Allow: {}", allow.to_str()?);
            }
            print!("{}", res.text().await?);
        }
    }

    Ok(())
}
