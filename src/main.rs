//! replykit - CLI front end for the suggestion service.

use std::process;

use clap::Parser;

use replykit::api::{self, SuggestionRequest};
use replykit::{Config, SuggestionService};

#[derive(Debug, Parser)]
#[command(
    name = "replykit",
    about = "Generate AI email reply suggestions from interchangeable LLM backends"
)]
struct Cli {
    /// Subject of the email being replied to.
    #[arg(long)]
    subject: Option<String>,

    /// Body of the email being replied to.
    #[arg(long)]
    body: Option<String>,

    /// Prior thread message, oldest first. Repeatable.
    #[arg(long = "thread")]
    thread_history: Vec<String>,

    /// Provider code: groq, openai, or anthropic.
    #[arg(long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    let service = SuggestionService::new(&config);

    let request = SuggestionRequest {
        subject: cli.subject,
        email_body: cli.body,
        thread_history: cli.thread_history,
        provider: cli.provider,
    };

    match api::handle(&service, request).await {
        Ok(result) => {
            // The success payload is the only thing on stdout
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Failed to serialize response: {e}");
                    process::exit(1);
                }
            }
        }
        Err(err) => {
            match serde_json::to_string(&err.to_body()) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("{}", err.message),
            }
            process::exit(if err.is_client_error() { 2 } else { 1 });
        }
    }
}
