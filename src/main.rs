use clap::Parser;

use chat_gateway::config::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments / environment
    let args = Args::parse();

    // subscriber first so the invalid-DEBUG warning has somewhere to go
    chat_gateway::init_tracing(args.debug == "True");
    let debug = args.debug_enabled();

    if args.api_key.is_none() {
        tracing::warn!("API_KEY is not set. External services will not be available.");
    }
    if debug {
        tracing::info!("Debug mode is ON");
    }

    chat_gateway::server::serve(args).await
}
