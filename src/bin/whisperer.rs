#[path = "whisperer/app.rs"]
mod app;
#[path = "whisperer/args.rs"]
mod args;
#[path = "whisperer/interactive.rs"]
mod interactive;
#[path = "whisperer/logging.rs"]
mod logging;
#[path = "whisperer/output.rs"]
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
