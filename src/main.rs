use anyhow::{Context, Result};
use dotenv::dotenv;
use sentiment_flow::config::FlowConfig;
use sentiment_flow::console::{help_text, ConsoleCommand, ConsoleView};
use sentiment_flow::dispatcher::Dispatcher;
use sentiment_flow::page::Page;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = FlowConfig::from_env().context("Failed to read configuration")?;
    tracing::info!("🔧 Using scrape backend at {}", config.backend_url);

    let dispatcher = Dispatcher::new(&config)?;
    let mut page = Page::new(dispatcher, ConsoleView::new(std::io::stdout()));

    // One-shot mode: `sentiment-flow <url>`
    if let Some(url) = std::env::args().nth(1) {
        page.input_url(&url);
        if page.submit().await.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match ConsoleCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Analyze(url) => {
                page.input_url(&url);
                // Failures are already shown to the user by the page.
                let _ = page.submit().await;
            }
            ConsoleCommand::Url(url) => page.input_url(&url),
            ConsoleCommand::Platform(platform) => page.click_platform(platform),
            ConsoleCommand::Submit => {
                let _ = page.submit().await;
            }
            ConsoleCommand::Another => {
                if !page.analyze_another() {
                    println!("Nothing to reset yet; analyze a product first.");
                }
            }
            ConsoleCommand::Help => println!("{}", help_text()),
            ConsoleCommand::Quit => break,
        }
    }

    Ok(())
}
