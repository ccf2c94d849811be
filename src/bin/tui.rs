// File: src/bin/tui.rs
use anyhow::Result;
use learnshelf::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Anything on stderr would tear the screen, so stay quiet unless asked.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let mut config = Config::load()?;
    // A URL on the command line becomes the new default.
    if let Some(url) = std::env::args().nth(1) {
        config.url = url;
        if let Err(e) = config.save() {
            log::warn!("Could not save config: {:#}", e);
        }
    }

    learnshelf::tui::run(config).await
}
