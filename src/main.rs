use shop_fda_scraper::{run_batch, ChromeLauncher, ScraperConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // ログ設定（RUST_LOG で上書き可）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ScraperConfig::default().with_chrome_from_env();
    let launcher = ChromeLauncher::new(&config);

    match run_batch(config, launcher).await {
        Ok(_) => info!("全ショップ処理終了"),
        Err(e) => {
            error!("エラー: {}", e);
            std::process::exit(1);
        }
    }
}
