//! LINE SHOPPING FDA番号スクレイパー
//!
//! - ショップ名リストからストアページ (`https://shop.line.me/@<shop>`) を開く
//! - 遅延読み込みをスクロールで全件表示し、商品URLを抽出
//! - 商品ページの「Product license info」を開いてFDA番号を取得
//! - ショップごとに `fda_output/<shop>_fda/` へ書き出す
//!
//! # 使用例
//!
//! ```rust,ignore
//! use shop_fda_scraper::{run_batch, ChromeLauncher, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::default()
//!         .with_shop_list_path("shop_name.txt")
//!         .with_output_root("fda_output");
//!
//!     let launcher = ChromeLauncher::new(&config);
//!     let report = run_batch(config, launcher).await.unwrap();
//!     println!("completed: {}", report.completed.len());
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod extractor;
pub mod inspector;
pub mod loader;
pub mod pipeline;
pub mod renderer;
pub mod service;
pub mod traits;
pub mod types;
pub mod writer;

#[cfg(test)]
mod fake;

// 主要な型をリエクスポート
pub use browser::{ChromeLauncher, ChromePage};
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use extractor::ProductExtractor;
pub use inspector::ProductInspector;
pub use loader::{build_shop_urls, load_shop_names};
pub use pipeline::process_shop;
pub use renderer::{render_storefront, scroll_to_load_all, ScrollOutcome};
pub use service::{run_batch, BatchReport, ShopReport, ShopRequest, ShopService};
pub use traits::{PageLauncher, RenderedPage};
pub use types::{FailureEntry, FailureReason, FdaRecord, InspectionOutcome, ShopResult};
pub use writer::{ResultWriter, WrittenFiles};
