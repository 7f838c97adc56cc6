//! ストアページの描画（遅延読み込み対策のスクロール）

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::RenderedPage;

/// スクロールループの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    /// スクロール後に高さを測った回数
    pub iterations: u32,
    /// 高さが伸びなくなって終了したか（false なら上限到達かエラー）
    pub stabilized: bool,
    pub final_height: i64,
}

/// 高さが伸びなくなるか `max_scroll` 回に達するまで最下部へスクロールする
///
/// 高さ取得・スクロールの失敗はループを終えるだけで、エラーは返さない。
pub async fn scroll_to_load_all<P: RenderedPage + ?Sized>(
    page: &P,
    scroll_pause: Duration,
    max_scroll: u32,
) -> Result<ScrollOutcome, ScraperError> {
    let mut last_height = match page.scroll_height().await {
        Ok(height) => height,
        Err(e) => {
            warn!("ページ高さの取得失敗、スクロールせずに続行: {}", e);
            return Ok(ScrollOutcome {
                iterations: 0,
                stabilized: false,
                final_height: 0,
            });
        }
    };
    let mut outcome = ScrollOutcome {
        iterations: 0,
        stabilized: false,
        final_height: last_height,
    };

    for _ in 0..max_scroll {
        if let Err(e) = page.scroll_to_bottom().await {
            warn!("スクロール失敗、読み込み済みの内容で続行: {}", e);
            return Ok(outcome);
        }
        page.wait(scroll_pause).await;

        let new_height = match page.scroll_height().await {
            Ok(height) => height,
            Err(e) => {
                warn!("ページ高さの取得失敗、読み込み済みの内容で続行: {}", e);
                return Ok(outcome);
            }
        };
        outcome.iterations += 1;
        outcome.final_height = new_height;
        debug!(
            "scroll {}/{}: {} -> {}",
            outcome.iterations, max_scroll, last_height, new_height
        );

        if new_height <= last_height {
            outcome.stabilized = true;
            break;
        }
        last_height = new_height;
    }

    Ok(outcome)
}

/// ストアページを開いて全商品を読み込み、HTMLを返す
///
/// 遷移・待機のエラーはそのまま返す（ショップ単位で中断）。
pub async fn render_storefront<P: RenderedPage + ?Sized>(
    page: &P,
    url: &str,
    config: &ScraperConfig,
) -> Result<String, ScraperError> {
    page.goto(url, config.nav_timeout).await?;
    page.wait_for_selector("a", config.nav_timeout).await?;

    let outcome =
        scroll_to_load_all(page, config.scroll_pause, config.max_scroll_iterations).await?;
    info!(
        "スクロール完了: {}回, height={}, stabilized={}",
        outcome.iterations, outcome.final_height, outcome.stabilized
    );

    page.wait(config.settle_delay).await;
    page.content().await
}
