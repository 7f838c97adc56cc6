use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;

/// 描画済みページを操作するクライアント
///
/// 本番は chromiumoxide 実装 (`ChromePage`)、テストはメモリ上のフェイクを使う。
#[async_trait]
pub trait RenderedPage: Send + Sync {
    /// URLへ遷移（`timeout` 以内に応答がなければ `Navigation`）
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// セレクタに一致する要素が1つ以上現れるまで待機
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), ScraperError>;

    /// `document.body.scrollHeight`
    async fn scroll_height(&self) -> Result<i64, ScraperError>;

    /// 最下部までスクロール
    async fn scroll_to_bottom(&self) -> Result<(), ScraperError>;

    /// テキストを含む要素を表示してクリック
    async fn click_text(&self, text: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// セレクタに一致する全要素の textContent
    async fn text_contents(&self, selector: &str) -> Result<Vec<String>, ScraperError>;

    /// 現在のHTML
    async fn content(&self) -> Result<String, ScraperError>;

    /// リソース解放
    async fn close(&self) -> Result<(), ScraperError>;

    /// 固定時間の待機
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// ショップごとにブラウザセッションを起動する
#[async_trait]
pub trait PageLauncher: Send + Sync {
    type Page: RenderedPage + 'static;

    async fn launch(&self) -> Result<Self::Page, ScraperError>;
}
