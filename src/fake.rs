//! テスト用のメモリ上ページ

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;
use crate::traits::{PageLauncher, RenderedPage};

#[derive(Debug, Clone, Default)]
pub struct FakeProduct {
    license_button: bool,
    fda_texts: Vec<String>,
    content_missing: bool,
    click_error: bool,
    read_error: bool,
}

impl FakeProduct {
    pub fn with_license(texts: &[&str]) -> Self {
        Self {
            license_button: true,
            fda_texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    /// ボタンはあるがクリックがタイムアウト以外のエラーになる
    pub fn click_error() -> Self {
        Self {
            license_button: true,
            click_error: true,
            ..Self::default()
        }
    }

    /// パネルは開くが textContent の読み取りが失敗する
    pub fn read_error() -> Self {
        Self {
            license_button: true,
            read_error: true,
            ..Self::default()
        }
    }

    pub fn without_license() -> Self {
        Self::default()
    }

    /// `div` が一度も現れないページ
    pub fn blank() -> Self {
        Self {
            content_missing: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
enum FakeContent {
    Storefront(String),
    Product(FakeProduct),
}

#[derive(Debug, Default)]
struct FakeState {
    pages: HashMap<String, FakeContent>,
    current: Option<String>,
    heights: Vec<i64>,
    height_reads: usize,
    scroll_count: u32,
    scroll_failure_after: Option<u32>,
    height_failure_at: Option<usize>,
    visited: Vec<String>,
    clicks: Vec<String>,
    text_reads: usize,
    waits: Vec<Duration>,
    close_count: usize,
}

/// クローンは状態を共有する
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    state: Arc<Mutex<FakeState>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    fn current(&self) -> Option<FakeContent> {
        let state = self.state();
        state
            .current
            .as_ref()
            .and_then(|url| state.pages.get(url))
            .cloned()
    }

    /// `scroll_height` が順に返す値（最後の値を返し続ける）
    pub fn with_heights(self, heights: Vec<i64>) -> Self {
        self.state().heights = heights;
        self
    }

    /// `n` 回成功した後のスクロールを失敗させる
    pub fn with_scroll_failure_after(self, n: u32) -> Self {
        self.state().scroll_failure_after = Some(n);
        self
    }

    /// `n` 回目（0始まり）の `scroll_height` を失敗させる
    pub fn with_height_failure_at(self, n: usize) -> Self {
        self.state().height_failure_at = Some(n);
        self
    }

    pub fn with_storefront(self, url: &str, html: &str) -> Self {
        self.state()
            .pages
            .insert(url.to_string(), FakeContent::Storefront(html.to_string()));
        self
    }

    pub fn with_product(self, url: &str, product: FakeProduct) -> Self {
        self.state()
            .pages
            .insert(url.to_string(), FakeContent::Product(product));
        self
    }

    pub fn scroll_count(&self) -> u32 {
        self.state().scroll_count
    }

    pub fn height_reads(&self) -> usize {
        self.state().height_reads
    }

    pub fn visited(&self) -> Vec<String> {
        self.state().visited.clone()
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state().clicks.clone()
    }

    pub fn text_reads(&self) -> usize {
        self.state().text_reads
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.state().waits.clone()
    }

    pub fn close_count(&self) -> usize {
        self.state().close_count
    }
}

#[async_trait]
impl RenderedPage for FakePage {
    async fn goto(&self, url: &str, _timeout: Duration) -> Result<(), ScraperError> {
        let mut state = self.state();
        state.visited.push(url.to_string());
        if state.pages.contains_key(url) {
            state.current = Some(url.to_string());
            Ok(())
        } else {
            state.current = None;
            Err(ScraperError::Navigation(format!("{}: timeout", url)))
        }
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<(), ScraperError> {
        match self.current() {
            Some(FakeContent::Product(product)) if product.content_missing => {
                Err(ScraperError::Timeout(selector.to_string()))
            }
            Some(_) => Ok(()),
            None => Err(ScraperError::Timeout(selector.to_string())),
        }
    }

    async fn scroll_height(&self) -> Result<i64, ScraperError> {
        let mut state = self.state();
        if state.height_failure_at == Some(state.height_reads) {
            state.height_reads += 1;
            return Err(ScraperError::JavaScript("scrollHeight failed".to_string()));
        }
        let index = state.height_reads.min(state.heights.len().saturating_sub(1));
        let height = state.heights.get(index).copied().unwrap_or(0);
        state.height_reads += 1;
        Ok(height)
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        let mut state = self.state();
        if let Some(limit) = state.scroll_failure_after {
            if state.scroll_count >= limit {
                return Err(ScraperError::JavaScript("scroll failed".to_string()));
            }
        }
        state.scroll_count += 1;
        Ok(())
    }

    async fn click_text(&self, text: &str, _timeout: Duration) -> Result<(), ScraperError> {
        match self.current() {
            Some(FakeContent::Product(product)) if product.click_error => {
                Err(ScraperError::JavaScript(format!("{}: detached node", text)))
            }
            Some(FakeContent::Product(product)) if product.license_button => {
                self.state().clicks.push(text.to_string());
                Ok(())
            }
            _ => Err(ScraperError::Timeout(text.to_string())),
        }
    }

    async fn text_contents(&self, _selector: &str) -> Result<Vec<String>, ScraperError> {
        self.state().text_reads += 1;
        match self.current() {
            Some(FakeContent::Product(product)) if product.read_error => {
                Err(ScraperError::JavaScript("querySelectorAll failed".to_string()))
            }
            Some(FakeContent::Product(product)) => Ok(product.fda_texts),
            _ => Ok(Vec::new()),
        }
    }

    async fn content(&self) -> Result<String, ScraperError> {
        match self.current() {
            Some(FakeContent::Storefront(html)) => Ok(html),
            _ => Ok(String::new()),
        }
    }

    async fn close(&self) -> Result<(), ScraperError> {
        self.state().close_count += 1;
        Ok(())
    }

    async fn wait(&self, duration: Duration) {
        self.state().waits.push(duration);
    }
}

/// 起動のたびに同じ `FakePage` を返す
pub struct FakeLauncher {
    page: FakePage,
    fail: bool,
}

impl FakeLauncher {
    pub fn new(page: FakePage) -> Self {
        Self { page, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            page: FakePage::new(),
            fail: true,
        }
    }

    pub fn page(&self) -> FakePage {
        self.page.clone()
    }
}

#[async_trait]
impl PageLauncher for FakeLauncher {
    type Page = FakePage;

    async fn launch(&self) -> Result<FakePage, ScraperError> {
        if self.fail {
            return Err(ScraperError::BrowserInit("chrome not found".to_string()));
        }
        Ok(self.page.clone())
    }
}
