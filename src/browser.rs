//! chromiumoxide による `RenderedPage` 実装

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout as with_timeout};
use tracing::{debug, info};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{PageLauncher, RenderedPage};

/// 要素待機のポーリング間隔
const POLL_INTERVAL_MS: u64 = 250;

const UPPER_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// ショップごとに Chrome を起動する
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    headless: bool,
    chrome_executable: Option<PathBuf>,
    request_timeout: Duration,
}

impl ChromeLauncher {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_executable: config.chrome_executable.clone(),
            request_timeout: config.nav_timeout,
        }
    }
}

#[async_trait]
impl PageLauncher for ChromeLauncher {
    type Page = ChromePage;

    async fn launch(&self) -> Result<ChromePage, ScraperError> {
        info!("ブラウザを初期化中...");

        let mut builder = BrowserConfig::builder().window_size(1280, 800);

        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder = builder
            .request_timeout(self.request_timeout)
            .arg("--disable-dev-shm-usage");

        let config = builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        info!("ブラウザ初期化完了");
        Ok(ChromePage {
            browser: Mutex::new(Some(browser)),
            page,
            handler,
        })
    }
}

/// 1ブラウザ・1ページのセッション
pub struct ChromePage {
    browser: Mutex<Option<Browser>>,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromePage {
    async fn evaluate_string(&self, script: &str) -> Result<String, ScraperError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| ScraperError::JavaScript(e.to_string()))
    }
}

#[async_trait]
impl RenderedPage for ChromePage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        debug!("goto: {}", url);
        match with_timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ScraperError::Navigation(format!("{}: {}", url, e))),
            Err(_) => Err(ScraperError::Navigation(format!(
                "{} が{}ミリ秒以内に応答しませんでした",
                url,
                timeout.as_millis()
            ))),
        }
    }

    async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), ScraperError> {
        let poll = async {
            while self.page.find_element(selector).await.is_err() {
                sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
        };

        with_timeout(timeout, poll).await.map_err(|_| {
            ScraperError::Timeout(format!(
                "{} が{}ミリ秒以内に現れませんでした",
                selector,
                timeout.as_millis()
            ))
        })
    }

    async fn scroll_height(&self) -> Result<i64, ScraperError> {
        self.page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?
            .into_value::<i64>()
            .map_err(|e| ScraperError::JavaScript(e.to_string()))
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScraperError> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        Ok(())
    }

    async fn click_text(&self, text: &str, timeout: Duration) -> Result<(), ScraperError> {
        let xpath = text_xpath(text);
        debug!("click_text xpath: {}", xpath);

        let attempt = async {
            loop {
                if let Ok(element) = self.page.find_xpath(xpath.as_str()).await {
                    if element.scroll_into_view().await.is_ok() && element.click().await.is_ok() {
                        return;
                    }
                }
                sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
        };

        with_timeout(timeout, attempt).await.map_err(|_| {
            ScraperError::Timeout(format!(
                "「{}」を{}ミリ秒以内にクリックできませんでした",
                text,
                timeout.as_millis()
            ))
        })
    }

    async fn text_contents(&self, selector: &str) -> Result<Vec<String>, ScraperError> {
        let selector =
            serde_json::to_string(selector).map_err(|e| ScraperError::JavaScript(e.to_string()))?;
        let script = format!(
            "JSON.stringify(Array.from(document.querySelectorAll({})).map(e => e.textContent || ''))",
            selector
        );

        let json = self.evaluate_string(&script).await?;
        serde_json::from_str(&json).map_err(|e| ScraperError::JavaScript(e.to_string()))
    }

    async fn content(&self) -> Result<String, ScraperError> {
        self.page
            .content()
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))
    }

    async fn close(&self) -> Result<(), ScraperError> {
        info!("ブラウザを終了中...");

        if let Some(mut browser) = self.browser.lock().await.take() {
            if let Err(e) = browser.close().await {
                debug!("Failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                debug!("Failed to wait for browser exit: {}", e);
            }
        }
        self.handler.abort();

        info!("ブラウザ終了完了");
        Ok(())
    }
}

/// XPath の文字列リテラル（シングルクォートを含む場合は concat）
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{}'", value);
    }
    if !value.contains('"') {
        return format!("\"{}\"", value);
    }

    let parts: Vec<String> = value.split('\'').map(|p| format!("'{}'", p)).collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// スクリプト等の非表示要素（とその中身）
const HIDDEN_ANCESTOR: &str =
    "ancestor-or-self::script or ancestor-or-self::style or ancestor-or-self::noscript";

/// テキストを含む最も内側の表示要素（大文字小文字無視・空白正規化・部分一致）
fn text_xpath(text: &str) -> String {
    let needle = xpath_literal(&text.trim().to_lowercase());
    let matches = format!(
        "contains(translate(normalize-space(.), '{}', '{}'), {})",
        UPPER_ALPHABET, LOWER_ALPHABET, needle
    );
    format!(
        "//body//*[{m} and not({h}) and not(.//*[{m}])]",
        m = matches,
        h = HIDDEN_ANCESTOR
    )
}
