//! ストアHTMLから商品URLを抽出

use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::ScraperError;

pub struct ProductExtractor {
    link_selector: Selector,
    base_url: Url,
}

impl ProductExtractor {
    pub fn new(link_selector: &str, base_url: &str) -> Result<Self, ScraperError> {
        let link_selector = Selector::parse(link_selector)
            .map_err(|e| ScraperError::Selector(format!("{}: {}", link_selector, e)))?;
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            link_selector,
            base_url,
        })
    }

    /// セレクタに一致するリンクを文書順に絶対URLへ変換する（重複・種類のフィルタなし）
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        let urls: Vec<String> = document
            .select(&self.link_selector)
            .filter_map(|element| element.value().attr("href"))
            .filter(|href| !href.is_empty())
            .filter_map(|href| match self.base_url.join(href) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    debug!("URL解決失敗: {} ({})", href, e);
                    None
                }
            })
            .collect();

        debug!("Extracted {} product URLs", urls.len());
        urls
    }
}
