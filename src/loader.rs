//! ショップ名リストの読み込みとストアURLの生成

use std::collections::HashSet;
use std::path::Path;

use tracing::{info, warn};
use url::Url;

use crate::error::ScraperError;

/// ショップ名を読み込む（前後の空白を除去し、空行は捨てる）
pub fn load_shop_names(path: impl AsRef<Path>) -> Result<Vec<String>, ScraperError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ScraperError::Load {
        path: path.to_path_buf(),
        source,
    })?;

    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    info!("ショップリスト読み込み: {:?} ({}件)", path, names.len());
    Ok(names)
}

/// `<base_url>/@<shop>` を入力順に生成する
///
/// 同名ショップは最初の1件だけを残す。
pub fn build_shop_urls(
    base_url: &str,
    shop_names: &[String],
) -> Result<Vec<(String, String)>, ScraperError> {
    let base = Url::parse(base_url)?;
    let mut seen = HashSet::new();
    let mut urls = Vec::with_capacity(shop_names.len());

    for name in shop_names {
        if !seen.insert(name.as_str()) {
            warn!("重複したショップ名をスキップ: {}", name);
            continue;
        }
        let url = base.join(&format!("@{}", name))?;
        urls.push((name.clone(), url.to_string()));
    }

    Ok(urls)
}
