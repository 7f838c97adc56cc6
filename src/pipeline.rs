use tracing::info;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::extractor::ProductExtractor;
use crate::inspector::ProductInspector;
use crate::renderer::render_storefront;
use crate::traits::RenderedPage;
use crate::types::ShopResult;

/// 1ショップ分: ストア描画 → 商品URL抽出 → 全商品を順に検査
///
/// ストアページのエラーは返す。商品ページのエラーは `ShopResult::failures` に入る。
pub async fn process_shop<P: RenderedPage + ?Sized>(
    page: &P,
    shop_name: &str,
    shop_url: &str,
    config: &ScraperConfig,
) -> Result<ShopResult, ScraperError> {
    let extractor = ProductExtractor::new(&config.product_link_selector, &config.base_url)?;

    let markup = render_storefront(page, shop_url, config).await?;
    let product_urls = extractor.extract(&markup);
    info!("🛒 {} → {} 商品", shop_name, product_urls.len());

    let inspector = ProductInspector::new(config);
    let mut result = ShopResult::new(shop_name);
    result.product_count = product_urls.len();

    for product_url in &product_urls {
        let outcome = inspector.inspect(page, product_url).await;
        result.record(product_url, outcome);
    }

    Ok(result)
}
