use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;
use tracing::{error, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::loader::{build_shop_urls, load_shop_names};
use crate::pipeline::process_shop;
use crate::traits::{PageLauncher, RenderedPage};
use crate::types::ShopResult;
use crate::writer::{ResultWriter, WrittenFiles};

/// ショップ1件の処理リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopRequest {
    pub shop_name: String,
    pub shop_url: String,
}

impl ShopRequest {
    pub fn new(shop_name: impl Into<String>, shop_url: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            shop_url: shop_url.into(),
        }
    }
}

/// ショップ1件の処理結果
#[derive(Debug, Clone)]
pub struct ShopReport {
    pub result: ShopResult,
    pub files: WrittenFiles,
}

/// tower::Serviceを実装したショップ処理サービス
///
/// 呼び出しごとにブラウザを起動し、結果を書き出してから閉じる。
pub struct ShopService<L> {
    launcher: Arc<L>,
    config: Arc<ScraperConfig>,
    writer: ResultWriter,
}

impl<L> Clone for ShopService<L> {
    fn clone(&self) -> Self {
        Self {
            launcher: Arc::clone(&self.launcher),
            config: Arc::clone(&self.config),
            writer: self.writer.clone(),
        }
    }
}

impl<L: PageLauncher + 'static> ShopService<L> {
    pub fn new(launcher: L, config: ScraperConfig) -> Self {
        let writer = ResultWriter::new(config.output_root.clone());
        Self {
            launcher: Arc::new(launcher),
            config: Arc::new(config),
            writer,
        }
    }
}

impl<L: PageLauncher + 'static> Service<ShopRequest> for ShopService<L> {
    type Response = ShopReport;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ShopRequest) -> Self::Future {
        info!("ショップ処理開始: {} ({})", req.shop_name, req.shop_url);

        let launcher = Arc::clone(&self.launcher);
        let config = Arc::clone(&self.config);
        let writer = self.writer.clone();

        Box::pin(async move {
            let page = launcher.launch().await?;

            let report = match process_shop(&page, &req.shop_name, &req.shop_url, &config).await
            {
                Ok(result) => writer
                    .write_shop_result(&result)
                    .map(|files| ShopReport { result, files }),
                Err(e) => Err(e),
            };

            // 失敗時もブラウザは閉じる
            if let Err(e) = page.close().await {
                warn!("ブラウザ終了エラー: {}", e);
            }

            let report = report?;
            info!(
                "🎉 {} 完了! (FDA {} 件, Log {} 件) → {:?}",
                req.shop_name,
                report.result.records.len(),
                report.result.failures.len(),
                writer.shop_dir(&req.shop_name)
            );
            Ok(report)
        })
    }
}

/// バッチ全体の結果
#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<ShopReport>,
    /// (ショップ名, エラーメッセージ)
    pub failed: Vec<(String, String)>,
}

/// ショップリストの全ショップを順に処理する
///
/// リストが読めない場合のみエラーを返す。ショップ単位のエラーはログに出して次へ進む。
pub async fn run_batch<L: PageLauncher + 'static>(
    config: ScraperConfig,
    launcher: L,
) -> Result<BatchReport, ScraperError> {
    let shop_names = load_shop_names(&config.shop_list_path)?;
    let shops = build_shop_urls(&config.base_url, &shop_names)?;

    let mut service = ShopService::new(launcher, config);
    let mut report = BatchReport::default();

    for (shop_name, shop_url) in shops {
        std::future::poll_fn(|cx| service.poll_ready(cx)).await?;

        match service.call(ShopRequest::new(shop_name.clone(), shop_url)).await {
            Ok(shop_report) => report.completed.push(shop_report),
            Err(e) => {
                error!("❌ {} の処理に失敗: {}", shop_name, e);
                report.failed.push((shop_name, e.to_string()));
            }
        }
    }

    Ok(report)
}
