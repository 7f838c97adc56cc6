//! 商品ページからFDA番号を読み取る

use tracing::{error, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::RenderedPage;
use crate::types::{FailureReason, InspectionOutcome};

pub struct ProductInspector<'a> {
    config: &'a ScraperConfig,
}

impl<'a> ProductInspector<'a> {
    pub fn new(config: &'a ScraperConfig) -> Self {
        Self { config }
    }

    /// 商品1件を検査する。エラーはすべて `Failed` に変換され、呼び出し元には返らない。
    pub async fn inspect<P: RenderedPage + ?Sized>(
        &self,
        page: &P,
        product_url: &str,
    ) -> InspectionOutcome {
        let outcome = match self.try_inspect(page, product_url).await {
            Ok(outcome) => outcome,
            Err(e) => InspectionOutcome::Failed(FailureReason::Unexpected(e.to_string())),
        };

        match &outcome {
            InspectionOutcome::Found(numbers) => {
                for number in numbers {
                    info!("✅ {} ← {}", number, product_url);
                }
            }
            InspectionOutcome::Failed(FailureReason::InteractionTimeout) => {
                warn!("⚠️ license info ボタンなし → {}", product_url);
            }
            InspectionOutcome::Failed(FailureReason::ExtractionEmpty) => {
                warn!("⚠️ FDA番号なし → {}", product_url);
            }
            InspectionOutcome::Failed(FailureReason::Unexpected(message)) => {
                error!("❌ Error {} → {}", message, product_url);
            }
        }

        outcome
    }

    async fn try_inspect<P: RenderedPage + ?Sized>(
        &self,
        page: &P,
        product_url: &str,
    ) -> Result<InspectionOutcome, ScraperError> {
        page.goto(product_url, self.config.nav_timeout).await?;
        page.wait_for_selector("div", self.config.nav_timeout).await?;

        match page
            .click_text(&self.config.license_button_text, self.config.click_timeout)
            .await
        {
            Ok(()) => {}
            Err(e) if e.is_interaction_timeout() => {
                return Ok(InspectionOutcome::Failed(FailureReason::InteractionTimeout));
            }
            Err(e) => return Err(e),
        }
        page.wait(self.config.panel_settle_delay).await;

        let numbers: Vec<String> = page
            .text_contents(&self.config.fda_selector)
            .await?
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(String::from)
            .collect();

        if numbers.is_empty() {
            Ok(InspectionOutcome::Failed(FailureReason::ExtractionEmpty))
        } else {
            Ok(InspectionOutcome::Found(numbers))
        }
    }
}
