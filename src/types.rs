//! ショップ単位の集計型

use std::fmt;

/// 商品ページから読み取ったFDA番号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdaRecord {
    pub product_url: String,
    pub fda_number: String,
}

/// FDA番号を取得できなかった理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// license info ボタンが時間内に見つからない/押せない
    InteractionTimeout,
    /// パネルは開いたがFDA番号が無い
    ExtractionEmpty,
    /// それ以外のエラー（遷移失敗など）
    Unexpected(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InteractionTimeout => write!(f, "license info not found"),
            Self::ExtractionEmpty => write!(f, "no FDA number"),
            Self::Unexpected(message) => write!(f, "error: {}", message),
        }
    }
}

/// 取得失敗した商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureEntry {
    pub product_url: String,
    pub reason: FailureReason,
}

/// 商品1件の検査結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionOutcome {
    Found(Vec<String>),
    Failed(FailureReason),
}

/// ショップ1件分の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopResult {
    pub shop_name: String,
    pub product_count: usize,
    pub records: Vec<FdaRecord>,
    pub failures: Vec<FailureEntry>,
}

impl ShopResult {
    pub fn new(shop_name: impl Into<String>) -> Self {
        Self {
            shop_name: shop_name.into(),
            ..Default::default()
        }
    }

    /// 検査結果を処理順に追加
    pub fn record(&mut self, product_url: &str, outcome: InspectionOutcome) {
        match outcome {
            InspectionOutcome::Found(numbers) => {
                self.records
                    .extend(numbers.into_iter().map(|fda_number| FdaRecord {
                        product_url: product_url.to_string(),
                        fda_number,
                    }));
            }
            InspectionOutcome::Failed(reason) => self.failures.push(FailureEntry {
                product_url: product_url.to_string(),
                reason,
            }),
        }
    }

    /// `fda_list` の内容
    pub fn fda_list(&self) -> Vec<String> {
        self.records.iter().map(|r| r.fda_number.clone()).collect()
    }

    /// `fda_log` の内容
    pub fn fda_log(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.product_url.clone()).collect()
    }
}
