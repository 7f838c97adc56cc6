use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ショップリスト読み込みエラー: {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("要素が見つかりません: {0}")]
    ElementNotFound(String),

    #[error("JavaScript実行エラー: {0}")]
    JavaScript(String),

    #[error("セレクタが不正です: {0}")]
    Selector(String),

    #[error("URLが不正です: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("Excel出力エラー: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

impl ScraperError {
    /// クリック対象が時間内に見つからなかった/押せなかったケース
    pub fn is_interaction_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::ElementNotFound(_))
    }
}
