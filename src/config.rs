use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://shop.line.me";
pub const DEFAULT_SHOP_LIST: &str = "shop_name.txt";
pub const DEFAULT_OUTPUT_ROOT: &str = "fda_output";

/// スクレイパー設定
///
/// 待機時間・反復上限・セレクタをまとめて保持する。
/// `PageRenderer` と `ProductInspector` はここに書かれた値だけを参照する。
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// ストアURLの基点 (`<base_url>/@<shop>`)
    pub base_url: String,
    /// ショップ名リスト (1行1ショップ)
    pub shop_list_path: PathBuf,
    /// 出力先ルート
    pub output_root: PathBuf,
    /// ヘッドレスモード（デフォルトは画面表示あり）
    pub headless: bool,
    /// Chrome実行ファイル（未指定ならchromiumoxideの自動検出）
    pub chrome_executable: Option<PathBuf>,
    /// スクロール後の待機
    pub scroll_pause: Duration,
    /// スクロール回数の上限
    pub max_scroll_iterations: u32,
    /// ページ遷移・要素待機のタイムアウト
    pub nav_timeout: Duration,
    /// license info ボタンのクリックタイムアウト
    pub click_timeout: Duration,
    /// スクロール完了後の待機
    pub settle_delay: Duration,
    /// license info パネル表示待ち
    pub panel_settle_delay: Duration,
    /// 商品リンクのセレクタ
    pub product_link_selector: String,
    /// license info ボタンの文言（部分一致・大文字小文字無視）
    pub license_button_text: String,
    /// FDA番号が表示される要素のセレクタ
    pub fda_selector: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            shop_list_path: PathBuf::from(DEFAULT_SHOP_LIST),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            headless: false,
            chrome_executable: None,
            scroll_pause: Duration::from_millis(1500),
            max_scroll_iterations: 50,
            nav_timeout: Duration::from_secs(60),
            click_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_millis(3000),
            panel_settle_delay: Duration::from_millis(2000),
            product_link_selector: "ul.grid a".to_string(),
            license_button_text: "Product license info".to_string(),
            fda_selector: "div.text-sm.text-gray-500".to_string(),
        }
    }
}

impl ScraperConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_shop_list_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.shop_list_path = path.into();
        self
    }

    pub fn with_output_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_root = path.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    pub fn with_scroll(mut self, pause: Duration, max_iterations: u32) -> Self {
        self.scroll_pause = pause;
        self.max_scroll_iterations = max_iterations;
        self
    }

    pub fn with_nav_timeout(mut self, timeout: Duration) -> Self {
        self.nav_timeout = timeout;
        self
    }

    pub fn with_click_timeout(mut self, timeout: Duration) -> Self {
        self.click_timeout = timeout;
        self
    }

    pub fn with_settle_delays(mut self, settle: Duration, panel_settle: Duration) -> Self {
        self.settle_delay = settle;
        self.panel_settle_delay = panel_settle;
        self
    }

    /// 環境変数 `CHROME_PATH` / `CHROMIUM_PATH` があれば実行ファイルとして使う
    pub fn with_chrome_from_env(self) -> Self {
        match std::env::var("CHROME_PATH").or_else(|_| std::env::var("CHROMIUM_PATH")) {
            Ok(path) if !path.trim().is_empty() => self.with_chrome_executable(path),
            _ => self,
        }
    }
}
