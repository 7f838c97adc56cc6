//! ショップごとの結果ファイル出力
//!
//! `<output_root>/<shop>_fda/<shop>_<name>.<ext>` に書き出す。
//! 空のリストはファイルを作らない。

use std::path::PathBuf;

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::error::ScraperError;
use crate::types::ShopResult;

pub const FDA_LIST_NAME: &str = "fda_list";
pub const FDA_LOG_NAME: &str = "fda_log";
pub const SHEET_NAME: &str = "Log";
pub const SHEET_HEADER: &str = "Product URL / Log";

/// 書き出したファイル
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenFiles {
    pub fda_list_txt: Option<PathBuf>,
    pub fda_log_txt: Option<PathBuf>,
    pub fda_log_xlsx: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_root: PathBuf,
}

impl ResultWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn shop_dir(&self, shop_name: &str) -> PathBuf {
        self.output_root.join(format!("{}_fda", shop_name))
    }

    fn file_path(&self, shop_name: &str, name: &str, ext: &str) -> PathBuf {
        self.shop_dir(shop_name)
            .join(format!("{}_{}.{}", shop_name, name, ext))
    }

    fn ensure_shop_dir(&self, shop_name: &str) -> Result<(), ScraperError> {
        std::fs::create_dir_all(self.shop_dir(shop_name))?;
        Ok(())
    }

    /// 1行1件のテキストファイル（既存ファイルは上書き）
    pub fn save_list_to_file(
        &self,
        shop_name: &str,
        name: &str,
        data: &[String],
    ) -> Result<Option<PathBuf>, ScraperError> {
        if data.is_empty() {
            return Ok(None);
        }
        self.ensure_shop_dir(shop_name)?;

        let path = self.file_path(shop_name, name, "txt");
        std::fs::write(&path, data.join("\n"))?;
        info!("保存: {:?} ({}件)", path, data.len());
        Ok(Some(path))
    }

    /// 1列のExcelファイル（ヘッダー行 + 1行1件）
    pub fn save_list_to_excel(
        &self,
        shop_name: &str,
        name: &str,
        data: &[String],
    ) -> Result<Option<PathBuf>, ScraperError> {
        if data.is_empty() {
            return Ok(None);
        }
        self.ensure_shop_dir(shop_name)?;

        let path = self.file_path(shop_name, name, "xlsx");
        let mut workbook = Workbook::new();
        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_NAME)?;
            worksheet.write_string(0, 0, SHEET_HEADER)?;
            for (row, item) in (1u32..).zip(data) {
                worksheet.write_string(row, 0, item.as_str())?;
            }
        }
        workbook.save(&path)?;

        info!("保存: {:?} ({}件)", path, data.len());
        Ok(Some(path))
    }

    /// FDA番号はテキストのみ、取得失敗URLはテキストとExcelの両方
    pub fn write_shop_result(&self, result: &ShopResult) -> Result<WrittenFiles, ScraperError> {
        let shop_name = result.shop_name.as_str();
        let fda_list = result.fda_list();
        let fda_log = result.fda_log();

        Ok(WrittenFiles {
            fda_list_txt: self.save_list_to_file(shop_name, FDA_LIST_NAME, &fda_list)?,
            fda_log_txt: self.save_list_to_file(shop_name, FDA_LOG_NAME, &fda_log)?,
            fda_log_xlsx: self.save_list_to_excel(shop_name, FDA_LOG_NAME, &fda_log)?,
        })
    }
}
