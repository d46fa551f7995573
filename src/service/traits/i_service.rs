use std::path::Path;
use crate::error::Result;
use crate::models::conversion::TranscodeReport;
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::service::encoding::EncodingDetector;
use crate::service::file::OutputDir;

// File 服務接口，負責檔案收集
pub trait FileServiceTrait: Send + Sync {
    /// 收集符合條件的檔案
    /// # 參數
    /// - input: 檔案收集的輸入參數
    /// # 回傳
    /// - 成功時返回排序後的檔案列表和總大小，目錄無法列舉時返回錯誤
    fn collect_files(&self, input: FileCollectInput) -> Result<FileCollectOutput>;
}

// 解碼策略接口，負責單一檔案的讀取、解碼、修復與寫出
pub trait DecodeStrategy: Send + Sync {
    /// 轉換單一檔案
    /// # 參數
    /// - source: 來源 CSV 路徑
    /// - output: 輸出目錄，第一次寫入前才建立
    /// - detector: 編碼偵測器，每個檔案只做一次決定
    /// # 回傳
    /// - 成功時返回統計資料，失敗時返回讀取、解碼或寫入錯誤
    fn transcode(
        &self,
        source: &Path,
        output: &mut OutputDir,
        detector: &EncodingDetector,
    ) -> Result<TranscodeReport>;
}
