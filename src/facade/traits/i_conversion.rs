use std::path::Path;
use crate::error::Result;
use crate::facade::ports::facade_ports::ReportPort;
use crate::models::conversion::{ConversionOutcome, RunSummary};

// Facade 接口，負責協調 CSV 轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 轉換單一檔案，錯誤會記錄在結果中而不會向外傳遞
    fn convert(&mut self, path: &Path) -> ConversionOutcome;

    /// 轉換目錄第一層的所有 CSV 檔案
    /// # 參數
    /// - dir: 要掃描的目錄
    /// - reporter: 進度回報
    /// # 回傳
    /// - 成功時返回彙總；目錄無法列舉時返回錯誤，不產生彙總
    fn run_all(&mut self, dir: &Path, reporter: &mut dyn ReportPort) -> Result<RunSummary>;
}
