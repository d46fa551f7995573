use std::path::PathBuf;
use crate::config::config::DecodeMode;
use crate::error::Result;
use crate::service::encoding::EncodingTable;

// 應用配置結構體，封裝一次執行所需的全部參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub working_dir: PathBuf,
    pub output_dir: PathBuf,
    pub encodings: EncodingTable,
    pub mode: DecodeMode,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> Result<AppConfig>;
}
