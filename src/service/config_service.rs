use std::path::PathBuf;
use crate::config::config::{validate_working_dir, DecodeMode, OUTPUT_DIR};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;
use crate::service::encoding::EncodingTable;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：固定編碼表、整檔緩衝、輸出至工作目錄下的 decoded-csv
pub struct DefaultConfigAdapter {
    working_dir: PathBuf,
}

impl DefaultConfigAdapter {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        DefaultConfigAdapter {
            working_dir: working_dir.into(),
        }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        validate_working_dir(&self.working_dir)?;
        Ok(AppConfig {
            working_dir: self.working_dir.clone(),
            output_dir: self.working_dir.join(OUTPUT_DIR),
            encodings: EncodingTable::default(),
            mode: DecodeMode::Buffered,
            no_progress: true,
        })
    }
}
