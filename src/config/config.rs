use clap::Parser;
use std::io;
use std::path::Path;

use crate::error::{DecoderError, Result};

pub const OUTPUT_DIR: &str = "decoded-csv";
pub const CSV_EXTENSION: &str = "csv";

#[derive(Parser, Clone, Debug)]
#[command(
    name = "csv_decoder",
    about = "將目前目錄下的 CSV 檔案轉為 UTF-8 並還原 \\uXXXX 跳脫序列",
    long_about = "掃描目前工作目錄（不含子目錄）中的 .csv 檔案，偵測來源編碼後解碼，\n將文字中的 \\uXXXX 跳脫序列換成實際字元，輸出 UTF-8 檔案至 decoded-csv/，原始檔案不變。"
)]
pub struct Cli {
    #[arg(long, default_value = "warn", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

/// 解碼方式：整檔緩衝或逐塊串流
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DecodeMode {
    #[default]
    Buffered,
    Streaming,
}

pub fn validate_working_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        log::error!("工作目錄不存在：{}", dir.display());
        return Err(DecoderError::DirectoryScan {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "not a directory"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["csv_decoder"]);
        assert_eq!(cli.log_level, "warn");
        assert!(!cli.no_progress);
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["csv_decoder", "--log-level", "trace"]).is_err());
    }

    #[test]
    fn test_validate_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(validate_working_dir(dir.path()).is_ok());
        assert!(validate_working_dir(&dir.path().join("missing")).is_err());
    }
}
