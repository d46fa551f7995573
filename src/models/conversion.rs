use std::path::{Path, PathBuf};
use crate::error::DecoderError;

/// 單一檔案成功轉換後的統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeReport {
    pub encoding: &'static str,
    pub fallback: bool,
    pub output_path: PathBuf,
    pub lines: usize,
    pub chars: usize,
    pub escapes: usize,
}

/// 單一檔案的處理結果
#[derive(Debug)]
pub struct ConversionOutcome {
    pub path: PathBuf,
    pub result: Result<TranscodeReport, DecoderError>,
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 一次執行的彙總，不跨執行保存
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub output_dir: PathBuf,
}

impl RunSummary {
    pub fn new(output_dir: &Path) -> Self {
        RunSummary {
            total: 0,
            succeeded: 0,
            failed: 0,
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn record(&mut self, outcome: &ConversionOutcome) {
        self.total += 1;
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
