use std::io;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("無法初始化日誌: {}", e)))
}

/// 進度條；報告文字經由 `println` 輸出，避免與進度條互相覆蓋
pub struct ProgressManager {
    pb: ProgressBar,
    start: Instant,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress || total == 0 {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} [{bar:40}] {pos}/{len} ETA: {eta_precise}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );
            pb
        };
        ProgressManager::with_bar(pb)
    }

    pub fn with_bar(pb: ProgressBar) -> Self {
        ProgressManager {
            pb,
            start: Instant::now(),
        }
    }

    /// 報告文字一律寫到 stdout；進度條顯示時先暫時收起再印
    pub fn println(&self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if self.pb.is_hidden() {
            println!("{}", line);
        } else {
            self.pb.suspend(|| println!("{}", line));
        }
    }

    pub fn set_message(&self, msg: String) {
        self.pb.set_message(msg);
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self, succeeded: usize, failed: usize) {
        let elapsed = self.start.elapsed().as_secs_f64();
        log::info!(
            "處理完成：成功 {} 個，失敗 {} 個，耗時 {:.2} 秒",
            succeeded,
            failed,
            elapsed
        );
        self.pb.finish_and_clear();
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

/// 以換行計數；最後一行沒有換行也算一行，空字串為零行
pub fn count_lines(text: &str) -> usize {
    let breaks = text.bytes().filter(|&b| b == b'\n').count();
    if text.is_empty() || text.ends_with('\n') {
        breaks
    } else {
        breaks + 1
    }
}
