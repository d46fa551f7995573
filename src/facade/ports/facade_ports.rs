use std::path::{Path, PathBuf};
use crate::models::conversion::ConversionOutcome;

// 進度回報 Port，管線在各階段呼叫，預設不做任何事
pub trait ReportPort {
    fn discovered(&mut self, _dir: &Path, _files: &[PathBuf]) {}
    fn file_started(&mut self, _index: usize, _total: usize, _path: &Path) {}
    fn file_finished(&mut self, _outcome: &ConversionOutcome) {}
}

pub struct SilentReporter;

impl ReportPort for SilentReporter {}
