use std::path::Path;

use log::{error, info, warn};

use crate::config::config::CSV_EXTENSION;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;
use crate::facade::ports::facade_ports::ReportPort;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOutcome, RunSummary};
use crate::models::file::FileCollectInput;
use crate::service::config_service::ConfigService;
use crate::service::encoding::EncodingDetector;
use crate::service::file::OutputDir;
use crate::service::strategy::strategy_for;
use crate::service::traits::i_service::{DecodeStrategy, FileServiceTrait};

/// 轉換管線，擁有一次執行的全部狀態：輸出目錄是否已建立與成功/失敗計數
pub struct ConversionFacade {
    file_service: Box<dyn FileServiceTrait>,
    strategy: Box<dyn DecodeStrategy>,
    detector: EncodingDetector,
    output: OutputDir,
    summary: RunSummary,
}

impl ConversionFacade {
    pub fn new(config_port: Box<dyn ConfigPort>, file_service: Box<dyn FileServiceTrait>) -> Result<Self> {
        let config = ConfigService::new(config_port).get_config()?;
        Ok(ConversionFacade::from_config(&config, file_service))
    }

    pub fn from_config(config: &AppConfig, file_service: Box<dyn FileServiceTrait>) -> Self {
        ConversionFacade::with_strategy(config, file_service, strategy_for(config.mode))
    }

    pub fn with_strategy(
        config: &AppConfig,
        file_service: Box<dyn FileServiceTrait>,
        strategy: Box<dyn DecodeStrategy>,
    ) -> Self {
        ConversionFacade {
            file_service,
            strategy,
            detector: EncodingDetector::new(config.encodings.clone()),
            output: OutputDir::new(&config.output_dir),
            summary: RunSummary::new(&config.output_dir),
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn output_dir(&self) -> &OutputDir {
        &self.output
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn convert(&mut self, path: &Path) -> ConversionOutcome {
        let result = self.strategy.transcode(path, &mut self.output, &self.detector);
        match &result {
            Ok(report) => {
                if report.fallback {
                    warn!("{} 無符合的候選編碼，預設使用 {}", path.display(), report.encoding);
                }
                info!(
                    "轉換完成：{} -> {}，編碼：{}，{} 行，{} 個跳脫序列",
                    path.display(),
                    report.output_path.display(),
                    report.encoding,
                    report.lines,
                    report.escapes
                );
            }
            Err(e) => error!("處理檔案 {} 失敗: {}", path.display(), e),
        }

        let outcome = ConversionOutcome {
            path: path.to_path_buf(),
            result,
        };
        self.summary.record(&outcome);
        outcome
    }

    fn run_all(&mut self, dir: &Path, reporter: &mut dyn ReportPort) -> Result<RunSummary> {
        let collected = self.file_service.collect_files(FileCollectInput {
            input_path: dir.to_path_buf(),
            extension: CSV_EXTENSION.to_string(),
        })?;
        reporter.discovered(dir, &collected.files);

        self.summary = RunSummary::new(self.output.path());
        let total = collected.files.len();
        info!("正在處理 {} 個檔案", total);

        for (index, file) in collected.files.iter().enumerate() {
            reporter.file_started(index + 1, total, file);
            let outcome = self.convert(file);
            reporter.file_finished(&outcome);
        }

        Ok(self.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecoderError;
    use crate::facade::ports::facade_ports::SilentReporter;
    use crate::models::file::FileCollectOutput;
    use crate::service::config_service::DefaultConfigAdapter;
    use crate::service::file::FileService;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// 回傳固定清單的檔案服務，可放入不存在的路徑
    struct StaticFileService(Vec<PathBuf>);

    impl FileServiceTrait for StaticFileService {
        fn collect_files(&self, _input: FileCollectInput) -> Result<FileCollectOutput> {
            Ok(FileCollectOutput {
                files: self.0.clone(),
                total_size: 0,
            })
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        discovered: usize,
        started: Vec<(usize, usize)>,
        finished: Vec<bool>,
    }

    impl ReportPort for RecordingReporter {
        fn discovered(&mut self, _dir: &Path, files: &[PathBuf]) {
            self.discovered = files.len();
        }

        fn file_started(&mut self, index: usize, total: usize, _path: &Path) {
            self.started.push((index, total));
        }

        fn file_finished(&mut self, outcome: &ConversionOutcome) {
            self.finished.push(outcome.is_success());
        }
    }

    fn facade_for(dir: &TempDir, files: Box<dyn FileServiceTrait>) -> ConversionFacade {
        ConversionFacade::new(Box::new(DefaultConfigAdapter::new(dir.path())), files).unwrap()
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, "a,b\n").unwrap();
        let missing = dir.path().join("missing.csv");
        let also_good = dir.path().join("other.csv");
        fs::write(&also_good, "\\u0041\n").unwrap();

        let service = StaticFileService(vec![good, missing.clone(), also_good]);
        let mut facade = facade_for(&dir, Box::new(service));
        let mut reporter = RecordingReporter::default();
        let summary = facade.run_all(dir.path(), &mut reporter).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(reporter.discovered, 3);
        assert_eq!(reporter.started, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(reporter.finished, vec![true, false, true]);
        assert_eq!(
            fs::read_to_string(dir.path().join("decoded-csv").join("other.csv")).unwrap(),
            "A\n"
        );
    }

    #[test]
    fn test_convert_reports_read_error_with_path() {
        let dir = TempDir::new().unwrap();
        let mut facade = facade_for(&dir, Box::new(FileService::new()));
        let missing = dir.path().join("gone.csv");

        let outcome = facade.convert(&missing);
        assert!(!outcome.is_success());
        match outcome.result {
            Err(DecoderError::Read { path, .. }) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(facade.summary().failed, 1);
    }

    #[test]
    fn test_output_dir_not_created_when_everything_fails() {
        let dir = TempDir::new().unwrap();
        let service = StaticFileService(vec![dir.path().join("a.csv"), dir.path().join("b.csv")]);
        let mut facade = facade_for(&dir, Box::new(service));

        let summary = facade.run_all(dir.path(), &mut RecordingReporter::default()).unwrap();
        assert_eq!(summary.failed, 2);
        assert!(!facade.output_dir().is_created());
        assert!(!dir.path().join("decoded-csv").exists());
    }

    fn assert_send_sync<T: Send + Sync + ?Sized>() {}

    #[test]
    fn test_facade_and_services_are_send_sync() {
        assert_send_sync::<ConversionFacade>();
        assert_send_sync::<dyn ConversionFacadeTrait>();
        assert_send_sync::<dyn FileServiceTrait>();
        assert_send_sync::<dyn DecodeStrategy>();

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.csv"), "x\n").unwrap();
        let mut facade = ConversionFacade::new(
            Box::new(DefaultConfigAdapter::new(dir.path())),
            Box::new(FileService::new()),
        )
        .unwrap();
        let root = dir.path().to_path_buf();
        let summary = std::thread::spawn(move || facade.run_all(&root, &mut SilentReporter))
            .join()
            .unwrap()
            .unwrap();
        assert_eq!(summary.succeeded, 1);
    }

    #[test]
    fn test_run_all_resets_summary() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.csv"), "x\n").unwrap();
        let mut facade = facade_for(&dir, Box::new(FileService::new()));

        facade.convert(&dir.path().join("nope.csv"));
        let summary = facade.run_all(dir.path(), &mut RecordingReporter::default()).unwrap();
        assert_eq!(summary.total, 1);
        assert_eq!(summary.failed, 0);
    }
}
