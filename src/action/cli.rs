use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::action::report::{ConsoleReporter, BANNER};
use crate::config::config::{validate_working_dir, Cli, DecodeMode, OUTPUT_DIR};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::RunSummary;
use crate::service::config_service::ConfigService;
use crate::service::encoding::EncodingTable;
use crate::service::file::FileService;
use crate::utils::utils::setup_logging;

pub fn process_cli_mode() -> Result<RunSummary> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let working_dir = env::current_dir()?;
    println!("{}\n", BANNER);
    println!("Searching for CSV files in: {}\n", working_dir.display());

    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(cli, working_dir)));
    let config = config_service.get_config()?;
    log::info!(
        "工作目錄：{}，輸出目錄：{}，候選編碼：{:?}",
        config.working_dir.display(),
        config.output_dir.display(),
        config.encodings.labels()
    );

    let mut facade = ConversionFacade::from_config(&config, Box::new(FileService::new()));
    let mut reporter = ConsoleReporter::new(config.no_progress);
    let summary = facade.run_all(&config.working_dir, &mut reporter)?;

    if summary.total > 0 {
        reporter.print_summary(&summary);
    }
    Ok(summary)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
    working_dir: PathBuf,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli, working_dir: PathBuf) -> Self {
        CliConfigAdapter { cli, working_dir }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        validate_working_dir(&self.working_dir)?;
        Ok(AppConfig {
            working_dir: self.working_dir.clone(),
            output_dir: self.working_dir.join(OUTPUT_DIR),
            encodings: EncodingTable::default(),
            mode: DecodeMode::Buffered,
            no_progress: self.cli.no_progress,
        })
    }
}
