use std::process::ExitCode;

use csv_decoder::action::cli::process_cli_mode;

fn main() -> ExitCode {
    match process_cli_mode() {
        Ok(summary) if summary.all_succeeded() => ExitCode::SUCCESS,
        Ok(summary) => {
            log::warn!("{} 個檔案轉換失敗", summary.failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("執行中止：{}", e);
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}
