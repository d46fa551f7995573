use std::path::{Path, PathBuf};

use crate::facade::ports::facade_ports::ReportPort;
use crate::models::conversion::{ConversionOutcome, RunSummary};
use crate::utils::utils::{create_progress_bar, ProgressManager};

pub const BANNER: &str = "=== CSV Decoder - UTF-8 Encoding Fixer ===";

/// 主控台回報：檔案清單、逐檔進度與最後的彙總
pub struct ConsoleReporter {
    no_progress: bool,
    progress: Option<ProgressManager>,
}

impl ConsoleReporter {
    pub fn new(no_progress: bool) -> Self {
        ConsoleReporter {
            no_progress,
            progress: None,
        }
    }

    fn println(&self, line: impl AsRef<str>) {
        match &self.progress {
            Some(pm) => pm.println(line),
            None => println!("{}", line.as_ref()),
        }
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        if let Some(pm) = &self.progress {
            pm.finish(summary.succeeded, summary.failed);
        }
        for line in summary_lines(summary) {
            println!("{}", line);
        }
    }
}

impl ReportPort for ConsoleReporter {
    fn discovered(&mut self, _dir: &Path, files: &[PathBuf]) {
        for line in discovery_lines(files) {
            println!("{}", line);
        }
        if !files.is_empty() {
            self.progress = Some(create_progress_bar(files.len() as u64, self.no_progress));
        }
    }

    fn file_started(&mut self, index: usize, total: usize, path: &Path) {
        if let Some(pm) = &self.progress {
            pm.set_message(format!("{}/{}", index, total));
        }
        self.println(format!("\nProcessing: {}", path.display()));
    }

    fn file_finished(&mut self, outcome: &ConversionOutcome) {
        for line in outcome_lines(outcome) {
            self.println(line);
        }
        if let Some(pm) = &self.progress {
            pm.inc();
        }
    }
}

pub fn discovery_lines(files: &[PathBuf]) -> Vec<String> {
    if files.is_empty() {
        return vec!["No CSV files found in current directory.".to_string()];
    }
    let mut lines = vec![format!("Found {} CSV file(s):\n", files.len())];
    for (index, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());
        lines.push(format!("  {}. {}", index + 1, name));
    }
    lines.push("\n--- Starting decode process ---".to_string());
    lines
}

pub fn outcome_lines(outcome: &ConversionOutcome) -> Vec<String> {
    match &outcome.result {
        Ok(report) => {
            let mut lines = Vec::new();
            if report.fallback {
                lines.push(format!("  Detected encoding: {} (fallback)", report.encoding));
            } else {
                lines.push(format!("  Detected encoding: {}", report.encoding));
            }
            lines.push(format!(
                "  Processed {} lines ({} characters)",
                report.lines, report.chars
            ));
            if report.escapes > 0 {
                lines.push(format!("  Found {} Unicode escape sequences", report.escapes));
                lines.push("  ✓ Decoded Unicode escapes".to_string());
            }
            lines.push(format!(
                "  ✓ Successfully decoded to: {}",
                report.output_path.display()
            ));
            lines
        }
        Err(e) => vec![format!(
            "  ✗ Error processing {}: {}",
            outcome.path.display(),
            e.cause()
        )],
    }
}

pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    vec![
        "\n=== Summary ===".to_string(),
        format!("Total files: {}", summary.total),
        format!("Successfully decoded: {}", summary.succeeded),
        format!("Failed: {}", summary.failed),
        format!("\nDecoded files saved to: {}/", summary.output_dir.display()),
    ]
}
