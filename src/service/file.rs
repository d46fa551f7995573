use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{DecoderError, Result};
use crate::models::file::{FileCollectInput, FileCollectOutput};
use crate::service::traits::i_service::FileServiceTrait;
use crate::utils::utils::format_file_size;

/// 檔案服務，負責列出工作目錄中的 CSV 檔案
pub struct FileService;

impl FileService {
    pub fn new() -> Self {
        FileService
    }
}

impl Default for FileService {
    fn default() -> Self {
        FileService::new()
    }
}

impl FileServiceTrait for FileService {
    fn collect_files(&self, input: FileCollectInput) -> Result<FileCollectOutput> {
        let files = collect_files(&input.input_path, &input.extension)?;
        let total_size = files
            .iter()
            .filter_map(|path| fs::metadata(path).ok())
            .map(|metadata| metadata.len())
            .sum();
        info!(
            "在 {} 找到 {} 個檔案，總大小：{}",
            input.input_path.display(),
            files.len(),
            format_file_size(total_size)
        );
        Ok(FileCollectOutput { files, total_size })
    }
}

pub fn read_file_content(file_path: &Path) -> io::Result<(Vec<u8>, usize)> {
    let mut file = File::open(file_path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    let file_size = buffer.len();
    Ok((buffer, file_size))
}

/// 副檔名比對不分大小寫
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// 只列出目錄第一層的一般檔案，依路徑排序
///
/// 目錄本身無法列舉時中止整次執行；單一項目無法讀取（例如斷掉的符號連結）
/// 只記錄警告並略過。
pub fn collect_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let scan_error = |source: io::Error| DecoderError::DirectoryScan {
        path: dir.to_path_buf(),
        source,
    };

    if !dir.is_dir() {
        return Err(scan_error(io::Error::new(
            io::ErrorKind::NotFound,
            "not a directory",
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() >= 1 && e.path().is_some() => {
                warn!("略過無法讀取的項目：{}", e);
                continue;
            }
            Err(e) => return Err(scan_error(e.into())),
        };
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        } else {
            debug!("略過非 CSV 項目：{}", entry.path().display());
        }
    }
    Ok(files)
}

/// 輸出目錄，第一次寫入前才建立，每次執行最多建立一次
#[derive(Debug)]
pub struct OutputDir {
    path: PathBuf,
    created: bool,
}

impl OutputDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        OutputDir {
            path: path.into(),
            created: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_created(&self) -> bool {
        self.created
    }

    /// `<輸出目錄>/<輸入檔名>`；同名檔案會互相覆蓋
    pub fn target_for(&self, source: &Path) -> PathBuf {
        match source.file_name() {
            Some(name) => self.path.join(name),
            None => self.path.join("output.csv"),
        }
    }

    /// 確保目錄存在並回傳輸出路徑
    pub fn prepare(&mut self, source: &Path) -> Result<PathBuf> {
        if !self.created {
            fs::create_dir_all(&self.path).map_err(|e| DecoderError::Write {
                path: self.path.clone(),
                source: e,
            })?;
            info!("建立輸出目錄：{}", self.path.display());
            self.created = true;
        }
        Ok(self.target_for(source))
    }
}

pub fn write_output(target: &Path, content: &[u8]) -> Result<()> {
    let write_error = |source: io::Error| DecoderError::Write {
        path: target.to_path_buf(),
        source,
    };
    let file = File::create(target).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content).map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}
