use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 轉換過程中的錯誤分類
///
/// `Read`、`Decode`、`Write` 只影響單一檔案，由管線在檔案邊界捕捉；
/// `DirectoryScan` 會中止整次執行。
#[derive(Error, Debug)]
pub enum DecoderError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("{} is not valid {encoding}", path.display())]
    Decode { path: PathBuf, encoding: &'static str },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot scan directory {}: {source}", path.display())]
    DirectoryScan { path: PathBuf, source: io::Error },

    #[error("unknown encoding label: {0}")]
    UnknownEncoding(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DecoderError {
    /// 不含輸入檔路徑的錯誤原因，供逐檔回報使用
    ///
    /// 寫入錯誤的路徑是輸出檔，與輸入檔不同，因此保留。
    pub fn cause(&self) -> String {
        match self {
            DecoderError::Read { source, .. } => source.to_string(),
            DecoderError::Decode { encoding, .. } => format!("not valid {encoding}"),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecoderError>;
