use std::path::PathBuf;

#[derive(Clone)]
pub struct FileCollectInput {
    pub input_path: PathBuf,
    pub extension: String,
}

#[derive(Debug)]
pub struct FileCollectOutput {
    pub files: Vec<PathBuf>,
    pub total_size: u64,
}
