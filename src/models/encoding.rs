use encoding_rs::Encoding;

/// 候選編碼：顯示用標籤與實際的解碼器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEncoding {
    pub label: &'static str,
    pub encoding: &'static Encoding,
}

impl CandidateEncoding {
    pub const fn new(label: &'static str, encoding: &'static Encoding) -> Self {
        CandidateEncoding { label, encoding }
    }
}

/// 單次試解碼的結果，只存在於偵測步驟內
#[derive(Debug, Clone)]
pub struct DecodeAttempt {
    pub label: &'static str,
    pub text: String,
    pub corrupted: bool,
}

impl DecodeAttempt {
    /// 無錯誤、無 U+FFFD、且非空字串才算接受
    pub fn is_accepted(&self) -> bool {
        !self.corrupted && !self.text.is_empty()
    }
}

/// 偵測結果；`fallback` 表示沒有任何候選通過，退回預設編碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub label: &'static str,
    pub encoding: &'static Encoding,
    pub fallback: bool,
}
