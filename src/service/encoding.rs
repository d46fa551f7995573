//! 來源編碼偵測
//!
//! 依照固定優先順序逐一試解碼，第一個能完整解碼、不含 U+FFFD 且結果非空的
//! 候選即為偵測結果；全部失敗時退回 UTF-8。
//!
//! 單位元組編碼（windows-1252）可以解碼任何位元組序列，因此排在它後面的候選
//! 在預設表中幾乎不會被選中；偶數長度的單位元組文字也可能被 utf-16le 搶先接受。
//! 這是啟發式規則，順序不可更動。

use encoding_rs::{
    DecoderResult, Encoding, BIG5, GBK, SHIFT_JIS, UTF_16LE, UTF_8, WINDOWS_1251, WINDOWS_1252,
};
use log::{debug, warn};

use crate::error::{DecoderError, Result};
use crate::models::encoding::{CandidateEncoding, DecodeAttempt, Detection};

pub const DEFAULT_CANDIDATES: [&str; 8] = [
    "utf-8",
    "utf-16le",
    "windows-1252",
    "iso-8859-1",
    "windows-1251",
    "gb2312",
    "big5",
    "shift-jis",
];

pub const FALLBACK_LABEL: &str = "utf-8";

/// 有序且不可變的候選編碼表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingTable {
    candidates: Vec<CandidateEncoding>,
}

impl EncodingTable {
    /// 以 WHATWG 標籤建立編碼表，順序即優先順序
    pub fn from_labels(labels: &[&'static str]) -> Result<Self> {
        let candidates = labels
            .iter()
            .map(|&label| {
                Encoding::for_label(label.as_bytes())
                    .map(|encoding| CandidateEncoding::new(label, encoding))
                    .ok_or_else(|| DecoderError::UnknownEncoding(label.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(EncodingTable { candidates })
    }

    pub fn candidates(&self) -> &[CandidateEncoding] {
        &self.candidates
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.candidates.iter().map(|c| c.label).collect()
    }
}

impl Default for EncodingTable {
    fn default() -> Self {
        // iso-8859-1 與 gb2312 在 WHATWG 中分別對應 windows-1252 與 GBK
        EncodingTable {
            candidates: vec![
                CandidateEncoding::new("utf-8", UTF_8),
                CandidateEncoding::new("utf-16le", UTF_16LE),
                CandidateEncoding::new("windows-1252", WINDOWS_1252),
                CandidateEncoding::new("iso-8859-1", WINDOWS_1252),
                CandidateEncoding::new("windows-1251", WINDOWS_1251),
                CandidateEncoding::new("gb2312", GBK),
                CandidateEncoding::new("big5", BIG5),
                CandidateEncoding::new("shift-jis", SHIFT_JIS),
            ],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EncodingDetector {
    table: EncodingTable,
}

impl EncodingDetector {
    pub fn new(table: EncodingTable) -> Self {
        EncodingDetector { table }
    }

    pub fn table(&self) -> &EncodingTable {
        &self.table
    }

    /// 以完整緩衝區偵測編碼
    pub fn detect(&self, bytes: &[u8]) -> Detection {
        self.detect_prefix(bytes, true)
    }

    /// 以檔案開頭的一段位元組偵測編碼
    ///
    /// `complete` 為 false 時，結尾被截斷的多位元組序列不算錯誤。
    pub fn detect_prefix(&self, bytes: &[u8], complete: bool) -> Detection {
        for candidate in self.table.candidates() {
            let attempt = attempt_decode(candidate, bytes, complete);
            if attempt.is_accepted() {
                debug!("候選編碼 {} 通過檢查", candidate.label);
                return Detection {
                    label: candidate.label,
                    encoding: candidate.encoding,
                    fallback: false,
                };
            }
            debug!("候選編碼 {} 未通過檢查", candidate.label);
        }

        Detection {
            label: FALLBACK_LABEL,
            encoding: UTF_8,
            fallback: true,
        }
    }

    /// 以偵測結果解碼整個緩衝區
    ///
    /// 偵測通過的編碼採嚴格解碼，遇到非法序列回傳 `None`；
    /// 退回的預設編碼則以替換字元寬鬆解碼。
    pub fn decode(&self, bytes: &[u8], detection: &Detection) -> Option<String> {
        if detection.fallback {
            let (text, had_errors) = detection.encoding.decode_with_bom_removal(bytes);
            if had_errors {
                warn!("無候選編碼可用，以 {} 寬鬆解碼，內容含替換字元", detection.label);
            }
            return Some(text.into_owned());
        }
        strict_decode(detection.encoding, bytes, true)
    }
}

/// 試解碼單一候選，產生暫時性的結果
pub fn attempt_decode(candidate: &CandidateEncoding, bytes: &[u8], last: bool) -> DecodeAttempt {
    match strict_decode(candidate.encoding, bytes, last) {
        Some(text) => DecodeAttempt {
            label: candidate.label,
            corrupted: text.contains(char::REPLACEMENT_CHARACTER),
            text,
        },
        None => DecodeAttempt {
            label: candidate.label,
            text: String::new(),
            corrupted: true,
        },
    }
}

fn strict_decode(encoding: &'static Encoding, bytes: &[u8], last: bool) -> Option<String> {
    let mut decoder = encoding.new_decoder_with_bom_removal();
    let capacity = decoder.max_utf8_buffer_length_without_replacement(bytes.len())?;
    let mut text = String::with_capacity(capacity);
    let (result, _read) = decoder.decode_to_string_without_replacement(bytes, &mut text, last);
    match result {
        DecoderResult::InputEmpty => Some(text),
        DecoderResult::Malformed(_, _) | DecoderResult::OutputFull => None,
    }
}
