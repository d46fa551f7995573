//! 解碼策略
//!
//! `BufferedStrategy` 一次讀入整個檔案再偵測；`StreamingStrategy` 只用開頭一段
//! 位元組偵測，之後以固定編碼逐塊解碼、逐行修復並寫出。兩者輸出相同。

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use encoding_rs::{CoderResult, Decoder, DecoderResult};
use log::debug;

use crate::config::config::DecodeMode;
use crate::error::{DecoderError, Result};
use crate::models::conversion::TranscodeReport;
use crate::models::encoding::Detection;
use crate::service::encoding::EncodingDetector;
use crate::service::escape;
use crate::service::file::{read_file_content, write_output, OutputDir};
use crate::service::traits::i_service::DecodeStrategy;
use crate::utils::utils::{count_lines, format_file_size};

pub const DEFAULT_PREFIX_LEN: usize = 64 * 1024;
pub const DEFAULT_CHUNK_LEN: usize = 64 * 1024;
const MIN_RESERVE: usize = 4096;

pub fn strategy_for(mode: DecodeMode) -> Box<dyn DecodeStrategy> {
    match mode {
        DecodeMode::Buffered => Box::new(BufferedStrategy),
        DecodeMode::Streaming => Box::new(StreamingStrategy::new()),
    }
}

fn read_error(path: &Path) -> impl Fn(io::Error) -> DecoderError + '_ {
    move |source| DecoderError::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn write_error(path: &Path) -> impl Fn(io::Error) -> DecoderError + '_ {
    move |source| DecoderError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// 整檔讀入後偵測、解碼、修復、寫出
pub struct BufferedStrategy;

impl DecodeStrategy for BufferedStrategy {
    fn transcode(
        &self,
        source: &Path,
        output: &mut OutputDir,
        detector: &EncodingDetector,
    ) -> Result<TranscodeReport> {
        let (bytes, file_size) = read_file_content(source).map_err(read_error(source))?;
        debug!("讀取檔案：{}，大小：{}", source.display(), format_file_size(file_size as u64));

        let detection = detector.detect(&bytes);
        let text = detector
            .decode(&bytes, &detection)
            .ok_or_else(|| DecoderError::Decode {
                path: source.to_path_buf(),
                encoding: detection.label,
            })?;

        let lines = count_lines(&text);
        let (repaired, escapes) = escape::repair_counted(&text);

        let target = output.prepare(source)?;
        write_output(&target, repaired.as_bytes())?;

        Ok(TranscodeReport {
            encoding: detection.label,
            fallback: detection.fallback,
            output_path: target,
            lines,
            chars: repaired.chars().count(),
            escapes,
        })
    }
}

/// 以開頭位元組決定編碼後逐塊串流處理
pub struct StreamingStrategy {
    prefix_len: usize,
    chunk_len: usize,
}

impl StreamingStrategy {
    pub fn new() -> Self {
        StreamingStrategy::with_sizes(DEFAULT_PREFIX_LEN, DEFAULT_CHUNK_LEN)
    }

    pub fn with_sizes(prefix_len: usize, chunk_len: usize) -> Self {
        StreamingStrategy {
            prefix_len: prefix_len.max(1),
            chunk_len: chunk_len.max(1),
        }
    }
}

impl Default for StreamingStrategy {
    fn default() -> Self {
        StreamingStrategy::new()
    }
}

impl DecodeStrategy for StreamingStrategy {
    fn transcode(
        &self,
        source: &Path,
        output: &mut OutputDir,
        detector: &EncodingDetector,
    ) -> Result<TranscodeReport> {
        let file = File::open(source).map_err(read_error(source))?;
        let mut reader = BufReader::with_capacity(self.chunk_len, file);

        let mut prefix = Vec::with_capacity(self.prefix_len);
        reader
            .by_ref()
            .take(self.prefix_len as u64)
            .read_to_end(&mut prefix)
            .map_err(read_error(source))?;
        let complete = reader.fill_buf().map_err(read_error(source))?.is_empty();

        // 編碼在這裡決定後整個檔案都不再更改
        let detection = detector.detect_prefix(&prefix, complete);
        debug!(
            "以前 {} 位元組偵測 {} 的編碼：{}",
            prefix.len(),
            source.display(),
            detection.label
        );

        let target = output.prepare(source)?;
        let file = File::create(&target).map_err(write_error(&target))?;
        let mut sink = LineSink::new(BufWriter::new(file), target);
        let mut decoder = detection.encoding.new_decoder_with_bom_removal();

        decode_chunk(&mut decoder, &detection, &prefix, complete, &mut sink.pending, source)?;
        sink.emit_complete_lines()?;

        if !complete {
            let mut chunk = vec![0u8; self.chunk_len];
            loop {
                let read = match reader.read(&mut chunk) {
                    Ok(read) => read,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(read_error(source)(e)),
                };
                let last = read == 0;
                decode_chunk(&mut decoder, &detection, &chunk[..read], last, &mut sink.pending, source)?;
                if last {
                    break;
                }
                sink.emit_complete_lines()?;
            }
        }

        sink.finish(&detection)
    }
}

fn decode_chunk(
    decoder: &mut Decoder,
    detection: &Detection,
    mut input: &[u8],
    last: bool,
    dst: &mut String,
    source: &Path,
) -> Result<()> {
    loop {
        let needed = if detection.fallback {
            decoder.max_utf8_buffer_length(input.len())
        } else {
            decoder.max_utf8_buffer_length_without_replacement(input.len())
        };
        dst.reserve(needed.unwrap_or(MIN_RESERVE));

        if detection.fallback {
            let (result, read, _replaced) = decoder.decode_to_string(input, dst, last);
            input = &input[read..];
            if let CoderResult::InputEmpty = result {
                return Ok(());
            }
        } else {
            let (result, read) = decoder.decode_to_string_without_replacement(input, dst, last);
            input = &input[read..];
            match result {
                DecoderResult::InputEmpty => return Ok(()),
                DecoderResult::OutputFull => {}
                DecoderResult::Malformed(_, _) => {
                    return Err(DecoderError::Decode {
                        path: source.to_path_buf(),
                        encoding: detection.label,
                    })
                }
            }
        }
    }
}

/// 暫存未完成的一行，完整的行修復後立即寫出
struct LineSink<W: Write> {
    writer: W,
    target: PathBuf,
    pending: String,
    lines: usize,
    chars: usize,
    escapes: usize,
}

impl<W: Write> LineSink<W> {
    fn new(writer: W, target: PathBuf) -> Self {
        LineSink {
            writer,
            target,
            pending: String::new(),
            lines: 0,
            chars: 0,
            escapes: 0,
        }
    }

    fn emit_complete_lines(&mut self) -> Result<()> {
        if let Some(end) = self.pending.rfind('\n') {
            let rest = self.pending.split_off(end + 1);
            let complete = std::mem::replace(&mut self.pending, rest);
            self.lines += count_lines(&complete);
            self.write_segment(&complete)?;
        }
        Ok(())
    }

    fn write_segment(&mut self, segment: &str) -> Result<()> {
        // 跳脫序列不含換行，逐行修復與整檔修復結果相同
        let (repaired, escapes) = escape::repair_counted(segment);
        self.escapes += escapes;
        self.chars += repaired.chars().count();
        self.writer
            .write_all(repaired.as_bytes())
            .map_err(write_error(&self.target))
    }

    fn finish(mut self, detection: &Detection) -> Result<TranscodeReport> {
        let rest = std::mem::take(&mut self.pending);
        if !rest.is_empty() {
            self.lines += count_lines(&rest);
            self.write_segment(&rest)?;
        }
        self.writer.flush().map_err(write_error(&self.target))?;

        Ok(TranscodeReport {
            encoding: detection.label,
            fallback: detection.fallback,
            output_path: self.target,
            lines: self.lines,
            chars: self.chars,
            escapes: self.escapes,
        })
    }
}
