//! 소스 파일 처리 모듈
//!
//! 개별 소스 파일의 읽기, 파싱, 필터링, JSON 기록을 담당합니다.

use memmap2::Mmap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{FlashGenError, Result};
use crate::filter::{filter_records, RowFilter};
use crate::manifest::ManifestEntry;
use crate::parser::{parse, Delimiter, Record};
use crate::scanner::SourceFile;

/// 이 크기 이상의 소스 파일은 메모리 매핑으로 읽음
pub const DEFAULT_MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

/// 파일 처리 옵션
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// 필드 구분자
    pub delimiter: Delimiter,
    /// 행 필터
    pub row_filter: RowFilter,
    /// Pretty 출력 여부 (2칸 들여쓰기)
    pub pretty: bool,
    /// 대용량 파일 임계값
    pub mmap_threshold: u64,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::COMMA,
            row_filter: RowFilter::KeepAll,
            pretty: true,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

/// 파일 처리 결과
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// 인덱스 항목
    pub entry: ManifestEntry,
    /// 기록된 JSON 파일 경로
    pub output_path: PathBuf,
    /// 필터로 제외된 행 수
    pub rows_filtered: usize,
    /// 원본 파일 크기
    pub bytes_read: u64,
    /// 기록된 JSON 크기
    pub bytes_written: u64,
}

/// 소스 상대 경로에 대응하는 출력 상대 경로 (확장자만 `.json`으로 교체)
pub fn output_relative_path(relative: &Path) -> PathBuf {
    relative.with_extension("json")
}

/// 단일 소스 파일 처리
///
/// # Arguments
/// * `source` - 처리할 소스 파일
/// * `output_root` - 출력 폴더
/// * `options` - 처리 옵션
///
/// # Returns
/// 기록된 파일 정보와 인덱스 항목. 읽기/쓰기 실패 시 에러.
pub fn process_file(
    source: &SourceFile,
    output_root: &Path,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let (records, bytes_read) = read_source(&source.path, options.mmap_threshold, |content| {
        parse(content, options.delimiter)
    })?;

    let parsed = records.len();
    let records = filter_records(records, &options.row_filter);
    let rows_filtered = parsed - records.len();

    let output_relative = output_relative_path(&source.relative_path);
    let output_path = output_root.join(&output_relative);
    let bytes_written = write_records(&output_path, &records, options.pretty)?;

    Ok(ProcessResult {
        entry: ManifestEntry::new(&source.relative_path, &output_relative, records.len()),
        output_path,
        rows_filtered,
        bytes_read,
        bytes_written,
    })
}

/// 소스 파일을 UTF-8 텍스트로 읽어 `f`에 전달
///
/// 임계값 이상의 파일은 매핑된 메모리에서 바로 디코딩합니다.
///
/// # Returns
/// `f`의 결과와 원본 파일 크기
pub fn read_source<T>(
    path: &Path,
    mmap_threshold: u64,
    f: impl FnOnce(&str) -> T,
) -> Result<(T, u64)> {
    let file_size = fs::metadata(path)
        .map_err(|e| FlashGenError::ReadError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .len();

    let output = if file_size >= mmap_threshold {
        let mmap = map_file(path)?;
        f(decode(path, &mmap)?)
    } else {
        let bytes = fs::read(path).map_err(|e| FlashGenError::ReadError {
            file: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        f(decode(path, &bytes)?)
    };

    Ok((output, file_size))
}

fn decode<'a>(path: &Path, bytes: &'a [u8]) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|e| FlashGenError::EncodingError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// 메모리 매핑 (대용량 파일용)
fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path).map_err(|e| FlashGenError::ReadError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    unsafe {
        Mmap::map(&file).map_err(|e| FlashGenError::ReadError {
            file: path.to_path_buf(),
            reason: format!("메모리 매핑 실패: {}", e),
        })
    }
}

/// 레코드 배열을 JSON 파일로 기록하고 기록한 바이트 수 반환
fn write_records(path: &Path, records: &[Record], pretty: bool) -> Result<u64> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| FlashGenError::WriteError {
            path: parent.to_path_buf(),
            reason: e.to_string(),
        })?;
    }

    let json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(|e| FlashGenError::SerializeError {
        file: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    fs::write(path, &json).map_err(|e| FlashGenError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(json.len() as u64)
}
