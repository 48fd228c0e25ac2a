//! 에러 타입 정의 모듈
//!
//! flashgen에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// flashgen에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum FlashGenError {
    /// 소스 폴더가 존재하지 않음
    #[error("소스 폴더를 찾을 수 없습니다: {path}")]
    SourceNotFound { path: PathBuf },

    /// 소스 경로가 폴더가 아님
    #[error("소스 경로가 폴더가 아닙니다: {path}")]
    NotADirectory { path: PathBuf },

    /// 폴더 탐색 실패
    #[error("폴더 탐색 실패 ({path}): {reason}")]
    ScanError { path: PathBuf, reason: String },

    /// 소스 파일 읽기 실패
    #[error("파일을 읽을 수 없습니다 ({file}): {reason}")]
    ReadError { file: PathBuf, reason: String },

    /// UTF-8이 아닌 소스 파일
    #[error("UTF-8 텍스트가 아닙니다 ({file}): {reason}")]
    EncodingError { file: PathBuf, reason: String },

    /// JSON 직렬화 실패
    #[error("JSON 직렬화 실패 ({file}): {reason}")]
    SerializeError { file: PathBuf, reason: String },

    /// 파일 또는 폴더 쓰기 실패
    #[error("쓰기 실패 ({path}): {reason}")]
    WriteError { path: PathBuf, reason: String },

    /// 정적 파일 복사 실패
    #[error("정적 파일 복사 실패 ({from} -> {to}): {reason}")]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// 스레드 풀 초기화 실패
    #[error("스레드 풀 초기화 실패: {reason}")]
    ThreadPoolError { reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 유효하지 않은 구분자
    #[error("유효하지 않은 구분자: {value:?} (한 글자 또는 \"tab\"만 허용)")]
    InvalidDelimiter { value: String },
}

/// flashgen 결과 타입 별칭
pub type Result<T> = std::result::Result<T, FlashGenError>;
