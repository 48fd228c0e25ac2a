//! 인덱스(매니페스트) 생성 모듈
//!
//! 처리된 파일마다 하나의 항목을 모아 출력 폴더의 `index.json`으로 기록합니다.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FlashGenError, Result};
use crate::scanner::to_slash;

/// 출력 폴더 기준 인덱스 파일 이름
pub const MANIFEST_FILE_NAME: &str = "index.json";

/// 처리된 파일 하나에 대한 인덱스 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// 소스 상대 경로
    pub source: String,
    /// 출력 JSON 상대 경로
    pub output: String,
    /// 기록된 카드 수
    pub card_count: usize,
    /// 소스 파일의 상위 폴더 (최상위 파일은 ".")
    pub book: String,
}

impl ManifestEntry {
    /// 소스/출력 상대 경로로 항목 생성
    pub fn new(source: &Path, output: &Path, card_count: usize) -> Self {
        Self {
            source: to_slash(source),
            output: to_slash(output),
            card_count,
            book: book_of(source),
        }
    }
}

/// 전체 인덱스 문서
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// 생성 시각 (ISO-8601, UTC, 밀리초)
    pub generated_at: String,
    pub files: Vec<ManifestEntry>,
}

impl Manifest {
    /// 전체 카드 수
    pub fn total_cards(&self) -> usize {
        self.files.iter().map(|f| f.card_count).sum()
    }
}

/// 처리 순서대로 항목을 모으는 빌더
#[derive(Debug, Default)]
pub struct ManifestBuilder {
    entries: Vec<ManifestEntry>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 항목 추가 (처리 순서 유지)
    pub fn push(&mut self, entry: ManifestEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 현재 시각을 붙여 인덱스 완성
    pub fn finish(self) -> Manifest {
        Manifest {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            files: self.entries,
        }
    }
}

impl Extend<ManifestEntry> for ManifestBuilder {
    fn extend<T: IntoIterator<Item = ManifestEntry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

/// 인덱스를 출력 폴더에 기록하고 기록된 경로 반환
pub fn write_manifest(manifest: &Manifest, output_root: &Path) -> Result<PathBuf> {
    let path = output_root.join(MANIFEST_FILE_NAME);

    let json = serde_json::to_string_pretty(manifest).map_err(|e| FlashGenError::SerializeError {
        file: path.clone(),
        reason: e.to_string(),
    })?;

    fs::write(&path, json).map_err(|e| FlashGenError::WriteError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(path)
}

/// 상대 경로의 상위 폴더 (없으면 ".")
fn book_of(source: &Path) -> String {
    match source.parent().map(to_slash) {
        Some(parent) if !parent.is_empty() => parent,
        _ => ".".to_string(),
    }
}
