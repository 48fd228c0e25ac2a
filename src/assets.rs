//! 정적 파일 복사 모듈
//!
//! 정적 파일 폴더 전체를 출력 폴더로 그대로 복사합니다.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{FlashGenError, Result};

/// `src` 폴더 트리를 `dest` 아래로 복사
///
/// `src`가 없으면 아무것도 하지 않고, 폴더가 아니면 에러입니다.
/// 같은 이름의 기존 파일은 덮어씁니다. 파일 하나를 복사할 때마다 `on_copy`를 호출합니다.
///
/// # Returns
/// 복사된 파일들의 `src` 기준 상대 경로 (방문 순서)
pub fn copy_assets<F>(src: &Path, dest: &Path, mut on_copy: F) -> Result<Vec<PathBuf>>
where
    F: FnMut(&Path),
{
    if !src.exists() {
        return Ok(Vec::new());
    }

    if !src.is_dir() {
        return Err(FlashGenError::NotADirectory {
            path: src.to_path_buf(),
        });
    }

    let mut copied = Vec::new();

    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| FlashGenError::ScanError {
            path: e.path().unwrap_or(src).to_path_buf(),
            reason: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| FlashGenError::ScanError {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| FlashGenError::WriteError {
                path: target.clone(),
                reason: e.to_string(),
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| FlashGenError::CopyError {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                reason: e.to_string(),
            })?;
            on_copy(relative);
            copied.push(relative.to_path_buf());
        }
    }

    Ok(copied)
}
