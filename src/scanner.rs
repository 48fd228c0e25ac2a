//! 소스 파일 탐색 모듈
//!
//! 소스 폴더를 재귀적으로 탐색하여 변환할 파일 목록을 수집합니다.
//! 심볼릭 링크 순환이 없는 폴더 트리를 전제로 합니다.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{FlashGenError, Result};

/// 기본 소스 확장자 (CSV, TSV 프리셋 모두 `.csv` 사용)
pub const DEFAULT_EXTENSION: &str = "csv";

/// 탐색된 소스 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// 실제 파일 경로
    pub path: PathBuf,
    /// 소스 폴더 기준 상대 경로
    pub relative_path: PathBuf,
}

impl SourceFile {
    /// `/` 구분자로 표기한 상대 경로
    pub fn relative_display(&self) -> String {
        to_slash(&self.relative_path)
    }
}

/// 컴파일된 파일 이름 패턴 매처
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    pattern: Option<Pattern>,
}

impl PatternMatcher {
    /// 새 패턴 매처 생성
    ///
    /// # Examples
    /// ```
    /// use flashgen::scanner::PatternMatcher;
    ///
    /// let matcher = PatternMatcher::new(Some("lesson_*".to_string())).unwrap();
    /// assert!(matcher.matches("lesson_01.csv"));
    /// assert!(!matcher.matches("notes.csv"));
    /// ```
    pub fn new(pattern: Option<String>) -> Result<Self> {
        let pattern = pattern
            .map(|p| Pattern::new(&p).map_err(|_| FlashGenError::InvalidPattern { pattern: p }))
            .transpose()?;

        Ok(Self { pattern })
    }

    /// 파일 이름이 패턴과 일치하는지 확인 (패턴이 없으면 항상 true)
    pub fn matches(&self, file_name: &str) -> bool {
        self.pattern.as_ref().map_or(true, |p| p.matches(file_name))
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }
}

/// 탐색 옵션
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 대상 확장자 (점 없이, 대소문자 구분)
    pub extension: String,
    /// 파일 이름 패턴
    pub matcher: PatternMatcher,
    /// 최대 탐색 깊이 (루트 = 0)
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            matcher: PatternMatcher::default(),
            max_depth: None,
        }
    }
}

/// 소스 폴더 유효성 검사
pub fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(FlashGenError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }

    if !root.is_dir() {
        return Err(FlashGenError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    Ok(())
}

/// 소스 폴더를 깊이 우선으로 탐색하여 일치하는 파일 수집
///
/// 같은 폴더 안의 항목은 파일 이름 순으로 방문합니다.
/// 탐색 중 발생한 I/O 에러는 즉시 전체 실패로 처리합니다.
pub fn scan(root: &Path, options: &ScanOptions) -> Result<Vec<SourceFile>> {
    validate_root(root)?;

    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    if let Some(max_depth) = options.max_depth {
        walker = walker.max_depth(max_depth);
    }

    let mut files = Vec::new();

    for entry in walker {
        let entry = entry.map_err(|e| FlashGenError::ScanError {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_file() || !has_extension(entry.path(), &options.extension) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !options.matcher.matches(&file_name) {
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .map_err(|e| FlashGenError::ScanError {
                path: entry.path().to_path_buf(),
                reason: e.to_string(),
            })?;

        files.push(SourceFile {
            path: entry.into_path(),
            relative_path,
        });
    }

    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s == extension)
}

/// 경로를 플랫폼과 무관하게 `/` 구분자 문자열로 변환
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "a,b\n1,2").unwrap();
    }

    fn relatives(files: &[SourceFile]) -> Vec<String> {
        files.iter().map(SourceFile::relative_display).collect()
    }

    #[test]
    fn test_scan_recursive_with_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "top.csv");
        touch(temp_dir.path(), "book1/deck.csv");
        touch(temp_dir.path(), "book2/sub/deck.csv");
        touch(temp_dir.path(), "book2/readme.txt");

        let files = scan(temp_dir.path(), &ScanOptions::default()).unwrap();

        assert_eq!(
            relatives(&files),
            vec!["book1/deck.csv", "book2/sub/deck.csv", "top.csv"]
        );
        assert!(files.iter().all(|f| f.path.starts_with(temp_dir.path())));
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "upper.CSV");
        touch(temp_dir.path(), "lower.csv");

        let files = scan(temp_dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(relatives(&files), vec!["lower.csv"]);
    }

    #[test]
    fn test_scan_with_pattern() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "lesson_01.csv");
        touch(temp_dir.path(), "nested/lesson_02.csv");
        touch(temp_dir.path(), "notes.csv");

        let options = ScanOptions {
            matcher: PatternMatcher::new(Some("lesson_*".to_string())).unwrap(),
            ..Default::default()
        };
        let files = scan(temp_dir.path(), &options).unwrap();

        assert_eq!(
            relatives(&files),
            vec!["lesson_01.csv", "nested/lesson_02.csv"]
        );
    }

    #[test]
    fn test_scan_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "root.csv");
        touch(temp_dir.path(), "a/one.csv");
        touch(temp_dir.path(), "a/b/two.csv");

        let options = ScanOptions {
            max_depth: Some(2),
            ..Default::default()
        };
        let files = scan(temp_dir.path(), &options).unwrap();

        assert_eq!(relatives(&files), vec!["a/one.csv", "root.csv"]);
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        let result = scan(&missing, &ScanOptions::default());
        assert!(matches!(result, Err(FlashGenError::SourceNotFound { .. })));
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "deck.csv");

        let result = scan(&temp_dir.path().join("deck.csv"), &ScanOptions::default());
        assert!(matches!(result, Err(FlashGenError::NotADirectory { .. })));
    }

    #[test]
    fn test_pattern_matcher() {
        let matcher = PatternMatcher::new(Some("deck[0-9].csv".to_string())).unwrap();
        assert!(matcher.matches("deck1.csv"));
        assert!(!matcher.matches("deckA.csv"));
        assert!(matcher.has_pattern());

        assert!(PatternMatcher::new(None).unwrap().matches("anything"));
        assert!(PatternMatcher::new(Some("[invalid".to_string())).is_err());
    }

    #[test]
    fn test_to_slash() {
        let path: PathBuf = ["book2", "sub", "deck.csv"].iter().collect();
        assert_eq!(to_slash(&path), "book2/sub/deck.csv");
        assert_eq!(to_slash(Path::new("")), "");
    }
}
