//! 변환 파이프라인 모듈
//!
//! 탐색 → 파일별 파싱/필터/기록 → 인덱스 기록 → 정적 파일 복사 순서로 전체 실행을 조율합니다.
//! 하나라도 실패하면 전체 실행을 중단합니다.

use clap::ValueEnum;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::copy_assets;
use crate::error::{FlashGenError, Result};
use crate::filter::RowFilter;
use crate::manifest::{write_manifest, Manifest, ManifestBuilder};
use crate::parser::Delimiter;
use crate::processor::{process_file, ProcessOptions, ProcessResult};
use crate::scanner::{scan, PatternMatcher, ScanOptions, SourceFile};
use crate::stats::Statistics;

/// TSV 프리셋에서 섹션 행을 구분하는 필드
pub const FORMAT_FIELD: &str = "format";

/// 소스 형식 프리셋
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum Format {
    /// 쉼표 구분, 필터 없음
    #[default]
    Csv,
    /// 탭 구분, `format` 값이 있는 행 제외
    Tsv,
}

impl Format {
    pub fn delimiter(&self) -> Delimiter {
        match self {
            Format::Csv => Delimiter::COMMA,
            Format::Tsv => Delimiter::TAB,
        }
    }

    pub fn row_filter(&self) -> RowFilter {
        match self {
            Format::Csv => RowFilter::KeepAll,
            Format::Tsv => RowFilter::ExcludeNonEmpty(FORMAT_FIELD.to_string()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Tsv => write!(f, "TSV"),
        }
    }
}

/// 파이프라인 설정
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// 소스 폴더
    pub texts_root: PathBuf,
    /// 출력 폴더
    pub output_root: PathBuf,
    /// 정적 파일 폴더 (없어도 됨)
    pub public_root: Option<PathBuf>,
    pub scan: ScanOptions,
    pub process: ProcessOptions,
}

impl PipelineConfig {
    /// 프리셋으로 설정 생성
    pub fn preset(
        format: Format,
        texts_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            texts_root: texts_root.into(),
            output_root: output_root.into(),
            public_root: None,
            scan: ScanOptions::default(),
            process: ProcessOptions {
                delimiter: format.delimiter(),
                row_filter: format.row_filter(),
                ..Default::default()
            },
        }
    }

    pub fn with_public_root(mut self, public_root: Option<PathBuf>) -> Self {
        self.public_root = public_root;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.process.delimiter = delimiter;
        self
    }

    pub fn with_row_filter(mut self, row_filter: RowFilter) -> Self {
        self.process.row_filter = row_filter;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.process.pretty = pretty;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.scan.extension = extension.into();
        self
    }

    pub fn with_matcher(mut self, matcher: PatternMatcher) -> Self {
        self.scan.matcher = matcher;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.scan.max_depth = max_depth;
        self
    }
}

/// 실행 중 진행 상황 알림
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    /// 소스 파일 탐색 완료
    Scanned { count: usize },
    /// 파일 처리 시작
    Processing(&'a SourceFile),
    /// 파일 처리 완료
    Processed(&'a ProcessResult),
    /// 인덱스 기록 완료
    ManifestWritten(&'a Path),
    /// 정적 파일 복사 시작
    CopyingAssets(&'a Path),
    /// 정적 파일 하나 복사 완료 (정적 폴더 기준 상대 경로)
    AssetCopied(&'a Path),
}

/// 실행 결과 요약
#[derive(Debug)]
pub struct RunSummary {
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
    pub output_dir: PathBuf,
    pub copied_assets: Vec<PathBuf>,
    pub stats: Statistics,
}

impl RunSummary {
    /// 처리한 파일 수
    pub fn files_processed(&self) -> usize {
        self.manifest.files.len()
    }

    /// 전체 카드 수
    pub fn total_records(&self) -> usize {
        self.manifest.total_cards()
    }
}

/// 전역 병렬 처리 스레드 풀 설정 (프로세스당 한 번만 가능)
pub fn init_thread_pool(threads: usize) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| FlashGenError::ThreadPoolError {
            reason: e.to_string(),
        })
}

/// 진행 알림 없이 실행
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    run_with_progress(config, |_| {})
}

/// 전체 변환 실행
///
/// 파일별 처리는 병렬로 진행되지만 인덱스 항목은 탐색 순서대로 기록됩니다.
/// 알림 콜백은 여러 스레드에서 동시에 호출될 수 있습니다.
pub fn run_with_progress<F>(config: &PipelineConfig, on_progress: F) -> Result<RunSummary>
where
    F: Fn(ProgressEvent<'_>) + Sync,
{
    fs::create_dir_all(&config.output_root).map_err(|e| FlashGenError::WriteError {
        path: config.output_root.clone(),
        reason: e.to_string(),
    })?;

    let sources = scan(&config.texts_root, &config.scan)?;
    on_progress(ProgressEvent::Scanned {
        count: sources.len(),
    });

    let stats = Statistics::new(sources.len());

    let results: Vec<ProcessResult> = sources
        .par_iter()
        .map(|source| {
            on_progress(ProgressEvent::Processing(source));
            let result = process_file(source, &config.output_root, &config.process)?;
            stats.record_file(&result);
            on_progress(ProgressEvent::Processed(&result));
            Ok(result)
        })
        .collect::<Result<_>>()?;

    let mut builder = ManifestBuilder::new();
    builder.extend(results.into_iter().map(|r| r.entry));
    let manifest = builder.finish();

    let manifest_path = write_manifest(&manifest, &config.output_root)?;
    on_progress(ProgressEvent::ManifestWritten(&manifest_path));

    let copied_assets = match &config.public_root {
        Some(public_root) => {
            on_progress(ProgressEvent::CopyingAssets(public_root));
            copy_assets(public_root, &config.output_root, |asset| {
                stats.increment_assets();
                on_progress(ProgressEvent::AssetCopied(asset));
            })?
        }
        None => Vec::new(),
    };

    Ok(RunSummary {
        manifest,
        manifest_path,
        output_dir: config.output_root.clone(),
        copied_assets,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_presets() {
        assert_eq!(Format::Csv.delimiter(), Delimiter::COMMA);
        assert!(Format::Csv.row_filter().is_identity());
        assert_eq!(Format::Tsv.delimiter(), Delimiter::TAB);
        assert!(matches!(
            Format::Tsv.row_filter(),
            RowFilter::ExcludeNonEmpty(ref field) if field == "format"
        ));
    }

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::preset(Format::Tsv, "texts", "dist")
            .with_delimiter(Delimiter::new(';'))
            .with_row_filter(RowFilter::KeepAll)
            .with_pretty(false)
            .with_extension("txt")
            .with_max_depth(Some(3));

        assert_eq!(config.process.delimiter, Delimiter::new(';'));
        assert!(config.process.row_filter.is_identity());
        assert!(!config.process.pretty);
        assert_eq!(config.scan.extension, "txt");
        assert_eq!(config.scan.max_depth, Some(3));
        assert!(config.public_root.is_none());
    }

    #[test]
    fn test_run_reports_progress_in_order() {
        let texts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(texts.path(), "a/deck.csv", "front,back\n1,2\n3,4");
        write(texts.path(), "b/deck.csv", "front,back\n5,6");

        let processed = Mutex::new(0usize);
        let manifest_written = Mutex::new(false);
        let config = PipelineConfig::preset(Format::Csv, texts.path(), out.path());

        let summary = run_with_progress(&config, |event| match event {
            ProgressEvent::Processed(_) => *processed.lock().unwrap() += 1,
            ProgressEvent::ManifestWritten(_) => *manifest_written.lock().unwrap() = true,
            _ => {}
        })
        .unwrap();

        assert_eq!(*processed.lock().unwrap(), 2);
        assert!(*manifest_written.lock().unwrap());
        assert_eq!(summary.files_processed(), 2);
        assert_eq!(summary.total_records(), 3);
        assert_eq!(summary.manifest.files[0].source, "a/deck.csv");
        assert_eq!(summary.manifest.files[1].source, "b/deck.csv");
        assert_eq!(summary.stats.get_cards_written(), 3);
    }

    #[test]
    fn test_run_creates_nested_output_root() {
        let texts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output_root = out.path().join("deep/dist");

        let summary = run(&PipelineConfig::preset(Format::Csv, texts.path(), &output_root)).unwrap();

        assert_eq!(summary.files_processed(), 0);
        assert!(output_root.join("index.json").is_file());
    }

    #[test]
    fn test_thread_pool_can_only_be_set_once() {
        let _ = init_thread_pool(2);

        let result = init_thread_pool(2);
        assert!(matches!(result, Err(FlashGenError::ThreadPoolError { .. })));
    }

    #[test]
    fn test_assets_reported_while_copying() {
        let texts = TempDir::new().unwrap();
        let public = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write(public.path(), "a.css", "a");
        write(public.path(), "js/b.js", "b");

        let seen = Mutex::new(Vec::new());
        let config = PipelineConfig::preset(Format::Csv, texts.path(), out.path())
            .with_public_root(Some(public.path().to_path_buf()));

        let summary = run_with_progress(&config, |event| {
            if let ProgressEvent::AssetCopied(asset) = event {
                assert!(out.path().join(asset).is_file());
                seen.lock().unwrap().push(asset.to_path_buf());
            }
        })
        .unwrap();

        assert_eq!(*seen.lock().unwrap(), summary.copied_assets);
        assert_eq!(summary.stats.get_assets_copied(), 2);
    }

    #[test]
    fn test_run_fails_on_missing_texts_root() {
        let out = TempDir::new().unwrap();
        let config = PipelineConfig::preset(Format::Csv, out.path().join("texts"), out.path());

        let result = run(&config);

        assert!(matches!(result, Err(FlashGenError::SourceNotFound { .. })));
        assert!(!out.path().join("index.json").exists());
    }
}
