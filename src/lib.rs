//! flashgen - FLASHCARD DECK GENERATOR
//!
//! 폴더 안의 CSV/TSV 플래시카드 덱 파일을 JSON 파일과 `index.json` 인덱스로 변환하고,
//! 정적 파일 폴더를 출력 폴더로 복사하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📂 **재귀 탐색**: 소스 폴더 구조를 그대로 출력 폴더에 반영
//! - 🔀 **형식 프리셋**: 쉼표 구분(csv), 탭 구분(tsv) 및 임의 구분자 지원
//! - ✂️ **행 필터**: 섹션 제목 등 카드가 아닌 행 제외 (설정 가능)
//! - 🗂️ **인덱스 생성**: 파일별 카드 수와 책(상위 폴더)을 담은 `index.json`
//! - 🚀 **병렬 처리**: Rayon을 활용한 파일별 병렬 변환, 결정적인 인덱스 순서
//! - 🧪 **드라이런 모드**: 실제 생성 없이 처리될 파일 목록 미리 확인
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법 (texts -> dist, public 복사)
//! flashgen -i ./texts -o ./dist
//!
//! # 탭 구분 덱
//! flashgen -i ./texts -o ./dist --format tsv
//! ```
//!
//! ```no_run
//! use flashgen::{run, Format, PipelineConfig};
//!
//! let config = PipelineConfig::preset(Format::Tsv, "texts", "dist")
//!     .with_public_root(Some("public".into()));
//! let summary = run(&config)?;
//! println!("{} files, {} cards", summary.files_processed(), summary.total_records());
//! # Ok::<(), flashgen::FlashGenError>(())
//! ```

pub mod assets;
pub mod cli;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod parser;
pub mod pipeline;
pub mod processor;
pub mod scanner;
pub mod stats;

// Re-exports for convenient access
pub use assets::copy_assets;
pub use cli::Args;
pub use error::{FlashGenError, Result};
pub use filter::{filter_records, RowFilter};
pub use manifest::{write_manifest, Manifest, ManifestBuilder, ManifestEntry, MANIFEST_FILE_NAME};
pub use parser::{parse, Delimiter, Record};
pub use pipeline::{run, run_with_progress, Format, PipelineConfig, ProgressEvent, RunSummary};
pub use processor::{process_file, ProcessOptions, ProcessResult};
pub use scanner::{scan, PatternMatcher, ScanOptions, SourceFile};
pub use stats::{format_bytes, format_duration, Statistics};
