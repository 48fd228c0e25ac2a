//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파이프라인 설정 변환을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::error::Result;
use crate::filter::RowFilter;
use crate::parser::Delimiter;
use crate::pipeline::{Format, PipelineConfig};
use crate::scanner::{PatternMatcher, DEFAULT_EXTENSION};

/// flashgen CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "flashgen",
    author = "YourName <your@email.com>",
    version,
    about = "FLASHCARD DECK GENERATOR - CSV/TSV 플래시카드 덱을 JSON과 인덱스로 변환하는 CLI 도구",
    long_about = r#"
FLASHCARD DECK GENERATOR
========================

소스 폴더의 모든 덱 파일(.csv)을 탐색하여
같은 폴더 구조의 JSON 파일과 index.json 인덱스를 생성하고,
정적 파일 폴더를 출력 폴더로 복사합니다.

형식 프리셋:
  csv  쉼표 구분, 모든 행 유지
  tsv  탭 구분 (.csv 확장자), format 값이 있는 행 제외

예제:
  flashgen -i ./texts -o ./dist
  flashgen -i ./texts -o ./dist --format tsv
  flashgen -i ./texts --public ./static --verbose
  flashgen -i ./texts --delimiter ';' --exclude-field kind
  flashgen -i ./texts --pattern "lesson_*" --dry-run
"#
)]
pub struct Args {
    /// 덱 파일들이 있는 소스 폴더 경로
    #[arg(short = 'i', long, env = "FLASHGEN_TEXTS", default_value = "texts")]
    pub texts: PathBuf,

    /// 출력 폴더 경로
    #[arg(short, long, env = "FLASHGEN_OUTPUT", default_value = "dist")]
    pub output: PathBuf,

    /// 출력 폴더로 복사할 정적 파일 폴더 (없으면 건너뜀)
    #[arg(long, env = "FLASHGEN_PUBLIC", default_value = "public")]
    pub public: PathBuf,

    /// 소스 형식 프리셋
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// 프리셋 구분자 대신 사용할 구분자 (한 글자 또는 "tab")
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// 이 필드 값이 비어 있지 않은 행 제외 (프리셋 필터 대체)
    #[arg(long, conflicts_with = "no_filter")]
    pub exclude_field: Option<String>,

    /// 행 필터 사용 안 함
    #[arg(long)]
    pub no_filter: bool,

    /// 소스 파일 확장자 (점 제외)
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "lesson_*", "deck?.csv")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 최대 폴더 탐색 깊이
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// 병렬 처리 스레드 수 (기본값: CPU 코어 수, 1이면 순차 처리)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// 들여쓰기 없는 JSON 출력 (기본값: 2칸 들여쓰기)
    #[arg(long)]
    pub compact: bool,

    /// 실제 생성 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 적용될 행 필터 결정
    pub fn row_filter(&self) -> RowFilter {
        if self.no_filter {
            RowFilter::KeepAll
        } else if let Some(ref field) = self.exclude_field {
            RowFilter::ExcludeNonEmpty(field.clone())
        } else {
            self.format.row_filter()
        }
    }

    /// 적용될 구분자 결정
    pub fn delimiter(&self) -> Result<Delimiter> {
        match self.delimiter {
            Some(ref d) => d.parse(),
            None => Ok(self.format.delimiter()),
        }
    }

    /// 인자를 파이프라인 설정으로 변환
    pub fn to_config(&self) -> Result<PipelineConfig> {
        Ok(
            PipelineConfig::preset(self.format, &self.texts, &self.output)
                .with_public_root(Some(self.public.clone()))
                .with_delimiter(self.delimiter()?)
                .with_row_filter(self.row_filter())
                .with_pretty(!self.compact)
                .with_extension(self.extension.clone())
                .with_matcher(PatternMatcher::new(self.pattern.clone())?)
                .with_max_depth(self.max_depth),
        )
    }
}
