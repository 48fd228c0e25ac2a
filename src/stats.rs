//! 통계 및 유틸리티 모듈
//!
//! 처리 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crate::processor::ProcessResult;

/// 처리 통계 구조체
#[derive(Debug, Default)]
pub struct Statistics {
    /// 탐색된 소스 파일 수
    pub total_files: usize,
    /// 처리 완료된 파일 수
    pub files_processed: AtomicUsize,
    /// 기록된 카드 수
    pub cards_written: AtomicUsize,
    /// 필터로 제외된 행 수
    pub rows_filtered: AtomicUsize,
    /// 복사된 정적 파일 수
    pub assets_copied: AtomicUsize,
    /// 읽은 총 바이트
    pub total_bytes_read: AtomicU64,
    /// 쓴 총 바이트
    pub total_bytes_written: AtomicU64,
    /// 처리 시작 시간
    start_time: Option<Instant>,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// 파일 하나의 처리 결과 반영
    pub fn record_file(&self, result: &ProcessResult) {
        self.files_processed.fetch_add(1, Ordering::Relaxed);
        self.cards_written
            .fetch_add(result.entry.card_count, Ordering::Relaxed);
        self.rows_filtered
            .fetch_add(result.rows_filtered, Ordering::Relaxed);
        self.total_bytes_read
            .fetch_add(result.bytes_read, Ordering::Relaxed);
        self.total_bytes_written
            .fetch_add(result.bytes_written, Ordering::Relaxed);
    }

    /// 정적 파일 카운트 증가
    pub fn increment_assets(&self) {
        self.assets_copied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_files_processed(&self) -> usize {
        self.files_processed.load(Ordering::Relaxed)
    }

    pub fn get_cards_written(&self) -> usize {
        self.cards_written.load(Ordering::Relaxed)
    }

    pub fn get_rows_filtered(&self) -> usize {
        self.rows_filtered.load(Ordering::Relaxed)
    }

    pub fn get_assets_copied(&self) -> usize {
        self.assets_copied.load(Ordering::Relaxed)
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self, output_dir: &Path) {
        let bytes_read = self.total_bytes_read.load(Ordering::Relaxed);
        let bytes_written = self.total_bytes_written.load(Ordering::Relaxed);

        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 생성 완료".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!(
            "  {} 처리한 파일:  {}",
            "📁".bright_cyan(),
            self.get_files_processed().to_string().green()
        );
        println!(
            "  {} 전체 카드:    {}",
            "🃏".bright_green(),
            self.get_cards_written().to_string().green()
        );

        let filtered = self.get_rows_filtered();
        if filtered > 0 {
            println!(
                "  {} 제외된 행:    {}",
                "✂️".bright_yellow(),
                filtered.to_string().yellow()
            );
        }

        println!(
            "  {} 정적 파일:    {}",
            "🗂️".bright_magenta(),
            self.get_assets_copied()
        );
        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(bytes_written)
        );
        println!(
            "  {} 처리 시간:    {}",
            "⏱️".bright_cyan(),
            format_duration(self.elapsed())
        );
        println!(
            "  {} 출력 폴더:    {}",
            "📂".bright_white(),
            output_dir.display()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Examples
/// ```
/// use flashgen::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// 경과 시간을 읽기 쉬운 형식으로 변환
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 3600 {
        format!("{}시간 {}분", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}분 {}초", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{:03}초", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}
