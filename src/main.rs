//! flashgen - FLASHCARD DECK GENERATOR
//!
//! 메인 엔트리포인트

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::process::ExitCode;

use flashgen::{
    cli::Args,
    pipeline::{init_thread_pool, run_with_progress, PipelineConfig, ProgressEvent},
    scanner::{scan, SourceFile},
};

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{} {:#}", "❌ 생성 실패:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    // 스레드 풀 설정
    if let Some(threads) = args.threads {
        init_thread_pool(threads)?;
    }

    let config = args.to_config().context("설정 오류")?;

    print_header(args, &config);

    if args.dry_run {
        let sources = scan(&config.texts_root, &config.scan).context("소스 폴더 탐색 실패")?;
        print_dry_run(&sources);
        return Ok(());
    }

    run_generation(args, &config)
}

/// 헤더 출력
fn print_header(args: &Args, config: &PipelineConfig) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!(
        "{}",
        " 🃏 FLASHCARD DECK GENERATOR".bright_white().bold()
    );
    println!("{}", "═".repeat(50).bright_blue());
    println!("  {} 소스 폴더: {:?}", "📂".bright_cyan(), config.texts_root);

    if !args.dry_run {
        println!("  {} 출력 폴더: {:?}", "📄".bright_green(), config.output_root);
    }

    println!(
        "  {} 형식: {} (구분자 {})",
        "⚙️".bright_yellow(),
        args.format,
        config.process.delimiter
    );
    println!(
        "  {} 행 필터: {}",
        "✂️".bright_yellow(),
        config.process.row_filter
    );

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if let Some(depth) = args.max_depth {
        println!("  {} 최대 깊이: {}", "📏".bright_white(), depth);
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 생성 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
}

/// 드라이런 출력
fn print_dry_run(sources: &[SourceFile]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, source) in sources.iter().enumerate() {
        println!("  {}. {}", i + 1, source.relative_display());
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        sources.len().to_string().bright_green()
    );
}

/// 생성 모드 실행
fn run_generation(args: &Args, config: &PipelineConfig) -> Result<()> {
    let pb = create_progress_bar();

    let summary = run_with_progress(config, |event| match event {
        ProgressEvent::Scanned { count } => {
            pb.set_length(count as u64);
            pb.suspend(|| {
                println!(
                    "  {} 발견된 파일 수: {}",
                    "📋".bright_white(),
                    count.to_string().bright_green()
                );
                println!("\n{}", "⚡ 변환 중...".bright_cyan());
            });
        }
        ProgressEvent::Processing(source) => {
            pb.suspend(|| println!("  {} {}", "처리 중:".dimmed(), source.relative_display()));
        }
        ProgressEvent::Processed(result) => {
            pb.inc(1);
            if args.verbose {
                pb.suspend(|| {
                    println!(
                        "  {} {} ({}장, 제외 {}행)",
                        "✓".green(),
                        result.entry.output,
                        result.entry.card_count,
                        result.rows_filtered
                    )
                });
            }
        }
        ProgressEvent::ManifestWritten(path) => {
            pb.finish_and_clear();
            println!("\n{} 인덱스 저장: {:?}", "💾".bright_cyan(), path);
        }
        ProgressEvent::CopyingAssets(public_root) => {
            println!(
                "\n{} 정적 파일 복사 중... ({:?})",
                "🗂️".bright_cyan(),
                public_root
            );
        }
        ProgressEvent::AssetCopied(asset) => {
            println!("  {} {}", "복사:".dimmed(), asset.display());
        }
    })
    .with_context(|| format!("{:?} 변환 실패", config.texts_root))?;

    summary.stats.print_summary(&summary.output_dir);

    println!(
        "\n{} 생성 완료: 파일 {}개, 카드 {}장 -> {:?}\n",
        "✅".bright_green(),
        summary.files_processed(),
        summary.total_records(),
        summary.output_dir
    );

    Ok(())
}

/// 진행률 바 생성 (파일 수는 탐색 후 설정)
fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args_for(texts: &std::path::Path, output: &std::path::Path, extra: &[&str]) -> Args {
        let mut argv = vec![
            "flashgen".to_string(),
            "-i".to_string(),
            texts.display().to_string(),
            "-o".to_string(),
            output.display().to_string(),
            "--public".to_string(),
            texts.join("no-public").display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_generation_writes_outputs() {
        let texts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(texts.path().join("book")).unwrap();
        fs::write(texts.path().join("book/deck.csv"), "front,back\na,b").unwrap();

        let args = args_for(texts.path(), out.path(), &["--verbose"]);
        run(&args).unwrap();

        assert!(out.path().join("book/deck.json").is_file());
        assert!(out.path().join("index.json").is_file());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let texts = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let output = out.path().join("dist");
        fs::write(texts.path().join("deck.csv"), "front,back\na,b").unwrap();

        let args = args_for(texts.path(), &output, &["--dry-run"]);
        run(&args).unwrap();

        assert!(!output.exists());
    }

    #[test]
    fn test_missing_texts_root_is_error() {
        let out = TempDir::new().unwrap();
        let args = args_for(&out.path().join("missing"), out.path(), &[]);

        assert!(run(&args).is_err());
        assert!(!out.path().join("index.json").exists());
    }
}
