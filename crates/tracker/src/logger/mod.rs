use std::{
    fs::{self, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use chrono::Local;
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "tracker";

/// Tracing guards를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: Option<WorkerGuard>,
    _stdout: WorkerGuard,
}

/// Tracing 초기화
/// stdout 로깅은 항상, `log_dir`이 주어지면 파일 로깅도 함께 설정합니다
pub fn init_tracing(log_dir: Option<&Path>) -> io::Result<TracingGuards> {
    // 1) 파일 appender (선택)
    let (file_layer, file_guard) = match log_dir {
        Some(dir) => {
            let (file_writer, guard) = daily_file_appender(dir, LOG_FILE_PREFIX)?;
            // 파일 로깅: INFO 레벨 이상만 기록
            let layer = fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("info"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // 2) stdout도 non-blocking
    let (stdout_writer, stdout_guard) = non_blocking(io::stdout());

    // 3) RUST_LOG가 없으면 info
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(fmt::layer().with_writer(stdout_writer).with_ansi(true))
        .init();

    Ok(TracingGuards {
        _file: file_guard,
        _stdout: stdout_guard,
    })
}

/// `<dir>/tracker.2025-11-29.log` 형식의 날짜별 로그 파일
fn daily_file_appender(dir: &Path, prefix: &str) -> io::Result<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(dir, prefix))?;

    Ok(non_blocking(file))
}

fn log_file_path(dir: &Path, prefix: &str) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d").to_string();
    dir.join(format!("{prefix}.{date}.log"))
}
