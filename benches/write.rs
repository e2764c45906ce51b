use criterion::{Criterion, criterion_group, criterion_main};
use rotalog::{FixedCaller, Level, LoggerConfig, RollingLogger, RollingPolicy, TimeThreshold};
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;

fn logger_in(dir: &Path, policy: Option<RollingPolicy>) -> RollingLogger {
    let base = LoggerConfig::with_defaults().with_log_dir(dir);
    let config = match policy {
        Some(p) => base.with_rolling_policy(p),
        None => base.without_rolling(),
    };
    RollingLogger::builder(config)
        .caller_info(FixedCaller::new("bench"))
        .build()
}

fn bench_write_no_roll(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let logger = logger_in(tmp.path(), None);

    c.bench_function("RollingLogger::info (no rolling)", |b| {
        b.iter(|| {
            logger
                .info(black_box("benchmark log message"))
                .expect("write failed");
        });
    });
}

fn bench_write_with_rolling(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let policy = RollingPolicy::new()
        .with_size_threshold(RollingPolicy::HUNDRED_KB)
        .expect("valid threshold")
        .with_time_interval(TimeThreshold::Yearly);
    let logger = logger_in(tmp.path(), Some(policy));

    c.bench_function("RollingLogger::info (100 KB rolling)", |b| {
        b.iter(|| {
            logger
                .info(black_box("benchmark log message"))
                .expect("write failed");
        });
    });
}

fn bench_filtered(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let logger = logger_in(tmp.path(), None);

    c.bench_function("RollingLogger::log (filtered)", |b| {
        b.iter(|| {
            logger
                .log(black_box(Level::Debug), "dropped")
                .expect("filtered write failed");
        });
    });
}

criterion_group!(
    benches,
    bench_write_no_roll,
    bench_write_with_rolling,
    bench_filtered,
);
criterion_main!(benches);
