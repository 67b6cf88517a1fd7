//! Tests for logger caching and level changes

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tests::*;

#[test]
fn same_module_returns_same_logger() {
    let bench = BenchFixture::new();
    let ctx = SiteContext::none();

    for module in ["jobs", "web", "scheduler"] {
        let first = bench.registry.get_logger(module, LoggerOptions::new(), &ctx).unwrap();
        let second = bench.registry.get_logger(module, LoggerOptions::new(), &ctx).unwrap();
        assert!(Arc::ptr_eq(&first, &second), "{} should be cached", module);
    }
    assert_eq!(bench.registry.len(), 3);
}

#[test]
fn cache_key_ignores_options() {
    let bench = BenchFixture::new();
    let ctx = SiteContext::none();

    let plain = bench.registry.get_logger("jobs", bench_only(), &ctx).unwrap();
    let enriched = bench
        .registry
        .get_logger("jobs", bench_only().with_more_info(true), &ctx)
        .unwrap();

    assert!(Arc::ptr_eq(&plain, &enriched));
    assert_eq!(enriched.handlers()[0].filter_count(), 0);
}

#[test]
fn new_loggers_use_current_level() {
    let bench = BenchFixture::new();
    let ctx = SiteContext::none();

    for (name, expected) in [
        ("critical", LogLevel::Critical),
        ("Warning", LogLevel::Warning),
        ("INFO", LogLevel::Info),
        ("bogus", LogLevel::Debug),
        ("ERROR", LogLevel::Error),
        (" ERROR ", LogLevel::Debug),
    ] {
        bench.registry.set_log_level(name);
        let logger = bench.registry.get_logger("jobs", LoggerOptions::new(), &ctx).unwrap();
        assert_eq!(logger.level(), expected, "level {}", name);
    }
}

#[test]
fn set_log_level_replaces_cached_loggers() {
    let bench = BenchFixture::new();
    let ctx = SiteContext::for_site("tenant1");

    let before = bench.registry.get_logger("jobs", LoggerOptions::new(), &ctx).unwrap();
    bench.registry.set_log_level("warning");

    assert!(bench.registry.try_get("jobs", Some("tenant1")).is_none());
    let after = bench.registry.get_logger("jobs", LoggerOptions::new(), &ctx).unwrap();
    assert!(!Arc::ptr_eq(&before, &after));

    // Old handles keep working at their old level
    assert_eq!(before.info(&ctx, "still here").unwrap(), 2);
    assert_eq!(after.info(&ctx, "filtered").unwrap(), 0);
    let bench_log = bench.read(&bench.bench_log("jobs"));
    assert!(bench_log.contains("still here"));
    assert!(!bench_log.contains("filtered"));
}

#[test]
fn registry_starts_at_configured_level() {
    let bench = BenchFixture::with_config(|config| config.level = LogLevel::Error);
    let logger = bench
        .registry
        .get_logger("jobs", LoggerOptions::new(), &SiteContext::none())
        .unwrap();

    assert_eq!(bench.registry.log_level(), LogLevel::Error);
    assert!(!logger.is_enabled_for(LogLevel::Warning));
    assert!(logger.is_enabled_for(LogLevel::Critical));
}

#[test]
fn empty_module_is_default_logger_with_context() {
    let bench = BenchFixture::new();
    let ctx = SiteContext::none();

    let logger = bench.registry.get_logger("", bench_only(), &ctx).unwrap();
    assert_eq!(logger.name(), "frappe");
    assert_eq!(logger.handler_paths(), vec![bench.bench_log("frappe")]);

    logger.error(&ctx, "unhandled").unwrap();
    let lines = bench.lines(&bench.bench_log("frappe"));
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(" ERROR frappe unhandled"));
    assert_eq!(lines[1], "Site: None");
    assert_eq!(lines[2], "Form Dict: None");
}

#[test]
fn unwritable_log_dir_propagates_error() {
    let bench = BenchFixture::new();
    // A file where the bench log directory should be
    let blocker = bench.root().join("blocked");
    std::fs::write(&blocker, "not a dir").unwrap();
    let registry = LoggerRegistry::new(LogConfig {
        bench_log_dir: blocker.join("logs"),
        ..LogConfig::for_bench(bench.root())
    });

    let err = registry
        .get_logger("jobs", bench_only(), &SiteContext::none())
        .unwrap_err();
    assert_eq!(err.path(), blocker.join("logs").as_path());
    assert!(registry.is_empty());
}
