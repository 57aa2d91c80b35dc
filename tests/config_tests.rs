use optimizeql::{
    compare::SqlDialect,
    config::{CompareConfig, Config}
};

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.executor.base_url, "http://localhost:8000/api/v1");
    assert!(config.executor.api_key.is_none());
    assert_eq!(config.executor.request_timeout_ms, 60_000);
    assert!(config.log.filter.is_none());
}

#[test]
fn test_default_retry_config() {
    let config = Config::default();

    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.retry.initial_delay_ms, 1000);
    assert_eq!(config.retry.max_delay_ms, 30000);
    assert_eq!(config.retry.backoff_factor, 2.0);
}

#[test]
fn test_default_compare_config() {
    let config = CompareConfig::default();

    assert_eq!(config.row_limit, 100);
    assert_eq!(config.statement_timeout_ms, 30_000);
    assert_eq!(config.dialect, SqlDialect::Generic);
}

#[test]
fn test_parse_full_config() {
    let config = Config::parse(
        r#"
[executor]
base_url = "https://exec.internal/api/v1"
api_key = "k-123"
request_timeout_ms = 5000

[compare]
row_limit = 250
statement_timeout_ms = 10000
dialect = "postgresql"

[retry]
max_retries = 1
initial_delay_ms = 10
max_delay_ms = 100
backoff_factor = 3.0

[log]
filter = "optimizeql=debug"
"#
    )
    .unwrap();

    assert_eq!(config.executor.base_url, "https://exec.internal/api/v1");
    assert_eq!(config.executor.api_key.as_deref(), Some("k-123"));
    assert_eq!(config.executor.request_timeout_ms, 5000);
    assert_eq!(config.compare.row_limit, 250);
    assert_eq!(config.compare.statement_timeout_ms, 10_000);
    assert_eq!(config.compare.dialect, SqlDialect::PostgreSQL);
    assert_eq!(config.retry.max_retries, 1);
    assert_eq!(config.log.filter.as_deref(), Some("optimizeql=debug"));
}

#[test]
fn test_partial_sections_keep_defaults() {
    let config = Config::parse("[executor]\napi_key = \"abc\"\n").unwrap();

    assert_eq!(config.executor.base_url, "http://localhost:8000/api/v1");
    assert_eq!(config.executor.api_key.as_deref(), Some("abc"));
    assert_eq!(config.compare.row_limit, 100);
}

#[test]
fn test_empty_config() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.compare.row_limit, 100);
}

#[test]
fn test_row_limit_out_of_range() {
    assert!(Config::parse("[compare]\nrow_limit = 0").is_err());
    assert!(Config::parse("[compare]\nrow_limit = 1001").is_err());
    assert!(Config::parse("[compare]\nrow_limit = 1000").is_ok());
}

#[test]
fn test_unknown_dialect_rejected() {
    assert!(Config::parse("[compare]\ndialect = \"oracle\"").is_err());
}

#[test]
fn test_invalid_toml() {
    assert!(Config::parse("[executor\nbase_url = ").is_err());
}
