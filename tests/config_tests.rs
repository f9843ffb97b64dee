//! Loading configuration files from disk.

use std::fs;
use std::time::Duration;

use solvewatch::error::{ConfigError, Error};
use solvewatch::infrastructure::config::logging::LogFormat;
use solvewatch::infrastructure::config::Config;

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn loads_a_complete_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
database = "data/tracker.db"

[logging]
level = "debug"
format = "json"

[source]
api_url = "https://leetcode.cn/graphql"
recent_limit = 15
timeout_secs = 8

[polling]
interval_secs = 30
max_watermark_age_hours = 0

[report]
enabled = false
time = "21:30"
timezone = "Asia/Shanghai"
chunk_size = 512

[telegram]
enabled = true
allowed_chats = [-1001, 42]
"#,
    );

    let config = Config::load(&path).unwrap();

    assert_eq!(config.database, "data/tracker.db");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.source.api_url, "https://leetcode.cn/graphql");
    assert_eq!(config.source.recent_limit, 15);
    assert_eq!(config.polling.interval(), Duration::from_secs(30));
    assert!(config.polling.max_watermark_age().is_none());
    assert!(!config.report.enabled);
    assert_eq!(config.report.tz().unwrap(), chrono_tz::Asia::Shanghai);
    assert_eq!(config.report.chunk_size, 512);
    assert!(config.telegram.allows(-1001));
    assert!(!config.telegram.allows(7));
}

#[test]
fn empty_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "");

    let config = Config::load(&path).unwrap();

    assert_eq!(config.polling.interval(), Duration::from_secs(60));
    assert_eq!(config.report.time, "23:55");
    assert_eq!(config.report.tz().unwrap(), chrono_tz::Europe::Warsaw);
    assert!(!config.telegram.enabled);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn missing_file_falls_back_to_defaults_when_optional() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.report.chunk_size, 1024);
}

#[test]
fn bad_timezone_names_the_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[report]\ntimezone = \"Mars/Olympus\"\n");

    let err = Config::load(&path).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "report.timezone",
            ..
        })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[polling\ninterval_secs = 5\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}
