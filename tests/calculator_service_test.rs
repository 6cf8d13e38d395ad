// End-to-end checks of the calculator-microservice logger against real files.
use calculator_logger::config::{COMBINED_LOG_FILE, ERROR_LOG_FILE, SERVICE_NAME};
use calculator_logger::{Fields, Level, Logger, LoggerBuilder, LoggerConfig, create_logger};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    _dir: TempDir,
    logger: Logger,
    console: Arc<Mutex<Vec<u8>>>,
    error_log: std::path::PathBuf,
    combined_log: std::path::PathBuf,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");
        let console = Arc::new(Mutex::new(Vec::<u8>::new()));

        let logger = LoggerBuilder::new(LoggerConfig::calculator_service(&log_dir))
            .console_writer(console.clone())
            .build()
            .unwrap();

        Self {
            error_log: log_dir.join(ERROR_LOG_FILE),
            combined_log: log_dir.join(COMBINED_LOG_FILE),
            _dir: dir,
            logger,
            console,
        }
    }

    fn console_lines(&self) -> Vec<String> {
        String::from_utf8(self.console.lock().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn error_records(&self) -> Vec<Value> {
        read_json_lines(&self.error_log)
    }

    fn combined_records(&self) -> Vec<Value> {
        read_json_lines(&self.combined_log)
    }
}

fn read_json_lines(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[test]
fn test_exactly_three_transports_are_active() {
    let harness = Harness::new();

    assert_eq!(harness.logger.transport_count(), 3);

    let names = harness.logger.transport_names();
    assert_eq!(names[0], "console");
    assert!(names[1].ends_with(ERROR_LOG_FILE));
    assert!(names[2].ends_with(COMBINED_LOG_FILE));
}

#[test]
fn test_log_files_exist_after_construction() {
    let harness = Harness::new();

    assert!(harness.error_log.exists());
    assert!(harness.combined_log.exists());
    assert!(harness.error_records().is_empty());
}

#[test]
fn test_info_reaches_combined_and_console_only() {
    let harness = Harness::new();

    harness.logger.info("calc started");

    let combined = harness.combined_records();
    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0]["message"], "calc started");
    assert_eq!(combined[0]["level"], "info");
    assert_eq!(combined[0]["service"], SERVICE_NAME);
    assert!(combined[0]["timestamp"].is_string());

    assert!(harness.error_records().is_empty());

    let console = harness.console_lines();
    assert_eq!(
        console,
        vec![r#"info: calc started {"service":"calculator-microservice"}"#.to_string()]
    );
}

#[test]
fn test_error_reaches_every_transport() {
    let harness = Harness::new();

    harness.logger.error("division by zero");

    let errors = harness.error_records();
    let combined = harness.combined_records();
    assert_eq!(errors.len(), 1);
    assert_eq!(combined.len(), 1);
    assert_eq!(errors[0]["message"], "division by zero");
    assert_eq!(combined[0]["message"], "division by zero");
    assert_eq!(errors[0]["service"], SERVICE_NAME);

    let console = harness.console_lines();
    assert_eq!(console.len(), 1);
    assert!(console[0].starts_with("error: division by zero"));
}

#[test]
fn test_warn_stays_out_of_error_log() {
    let harness = Harness::new();

    harness.logger.warn("precision loss");

    assert!(harness.error_records().is_empty());
    assert_eq!(harness.combined_records().len(), 1);
    assert_eq!(harness.console_lines().len(), 1);
}

#[test]
fn test_debug_is_dropped_everywhere() {
    let harness = Harness::new();

    harness.logger.debug("operand parsed");
    harness.logger.verbose("cache hit");

    assert!(harness.combined_records().is_empty());
    assert!(harness.error_records().is_empty());
    assert!(harness.console_lines().is_empty());
}

#[test]
fn test_console_is_human_readable_not_json() {
    let harness = Harness::new();

    harness
        .logger
        .info_with("calc done", fields(json!({"result": 2})));

    let console = harness.console_lines();
    assert_eq!(console.len(), 1);
    assert!(serde_json::from_str::<Value>(&console[0]).is_err());
    assert!(console[0].starts_with("info: calc done "));

    let combined = harness.combined_records();
    assert_eq!(combined[0]["result"], 2);
}

#[test]
fn test_multiline_message_stays_on_one_console_line() {
    let harness = Harness::new();

    harness.logger.error("division by zero\nrhs was 0");

    let expected = r#"error: division by zero\nrhs was 0 {"service":"calculator-microservice"}"#;
    assert_eq!(harness.console_lines(), vec![expected.to_string()]);

    let errors = harness.error_records();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "division by zero\nrhs was 0");
}

#[test]
fn test_structured_fields_land_in_files() {
    let harness = Harness::new();

    harness.logger.error_with(
        "division by zero",
        fields(json!({"lhs": 10, "rhs": 0, "op": "div"})),
    );

    for record in harness
        .error_records()
        .into_iter()
        .chain(harness.combined_records())
    {
        assert_eq!(record["lhs"], 10);
        assert_eq!(record["rhs"], 0);
        assert_eq!(record["op"], "div");
        assert_eq!(record["service"], SERVICE_NAME);
    }
}

#[test]
fn test_records_append_across_logger_instances() {
    let dir = TempDir::new().unwrap();
    let quiet_logger = || {
        LoggerBuilder::new(LoggerConfig::calculator_service(dir.path()))
            .console_writer(Arc::new(Mutex::new(std::io::sink())))
            .build()
            .unwrap()
    };

    {
        let first = quiet_logger();
        first.error("first run");
        first.close().unwrap();
    }
    let second = quiet_logger();
    second.error("second run");
    second.close().unwrap();

    let errors = read_json_lines(&dir.path().join(ERROR_LOG_FILE));
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["message"], "first run");
    assert_eq!(errors[1]["message"], "second run");
}

#[test]
fn test_unwritable_log_dir_fails_construction() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("logs");
    std::fs::write(&blocker, "a file where the directory should be").unwrap();

    let err = create_logger(&LoggerConfig::calculator_service(&blocker)).unwrap_err();
    assert!(err.to_string().contains("logs"));
}

#[test]
fn test_env_level_override_widens_file_sinks() {
    temp_env::with_var("LOG_LEVEL", Some("debug"), || {
        let dir = TempDir::new().unwrap();
        let mut config = LoggerConfig::calculator_service(dir.path());
        config.apply_env_overrides().unwrap();
        let logger = LoggerBuilder::new(config)
            .console_writer(Arc::new(Mutex::new(std::io::sink())))
            .build()
            .unwrap();

        logger.debug("operand parsed");

        assert_eq!(read_json_lines(&dir.path().join(COMBINED_LOG_FILE)).len(), 1);
        assert!(read_json_lines(&dir.path().join(ERROR_LOG_FILE)).is_empty());
        assert!(logger.is_level_enabled(Level::Debug));
    });
}
