use dhub_domain::config::LogConfig;
use dhub_logger::Logger;
use serial_test::serial;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
#[serial]
fn log_section_with_directory_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config =
        LogConfig { level: "info".to_owned(), directory: Some(log_dir.clone()), json: true };

    let logger = Logger::builder().name("dronehub-file").console(false).config(&config).init()?;
    assert!(logger.writes_files());

    tracing::info!(serial = "SN-1", battery = 42, "Drone battery info");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().next().expect("at least one line");
    assert!(line.starts_with('{'), "expected a JSON line, got {line}");
    assert!(line.contains("\"serial\":\"SN-1\""));
    assert!(line.contains("\"battery\":42"));

    Ok(())
}
