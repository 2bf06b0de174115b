use dhub_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_in_one_process_fails() {
    let first = Logger::builder()
        .name("dronehub-first")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");
    assert!(!first.writes_files());

    let err = Logger::builder()
        .name("dronehub-second")
        .level(LevelFilter::INFO)
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}

#[test]
fn no_output_is_a_configuration_error() {
    let err = Logger::builder().name("dronehub-silent").console(false).init().unwrap_err();
    assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
}
