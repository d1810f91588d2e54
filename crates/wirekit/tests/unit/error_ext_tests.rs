//! Error Extension Tests

use std::io;

use wirekit::error_ext::ErrorContext;
use wirekit::{Error, Result};

#[test]
fn test_io_context() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    if let Err(Error::Io { source, message }) = result {
        assert!(message.contains("failed to read file"));
        assert!(message.contains("file not found"));
        assert!(source.is_some());
    } else {
        panic!("Expected Io error");
    }
}

#[test]
fn test_producer_context() {
    let result: Result<u16> = "not a port"
        .parse::<u16>()
        .producer_context("PORT is not a number");

    match result {
        Err(Error::Producer { message, source }) => {
            assert!(message.starts_with("PORT is not a number"));
            assert!(source.is_some());
        }
        other => panic!("Expected Producer error, got {other:?}"),
    }
}

#[test]
fn test_with_producer_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);

    let value = ok
        .with_producer_context(|| -> String { panic!("context built for a success") })
        .unwrap();

    assert_eq!(value, 1);
}

#[test]
fn test_config_context() {
    let result: Result<bool> = "maybe".parse::<bool>().config_context("invalid flag");

    assert!(matches!(result, Err(Error::Configuration { .. })));
}
