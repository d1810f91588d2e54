//! Unit tests for domain error types

use wirekit_domain::Error;

#[test]
fn test_not_instantiable_without_stack() {
    let error = Error::not_instantiable("Pay", &[]);
    assert_eq!(error.to_string(), "Target [Pay] is not instantiable.");
}

#[test]
fn test_not_instantiable_with_stack() {
    let stack = vec!["PayBill".to_string(), "Alipay".to_string()];
    let error = Error::not_instantiable("Logger", &stack);
    assert_eq!(
        error.to_string(),
        "Target [Logger] is not instantiable while building [PayBill, Alipay]."
    );
}

#[test]
fn test_unresolvable_dependency_names_parameter_and_class() {
    let error = Error::unresolvable("timeout", "HttpClient");
    let display = error.to_string();
    assert!(display.contains("$timeout"));
    assert!(display.contains("HttpClient"));
    match error {
        Error::UnresolvableDependency { parameter, concrete } => {
            assert_eq!(parameter, "timeout");
            assert_eq!(concrete, "HttpClient");
        }
        _ => panic!("Expected UnresolvableDependency error"),
    }
}

#[test]
fn test_circular_dependency_lists_cycle() {
    let stack = vec!["Root".to_string(), "A".to_string(), "B".to_string()];
    let error = Error::circular("A", &stack);
    assert!(error.to_string().contains("A -> B -> A"));
}

#[test]
fn test_alias_cycle_lists_chain() {
    let error = Error::alias_cycle("x", vec!["x".to_string(), "y".to_string()]);
    let display = error.to_string();
    assert!(display.contains("[x] is aliased to itself"));
    assert!(display.contains("x -> y"));
}

#[test]
fn test_resolution_error_classification() {
    assert!(Error::not_instantiable("A", &[]).is_resolution_error());
    assert!(Error::depth_exceeded(4, &[]).is_resolution_error());
    assert!(!Error::producer("boom").is_resolution_error());
    assert!(!Error::configuration("bad").is_resolution_error());
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io { .. }));
    assert!(error.to_string().contains("missing file"));
}
