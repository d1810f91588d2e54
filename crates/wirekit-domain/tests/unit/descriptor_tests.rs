//! Unit tests for the type descriptor port

use wirekit_domain::ports::{NullTypeDescriptorProvider, ParameterSummary};
use wirekit_domain::{Arguments, Error, ParameterDescriptor, TypeDescriptorProvider};

#[test]
fn test_contract_parameter_accessors() {
    let param = ParameterDescriptor::contract("payImpl", "Pay");
    assert!(param.has_class_type());
    assert_eq!(param.class_type_name(), Some("Pay"));
    assert!(!param.has_default());
    assert!(param.default_value().is_none());
}

#[test]
fn test_primitive_parameter_accessors() {
    let bare = ParameterDescriptor::primitive("retries");
    assert!(!bare.has_class_type());
    assert!(!bare.has_default());

    let defaulted = ParameterDescriptor::with_default("retries", 3_u32);
    assert!(defaulted.has_default());
    assert_eq!(
        defaulted.default_value().and_then(|v| v.get::<u32>()),
        Some(3)
    );
}

#[test]
fn test_parameter_summary_serializes() {
    let summary = ParameterDescriptor::contract("payImpl", "Pay").summary();
    let json = serde_json::to_string(&summary).unwrap();
    assert_eq!(json, r#"{"name":"payImpl","class_type":"Pay","has_default":false}"#);

    let primitive: ParameterSummary =
        serde_json::from_str(r#"{"name":"retries","has_default":true}"#).unwrap();
    assert_eq!(primitive.class_type, None);
    assert!(primitive.has_default);
}

#[test]
fn test_null_provider_knows_nothing() {
    let provider = NullTypeDescriptorProvider;
    assert!(!provider.is_instantiable("Anything"));
    assert!(provider.constructor_parameters("Anything").is_none());
    assert!(matches!(
        provider.instantiate("Anything", Arguments::new()),
        Err(Error::NotInstantiable { .. })
    ));
}
