//! Unit tests for bindings, instances, queries and teardown

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wirekit::{BindingInfo, Concrete, Container, Error, Instance, Parameters};

use crate::fixtures::{Counter, channel_of, container, types};

#[test]
fn test_singleton_returns_same_instance() {
    let container = container();
    container.singleton_self("Counter").unwrap();

    let first = container.make("Counter").unwrap();
    let second = container.make("Counter").unwrap();

    assert!(first.ptr_eq(&second));
    assert!(first.is::<Counter>());
}

#[test]
fn test_bind_builds_fresh_instance_each_time() {
    let container = container();
    container.bind_self("Counter").unwrap();

    let first = container.make("Counter").unwrap();
    let second = container.make("Counter").unwrap();

    assert!(!first.ptr_eq(&second));
    assert!(!container.is_shared("Counter"));
}

#[test]
fn test_unbound_concrete_is_built_directly() {
    let container = container();

    let counter = container.make("Counter").unwrap();

    assert!(counter.is::<Counter>());
    assert!(!container.bound("Counter"));
    assert!(container.resolved("Counter"));
}

#[test]
fn test_overrides_never_touch_the_cache() {
    let container = container();
    container.singleton_self("Counter").unwrap();
    let overrides = || Parameters::new().with("unused", 1_u8);

    let first = container.make_with("Counter", overrides()).unwrap();
    let second = container.make_with("Counter", overrides()).unwrap();
    assert!(!first.ptr_eq(&second));

    let shared = container.make("Counter").unwrap();
    assert!(!shared.ptr_eq(&first));
    assert!(!shared.ptr_eq(&second));

    let third = container.make_with("Counter", overrides()).unwrap();
    assert!(!shared.ptr_eq(&third));
    assert!(shared.ptr_eq(&container.make("Counter").unwrap()));
}

#[test]
fn test_instance_is_shared_and_resolved() {
    let container = container();
    container.instance("config", Instance::new(42_u32)).unwrap();

    assert_eq!(container.make_value::<u32>("config").unwrap(), 42);
    assert!(container.bound("config"));
    assert!(container.resolved("config"));
    assert!(container.is_shared("config"));
}

#[test]
fn test_producer_receives_override_parameters() {
    let container = container();
    container
        .bind(
            "greeting",
            Concrete::producer(|_, parameters: &Parameters| {
                Ok(parameters
                    .get("name")
                    .cloned()
                    .unwrap_or_else(|| Instance::new("world")))
            }),
        )
        .unwrap();

    let default = container.make_value::<&str>("greeting").unwrap();
    let named = container
        .make_with("greeting", Parameters::new().with("name", "bob"))
        .unwrap();

    assert_eq!(default, "world");
    assert_eq!(named.get::<&str>(), Some("bob"));
}

#[test]
fn test_bind_value_returns_the_value() {
    let container = container();
    container.bind("answer", Concrete::value(42_i64)).unwrap();

    assert_eq!(container.make_value::<i64>("answer").unwrap(), 42);
}

#[test]
fn test_make_as_reports_type_mismatch() {
    let container = container();
    container.instance("config", Instance::new(42_u32)).unwrap();

    let result = container.make_as::<String>("config");

    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_bind_if_keeps_existing_binding() {
    let container = container();
    container.bind("Pay", "Alipay").unwrap();

    container
        .bind_if("Pay", Some(Concrete::from("Wechat")), false)
        .unwrap();
    container
        .bind_if("Refund", Some(Concrete::from("Wechat")), true)
        .unwrap();

    assert_eq!(
        channel_of(&container.make("Pay").unwrap()),
        "alipay via console"
    );
    assert_eq!(channel_of(&container.make("Refund").unwrap()), "wechat");
    assert!(container.is_shared("Refund"));
}

#[test]
fn test_alias_resolves_to_abstract() {
    let container = container();
    container.bind("Pay", "Wechat").unwrap();
    container.alias("Pay", "payment");

    assert!(container.is_alias("payment"));
    assert!(container.bound("payment"));
    assert_eq!(container.get_alias("payment").unwrap(), "Pay");
    assert_eq!(channel_of(&container.make("payment").unwrap()), "wechat");
}

#[test]
fn test_binding_an_alias_name_replaces_the_alias() {
    let container = container();
    container.alias("Pay", "payment");
    container.bind("payment", "Wechat").unwrap();

    assert!(!container.is_alias("payment"));
    assert_eq!(channel_of(&container.make("payment").unwrap()), "wechat");
}

#[test]
fn test_get_bindings_reports_shared_flags() {
    let container = container();
    container.singleton("Pay", "Wechat").unwrap();
    container.bind_self("Counter").unwrap();

    let bindings = container.get_bindings();

    assert_eq!(bindings.get("Pay"), Some(&BindingInfo { shared: true }));
    assert_eq!(bindings.get("Counter"), Some(&BindingInfo { shared: false }));
    assert_eq!(bindings.get("Logger"), Some(&BindingInfo { shared: false }));
    assert_eq!(bindings.len(), 3);
}

#[test]
fn test_binding_info_serializes() {
    let json = serde_json::to_string(&BindingInfo { shared: true }).unwrap();
    assert_eq!(json, r#"{"shared":true}"#);
}

#[test]
fn test_tagged_resolves_in_tagging_order() {
    let container = container();
    container.tag(["Alipay", "Wechat"], ["payments"]);
    container.tag(["Wechat"], ["cheap"]);

    let payments = container.tagged("payments").unwrap();
    let channels: Vec<String> = payments.iter().map(channel_of).collect();

    assert_eq!(channels, vec!["alipay via console", "wechat"]);
    assert_eq!(container.tagged("cheap").unwrap().len(), 1);
    assert!(container.tagged("missing").unwrap().is_empty());
}

#[test]
fn test_factory_defers_resolution() {
    let container = Arc::new(container());
    let factory = container.factory("Pay");

    assert!(factory().is_err());

    container.bind("Pay", "Wechat").unwrap();
    assert_eq!(channel_of(&factory().unwrap()), "wechat");
}

#[test]
fn test_forget_instance_drops_only_the_cache() {
    let container = container();
    container.singleton_self("Counter").unwrap();
    let first = container.make("Counter").unwrap();

    container.forget_instance("Counter");
    let second = container.make("Counter").unwrap();

    assert!(!first.ptr_eq(&second));
    assert!(container.bound("Counter"));

    container.forget_instances();
    assert!(!second.ptr_eq(&container.make("Counter").unwrap()));
}

#[test]
fn test_unbind_removes_binding_and_instance() {
    let container = container();
    container.singleton("Pay", "Wechat").unwrap();
    container.make("Pay").unwrap();

    container.unbind("Pay");

    assert!(!container.bound("Pay"));
    assert!(!container.resolved("Pay"));
    assert!(matches!(
        container.make("Pay"),
        Err(Error::NotInstantiable { .. })
    ));
}

#[test]
fn test_flush_clears_bindings_instances_and_aliases() {
    let container = container();
    container.bind("Pay", "Wechat").unwrap();
    container.alias("Pay", "payment");
    container.singleton_self("Counter").unwrap();
    container.make("Pay").unwrap();
    container.make("Counter").unwrap();

    container.flush();

    assert!(!container.bound("Pay"));
    assert!(!container.is_alias("payment"));
    assert!(!container.resolved("Pay"));
    assert!(container.get_bindings().is_empty());
    assert!(matches!(
        container.make("Pay"),
        Err(Error::NotInstantiable { .. })
    ));
    // still constructible on its own, just no longer shared
    assert!(container.make("Counter").unwrap().is::<Counter>());
    assert!(!container.is_shared("Counter"));
}

#[test]
fn test_flush_keeps_tags() {
    let container = container();
    container.tag(["Wechat"], ["payments"]);

    container.flush();

    assert_eq!(container.tagged("payments").unwrap().len(), 1);
}

#[test]
fn test_failed_build_leaves_nothing_cached() {
    let container = container();
    container.singleton_self("HttpClient").unwrap();

    assert!(container.make("HttpClient").is_err());
    assert!(!container.resolved("HttpClient"));
    assert!(container.bound("HttpClient"));
}

#[test]
fn test_global_container_is_replaceable() {
    let installed = Arc::new(Container::with_provider(Arc::new(types())));
    let replacement = Arc::new(Container::with_provider(Arc::new(types())));
    Container::set_global(Some(Arc::clone(&installed)));

    assert!(Arc::ptr_eq(&Container::global(), &installed));
    assert!(Arc::ptr_eq(&Container::global(), &Container::global()));

    let previous = Container::set_global(Some(Arc::clone(&replacement)));
    assert!(previous.is_some_and(|previous| Arc::ptr_eq(&previous, &installed)));

    let cleared = Container::set_global(None);
    assert!(cleared.is_some_and(|cleared| Arc::ptr_eq(&cleared, &replacement)));
    let fresh = Container::global();
    assert!(!Arc::ptr_eq(&fresh, &installed));
    assert!(Arc::ptr_eq(&fresh, &Container::global()));
}

#[test]
fn test_producer_runs_once_for_singleton() {
    let container = container();
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    container
        .singleton(
            "Pay",
            Concrete::producer(move |resolver, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                resolver.build("Wechat")
            }),
        )
        .unwrap();

    for _ in 0..3 {
        container.make("Pay").unwrap();
    }

    assert_eq!(builds.load(Ordering::SeqCst), 1);
}
