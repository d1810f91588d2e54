//! Unit tests for resolution from several threads against one container

use std::sync::Arc;
use std::thread;

use wirekit::Instance;

use crate::fixtures::{Counter, channel_of, container};

#[test]
fn test_concurrent_singleton_resolution_agrees() {
    let container = Arc::new(container());
    container.singleton_self("Counter").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = Arc::clone(&container);
            thread::spawn(move || container.make("Counter").unwrap())
        })
        .collect();
    let instances: Vec<Instance> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let shared = container.make("Counter").unwrap();
    assert!(shared.is::<Counter>());
    assert!(instances.iter().all(|instance| instance.ptr_eq(&shared)));
}

#[test]
fn test_concurrent_contextual_resolution_is_isolated() {
    let container = Arc::new(container());
    container
        .when("Alipay")
        .needs("Logger")
        .give("FileLogger")
        .unwrap();
    container.bind("Pay", "Wechat").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let container = Arc::clone(&container);
            thread::spawn(move || {
                for _ in 0..50 {
                    if index % 2 == 0 {
                        let alipay = container.make("Alipay").unwrap();
                        assert_eq!(channel_of(&alipay), "alipay via file");
                    } else {
                        let pay = container.make("Pay").unwrap();
                        assert_eq!(channel_of(&pay), "wechat");
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_producer_may_register_while_resolving() {
    let container = Arc::new(container());
    container
        .bind(
            "bootstrap",
            wirekit::Concrete::producer(|resolver, _| {
                resolver.container().bind("Pay", "Wechat")?;
                resolver.make("Pay")
            }),
        )
        .unwrap();

    let pay = container.make("bootstrap").unwrap();

    assert_eq!(channel_of(&pay), "wechat");
    assert!(container.bound("Pay"));
}
