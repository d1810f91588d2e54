//! Shared test types
//!
//! A small payment domain: `Pay` is a contract with two channels, `PayBill`
//! depends on `Pay`, the channels depend on a `Logger`, and `HttpClient`
//! takes primitive parameters.

#![allow(dead_code)]

use std::sync::Arc;

use wirekit::{
    Arguments, Container, Injectable, Instance, ParameterDescriptor, Result, TypeDescriptor,
    TypeRegistry,
};

pub trait Pay: Send + Sync {
    fn channel(&self) -> String;
}

pub trait Logger: Send + Sync {
    fn sink(&self) -> &'static str;
}

pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn sink(&self) -> &'static str {
        "console"
    }
}

pub struct FileLogger;

impl Logger for FileLogger {
    fn sink(&self) -> &'static str {
        "file"
    }
}

pub struct Alipay {
    pub logger: Arc<dyn Logger>,
}

impl Pay for Alipay {
    fn channel(&self) -> String {
        format!("alipay via {}", self.logger.sink())
    }
}

pub struct Wechat;

impl Pay for Wechat {
    fn channel(&self) -> String {
        "wechat".to_string()
    }
}

/// Wraps another channel, as an extender would
pub struct Audited(pub Arc<dyn Pay>);

impl Pay for Audited {
    fn channel(&self) -> String {
        format!("audited {}", self.0.channel())
    }
}

pub struct PayBill {
    pub pay: Arc<dyn Pay>,
}

impl PayBill {
    pub fn pay(&self) -> String {
        format!("pay bill by {}", self.pay.channel())
    }
}

impl Injectable for PayBill {
    const NAME: &'static str = "PayBill";

    fn parameters() -> Vec<ParameterDescriptor> {
        vec![ParameterDescriptor::contract("payImpl", "Pay")]
    }

    fn construct(arguments: &Arguments) -> Result<Self> {
        Ok(Self {
            pay: arguments.value("payImpl")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpClient {
    pub timeout: u64,
    pub retries: u32,
}

impl Injectable for HttpClient {
    const NAME: &'static str = "HttpClient";

    fn parameters() -> Vec<ParameterDescriptor> {
        vec![
            ParameterDescriptor::primitive("timeout"),
            ParameterDescriptor::with_default("retries", 3_u32),
        ]
    }

    fn construct(arguments: &Arguments) -> Result<Self> {
        Ok(Self {
            timeout: arguments.value("timeout")?,
            retries: arguments.value("retries")?,
        })
    }
}

/// Plain value with no constructor parameters
#[derive(Debug)]
pub struct Counter;

impl Injectable for Counter {
    const NAME: &'static str = "Counter";

    fn construct(_arguments: &Arguments) -> Result<Self> {
        Ok(Self)
    }
}

/// Every test type, with `Pay` and `Logger` registered as non-instantiable contracts
pub fn types() -> TypeRegistry {
    let types = TypeRegistry::new();
    types.register(TypeDescriptor::abstract_type("Pay"));
    types.register(TypeDescriptor::abstract_type("Logger"));
    types.register(
        TypeDescriptor::new("ConsoleLogger")
            .constructor(|_| Ok(Instance::new(Arc::new(ConsoleLogger) as Arc<dyn Logger>))),
    );
    types.register(
        TypeDescriptor::new("FileLogger")
            .constructor(|_| Ok(Instance::new(Arc::new(FileLogger) as Arc<dyn Logger>))),
    );
    types.register(
        TypeDescriptor::new("Alipay")
            .parameter(ParameterDescriptor::contract("logger", "Logger"))
            .constructor(|arguments| {
                let logger = arguments.value::<Arc<dyn Logger>>("logger")?;
                Ok(Instance::new(Arc::new(Alipay { logger }) as Arc<dyn Pay>))
            }),
    );
    types.register(
        TypeDescriptor::new("Wechat")
            .constructor(|_| Ok(Instance::new(Arc::new(Wechat) as Arc<dyn Pay>))),
    );
    types.register(
        TypeDescriptor::new("CycleA")
            .parameter(ParameterDescriptor::contract("b", "CycleB"))
            .constructor(|_| Ok(Instance::new("a"))),
    );
    types.register(
        TypeDescriptor::new("CycleB")
            .parameter(ParameterDescriptor::contract("a", "CycleA"))
            .constructor(|_| Ok(Instance::new("b"))),
    );
    types.register_type::<PayBill>();
    types.register_type::<HttpClient>();
    types.register_type::<Counter>();
    types
}

/// Container over [`types`] with `Logger` bound to `ConsoleLogger`
pub fn container() -> Container {
    let container = Container::with_provider(Arc::new(types()));
    container
        .bind("Logger", "ConsoleLogger")
        .expect("binding Logger");
    container
}

pub fn channel_of(instance: &Instance) -> String {
    instance
        .get::<Arc<dyn Pay>>()
        .expect("instance is a Pay")
        .channel()
}
