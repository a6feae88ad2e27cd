//! Decoration through the component context.

use std::sync::Arc;

use balanced_client::client::{ExchangeFilter, HttpClientBuilder};
use balanced_client::context::{Component, ComponentContext, ContextError, DeferredProvider, Marker};
use balanced_client::decoration::{ClientBuilderDecorator, DecorateError};
use balanced_client::load_balancer::{
    DeferringLoadBalancerExchangeFilter, LoadBalancerExchangeFilter, ServiceRegistry,
};

struct Settings;

impl Component for Settings {}

fn lb_filter() -> Arc<DeferringLoadBalancerExchangeFilter> {
    let delegate = DeferredProvider::with_value(Arc::new(LoadBalancerExchangeFilter::new(
        Arc::new(ServiceRegistry::default()),
    )));
    Arc::new(DeferringLoadBalancerExchangeFilter::new(Arc::new(delegate)))
}

fn context_with(provider: Arc<DeferredProvider<DeferringLoadBalancerExchangeFilter>>) -> ComponentContext {
    let context = ComponentContext::new();
    context.add_hook(Arc::new(ClientBuilderDecorator::new(provider, context.markers())));
    context
}

fn filters(component: &mut Box<dyn Component>) -> Vec<Arc<dyn ExchangeFilter>> {
    component.as_client_builder().unwrap().filters().to_vec()
}

#[test]
fn test_plain_object_passes_through() {
    let context = context_with(Arc::new(DeferredProvider::new()));
    context.mark("irrelevant", Marker::LoadBalanced);

    // Even a marked name is ignored when the object is not a builder.
    let mut component = context
        .initialize("irrelevant", Box::new(Settings))
        .unwrap();
    assert!(component.as_client_builder().is_none());
}

#[test]
fn test_unmarked_builder_unchanged() {
    let context = context_with(Arc::new(DeferredProvider::with_value(lb_filter())));

    let mut component = context
        .initialize("userClient", Box::new(HttpClientBuilder::new("userClient")))
        .unwrap();

    assert!(filters(&mut component).is_empty());
}

#[test]
fn test_marked_builder_gets_filter() {
    let filter = lb_filter();
    let context = context_with(Arc::new(DeferredProvider::with_value(filter.clone())));
    context.mark("userClient", Marker::LoadBalanced);

    let mut component = context
        .initialize("userClient", Box::new(HttpClientBuilder::new("userClient")))
        .unwrap();

    let registered = filters(&mut component);
    assert_eq!(registered.len(), 1);
    assert!(std::ptr::addr_eq(Arc::as_ptr(&registered[0]), Arc::as_ptr(&filter)));
    assert_eq!(registered[0].name(), "deferring-load-balancer");
}

#[test]
fn test_marked_builder_without_filter_aborts() {
    let context = context_with(Arc::new(DeferredProvider::new()));
    context.mark("userClient", Marker::LoadBalanced);

    let err = context
        .initialize("userClient", Box::new(HttpClientBuilder::new("userClient")))
        .err()
        .unwrap();

    let ContextError::Initialization { name, source } = &err;
    assert_eq!(name, "userClient");
    let decorate_error = source.downcast_ref::<DecorateError>().unwrap();
    assert!(decorate_error
        .to_string()
        .contains("DeferringLoadBalancerExchangeFilter not found"));
}

#[test]
fn test_filter_published_after_context_setup() {
    let provider = Arc::new(DeferredProvider::new());
    let context = context_with(provider.clone());
    context.mark("userClient", Marker::LoadBalanced);

    provider.set(lb_filter());
    let mut component = context
        .initialize("userClient", Box::new(HttpClientBuilder::new("userClient")))
        .unwrap();

    assert_eq!(filters(&mut component).len(), 1);
}

#[test]
fn test_parallel_initialization() {
    let context = context_with(Arc::new(DeferredProvider::with_value(lb_filter())));
    for i in (0..16).filter(|i| i % 3 == 0) {
        context.mark(format!("client-{i}"), Marker::LoadBalanced);
    }

    std::thread::scope(|scope| {
        for i in 0..16 {
            let context = &context;
            scope.spawn(move || {
                let name = format!("client-{i}");
                let mut component = context
                    .initialize(&name, Box::new(HttpClientBuilder::new(name.clone())))
                    .unwrap();
                let expected = usize::from(i % 3 == 0);
                assert_eq!(filters(&mut component).len(), expected);
            });
        }
    });
}
