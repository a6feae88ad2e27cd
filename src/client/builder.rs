//! Client builders and built clients.
//!
//! # Responsibilities
//! - Collect client settings and an ordered filter chain
//! - Expose the builder capability to initialization hooks
//! - Build a `BalancedClient` that runs the chain before sending

use std::sync::Arc;
use std::time::Duration;

use reqwest::{IntoUrl, Method, Request, RequestBuilder, Response};
use thiserror::Error;

use crate::client::filter::{ExchangeFilter, FilterError};
use crate::context::Component;

/// Errors raised while building or using a client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request filter failed: {0}")]
    Filter(#[from] FilterError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The capability initialization hooks use to decorate a client builder.
pub trait ClientBuilder: Send + Sync {
    /// Append `filter` to the chain. Registering the same filter twice
    /// applies it twice.
    fn filter(&mut self, filter: Arc<dyn ExchangeFilter>);

    /// Registered filters, in application order.
    fn filters(&self) -> &[Arc<dyn ExchangeFilter>];

    /// Build a client from the current settings.
    fn build(&self) -> Result<BalancedClient, ClientError>;
}

/// Builder for a reqwest-backed client with a filter chain.
#[derive(Debug, Clone)]
pub struct HttpClientBuilder {
    name: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    filters: Vec<Arc<dyn ExchangeFilter>>,
}

impl HttpClientBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timeout: None,
            user_agent: None,
            filters: Vec::new(),
        }
    }

    /// Total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Chainable form of [`ClientBuilder::filter`].
    pub fn with_filter(mut self, filter: Arc<dyn ExchangeFilter>) -> Self {
        self.filters.push(filter);
        self
    }
}

impl ClientBuilder for HttpClientBuilder {
    fn filter(&mut self, filter: Arc<dyn ExchangeFilter>) {
        tracing::trace!(client = %self.name, filter = filter.name(), "Filter registered");
        self.filters.push(filter);
    }

    fn filters(&self) -> &[Arc<dyn ExchangeFilter>] {
        &self.filters
    }

    fn build(&self) -> Result<BalancedClient, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(BalancedClient {
            name: self.name.clone(),
            inner: builder.build()?,
            filters: self.filters.clone().into(),
        })
    }
}

impl Component for HttpClientBuilder {
    fn as_client_builder(&mut self) -> Option<&mut dyn ClientBuilder> {
        Some(self)
    }
}

/// A built client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct BalancedClient {
    name: String,
    inner: reqwest::Client,
    filters: Arc<[Arc<dyn ExchangeFilter>]>,
}

impl BalancedClient {
    /// Names of the filters applied to every request, in order.
    pub fn filter_names(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.name().to_string()).collect()
    }

    /// Start a request. Send it with [`BalancedClient::execute`] so the
    /// filter chain runs.
    pub fn request<U: IntoUrl>(&self, method: Method, url: U) -> RequestBuilder {
        self.inner.request(method, url)
    }

    pub fn get<U: IntoUrl>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Run the filter chain over `request` without sending it.
    pub fn prepare(&self, request: Request) -> Result<Request, FilterError> {
        self.filters
            .iter()
            .try_fold(request, |request, filter| filter.apply(request))
    }

    /// Run the filter chain, then send.
    pub async fn execute(&self, request: Request) -> Result<Response, ClientError> {
        let request = self.prepare(request)?;
        tracing::debug!(
            client = %self.name,
            method = %request.method(),
            url = %request.url(),
            "Sending request"
        );
        Ok(self.inner.execute(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::request_id::{RequestIdFilter, X_REQUEST_ID};

    #[derive(Debug)]
    struct PathPrefixFilter(&'static str);

    impl ExchangeFilter for PathPrefixFilter {
        fn name(&self) -> &str {
            "path-prefix"
        }

        fn apply(&self, mut request: Request) -> Result<Request, FilterError> {
            let path = format!("{}{}", self.0, request.url().path());
            request.url_mut().set_path(&path);
            Ok(request)
        }
    }

    #[test]
    fn test_filters_apply_in_registration_order() {
        let mut builder = HttpClientBuilder::new("users")
            .with_filter(Arc::new(PathPrefixFilter("/a")));
        builder.filter(Arc::new(PathPrefixFilter("/b")));
        let client = builder.build().unwrap();

        let request = client.get("http://user-service/users").build().unwrap();
        let request = client.prepare(request).unwrap();

        assert_eq!(request.url().path(), "/b/a/users");
    }

    #[test]
    fn test_same_filter_registered_twice_applies_twice() {
        let filter: Arc<dyn ExchangeFilter> = Arc::new(PathPrefixFilter("/v1"));
        let mut builder = HttpClientBuilder::new("users");
        builder.filter(filter.clone());
        builder.filter(filter);

        assert_eq!(builder.filters().len(), 2);
        let client = builder.build().unwrap();
        let request = client.prepare(client.get("http://svc/x").build().unwrap()).unwrap();
        assert_eq!(request.url().path(), "/v1/v1/x");
    }

    #[test]
    fn test_builder_exposes_client_builder_capability() {
        let mut builder = HttpClientBuilder::new("users");
        let capability = builder.as_client_builder().unwrap();
        capability.filter(Arc::new(RequestIdFilter::new()));

        let client = builder.build().unwrap();
        assert_eq!(client.filter_names(), vec!["request-id".to_string()]);

        let request = client.prepare(client.get("http://svc/").build().unwrap()).unwrap();
        assert!(request.headers().contains_key(X_REQUEST_ID));
    }
}
