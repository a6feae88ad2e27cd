//! Request ID propagation.
//!
//! # Responsibilities
//! - Stamp every outgoing request with a unique `x-request-id`
//! - Leave IDs supplied by the caller untouched

use reqwest::header::HeaderValue;
use reqwest::Request;
use uuid::Uuid;

use crate::client::filter::{ExchangeFilter, FilterError};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Adds a UUID v4 request ID when the request has none.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestIdFilter;

impl RequestIdFilter {
    pub fn new() -> Self {
        Self
    }
}

impl ExchangeFilter for RequestIdFilter {
    fn name(&self) -> &str {
        "request-id"
    }

    fn apply(&self, mut request: Request) -> Result<Request, FilterError> {
        if !request.headers().contains_key(X_REQUEST_ID) {
            let id = HeaderValue::from_str(&Uuid::new_v4().to_string())?;
            request.headers_mut().insert(X_REQUEST_ID, id);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    fn request() -> Request {
        Request::new(Method::GET, "http://user-service/users".parse().unwrap())
    }

    #[test]
    fn test_adds_request_id() {
        let request = RequestIdFilter::new().apply(request()).unwrap();
        let id = request.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_keeps_existing_request_id() {
        let mut original = request();
        original
            .headers_mut()
            .insert(X_REQUEST_ID, HeaderValue::from_static("abc"));

        let request = RequestIdFilter::new().apply(original).unwrap();
        assert_eq!(request.headers().get(X_REQUEST_ID).unwrap(), "abc");
    }
}
