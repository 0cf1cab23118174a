use crate::fetch::client::HttpClient;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, InvalidHeaderValue};

/// Header Digitraffic asks every client to send, identifying the
/// application (e.g. `"MyOrg/WeatherApp 1.0"`).
pub const DIGITRAFFIC_USER: &str = "digitraffic-user";

/// An [`HttpClient`] wrapper that sets the `Digitraffic-User` header on
/// every request.
pub struct UserHeader<C> {
    pub inner: C,
    value: HeaderValue,
}

impl<C> UserHeader<C> {
    pub fn new(inner: C, user: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            inner,
            value: HeaderValue::from_str(user)?,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UserHeader<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(DIGITRAFFIC_USER, self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_rejects_invalid_header_value() {
        assert!(UserHeader::new(BasicClient::new(), "bad\nvalue").is_err());
    }

    #[test]
    fn test_accepts_app_name() {
        let client = UserHeader::new(BasicClient::new(), "MyOrg/WeatherApp 1.0").unwrap();
        assert_eq!(client.value, "MyOrg/WeatherApp 1.0");
    }
}
