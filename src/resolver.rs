//! Public IP resolution.

use crate::error::{DdnsError, Result};

/// Resolves the caller's public IP through a plain-text echo service.
pub struct IpResolver {
    client: reqwest::Client,
    service: String,
}

impl IpResolver {
    /// Create a resolver that queries `service` with the given client.
    pub fn new(client: reqwest::Client, service: String) -> Self {
        Self { client, service }
    }

    /// Fetch the current public IP.
    ///
    /// The body is used as-is apart from trimming surrounding whitespace;
    /// echo services usually terminate the address with a newline.
    pub async fn resolve(&self) -> Result<String> {
        let response = self.client.get(&self.service).send().await?;

        if !response.status().is_success() {
            return Err(DdnsError::Network(format!(
                "HTTP {} from {}",
                response.status(),
                self.service
            )));
        }

        let text = response.text().await?;
        let ip = text.trim();

        if ip.is_empty() {
            return Err(DdnsError::Decode(format!(
                "empty IP response from {}",
                self.service
            )));
        }

        tracing::debug!("Resolved {} from {}", ip, self.service);
        Ok(ip.to_string())
    }
}
