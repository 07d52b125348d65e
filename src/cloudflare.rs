//! Cloudflare DNS record update client.

use crate::config::{null_as_default, Config};
use crate::error::Result;
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// Record type written by every update.
pub const RECORD_TYPE: &str = "A";

/// Cloudflare's "automatic" TTL sentinel.
pub const AUTO_TTL: u32 = 1;

/// Body of the record PUT. Replaces every field of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub content: String,
    pub name: String,
    pub proxied: bool,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: u32,
    pub comment: String,
}

/// Cloudflare API envelope for a single-record response.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<serde_json::Value>,
    #[serde(default)]
    pub result: Option<RecordDetails>,
}

/// Record as echoed back by Cloudflare.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordDetails {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zone_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zone_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub record_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(deserialize_with = "null_as_default")]
    pub proxiable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub proxied: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ttl: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub meta: RecordMeta,
    pub comment: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_on: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modified_on: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecordMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub auto_added: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub source: String,
}

/// Decoded response together with the body it was decoded from.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub response: UpdateResponse,
    pub raw_body: String,
}

/// Client for one Cloudflare DNS record.
pub struct CloudflareClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    zone_id: String,
    record_id: String,
    record_name: String,
}

impl CloudflareClient {
    /// Create a client for the record described by `config`.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.api_base_url.clone(),
            config.api_token.clone(),
            config.zone_id.clone(),
            config.dns_record_id.clone(),
            config.name.clone(),
        )
    }

    pub fn new(
        client: reqwest::Client,
        base_url: String,
        api_token: String,
        zone_id: String,
        record_id: String,
        record_name: String,
    ) -> Self {
        Self {
            client,
            base_url,
            api_token,
            zone_id,
            record_id,
            record_name,
        }
    }

    /// Endpoint of the managed record.
    pub fn record_url(&self) -> String {
        format!(
            "{}/zones/{}/dns_records/{}",
            self.base_url.trim_end_matches('/'),
            self.zone_id,
            self.record_id
        )
    }

    /// Build the update payload for `ip`, stamped with `now`.
    pub fn build_request<Tz>(&self, ip: &str, now: DateTime<Tz>) -> UpdateRequest
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        UpdateRequest {
            content: ip.to_string(),
            name: self.record_name.clone(),
            proxied: false,
            record_type: RECORD_TYPE.to_string(),
            ttl: AUTO_TTL,
            comment: format!(
                "DDNS updated by cf-ddns, updated at {}",
                now.format("%Y-%m-%d %H:%M:%S")
            ),
        }
    }

    /// PUT `request` to the record endpoint and decode the reply.
    ///
    /// The HTTP status is not inspected; Cloudflare reports failures in the
    /// JSON envelope, which the reporter surfaces.
    pub async fn update_record(&self, request: &UpdateRequest) -> Result<UpdateOutcome> {
        let url = self.record_url();
        tracing::debug!("PUT {}", url);

        let raw_body = self
            .client
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(request)
            .send()
            .await?
            .text()
            .await?;

        let response: UpdateResponse = serde_json::from_str(&raw_body)?;

        if let Some(record) = &response.result {
            tracing::debug!(
                "Record {} ({}) now {} {} ttl={} proxied={} modified_on={}",
                record.name,
                record.id,
                record.record_type,
                record.content,
                record.ttl,
                record.proxied,
                record.modified_on
            );
        }

        Ok(UpdateOutcome { response, raw_body })
    }
}
