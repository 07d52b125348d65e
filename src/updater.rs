//! The single-pass update pipeline.

use crate::cloudflare::{CloudflareClient, UpdateRequest};
use crate::config::Config;
use crate::error::{DdnsError, Result};
use crate::reporter::{self, Report};
use crate::resolver::IpResolver;

/// Runs resolve → update → report for one configured record.
///
/// Both stages share one HTTP client, so the configured timeout bounds each
/// request individually.
pub struct Updater {
    resolver: IpResolver,
    cloudflare: CloudflareClient,
}

impl Updater {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DdnsError::Network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            resolver: IpResolver::new(client.clone(), config.ip_service.clone()),
            cloudflare: CloudflareClient::from_config(client, config),
        })
    }

    /// Resolve the current IP and build the request that would be sent.
    pub async fn prepare(&self) -> Result<UpdateRequest> {
        let ip = self.resolver.resolve().await?;
        tracing::info!("Current IP: {}", ip);

        Ok(self.cloudflare.build_request(&ip, chrono::Local::now()))
    }

    /// Run the full pipeline.
    ///
    /// Only transport and decode failures are errors; a rejected update is
    /// returned as [`Report::Rejected`].
    pub async fn run(&self) -> Result<Report> {
        let request = self.prepare().await?;
        let outcome = self.cloudflare.update_record(&request).await?;
        Ok(reporter::report(&outcome))
    }

    /// Resolve the IP and return the payload without contacting Cloudflare.
    pub async fn dry_run(&self) -> Result<UpdateRequest> {
        let request = self.prepare().await?;
        tracing::info!(
            "Dry run, would PUT {} with {}",
            self.cloudflare.record_url(),
            serde_json::to_string(&request)?
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> Config {
        let mut config = Config::from_json(
            r#"{"name":"vpn.example.com","api_token":"test-token","zone_id":"zone-123","dns_record_id":"record-456"}"#,
        )
        .unwrap();
        config.ip_service = format!("{}/ip", server.uri());
        config.api_base_url = format!("{}/client/v4", server.uri());
        config
    }

    async fn mount_ip(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/ip"))
            .respond_with(response)
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_run_sends_trimmed_ip() {
        let mock_server = MockServer::start().await;
        mount_ip(
            &mock_server,
            ResponseTemplate::new(200).set_body_string("203.0.113.5\n"),
        )
        .await;

        Mock::given(method("PUT"))
            .and(path("/client/v4/zones/zone-123/dns_records/record-456"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"success":true,"errors":[],"messages":[],"result":{}}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let report = Updater::new(&config(&mock_server)).unwrap().run().await.unwrap();
        assert_eq!(report, Report::Updated);

        let requests = mock_server.received_requests().await.unwrap();
        let put = requests
            .iter()
            .find(|r| r.url.path().ends_with("/dns_records/record-456"))
            .unwrap();
        let sent: UpdateRequest = serde_json::from_slice(&put.body).unwrap();

        assert_eq!(sent.content, "203.0.113.5");
        assert_eq!(sent.name, "vpn.example.com");
        assert_eq!(sent.record_type, "A");
        assert!(!sent.proxied);
        assert_eq!(sent.ttl, 1);
    }

    #[tokio::test]
    async fn test_run_rejected_is_ok() {
        let mock_server = MockServer::start().await;
        mount_ip(&mock_server, ResponseTemplate::new(200).set_body_string("203.0.113.5")).await;

        let body = r#"{"success":false,"errors":[{"code":10000,"message":"Authentication error"}]}"#;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403).set_body_string(body))
            .mount(&mock_server)
            .await;

        let report = Updater::new(&config(&mock_server)).unwrap().run().await.unwrap();
        assert_eq!(
            report,
            Report::Rejected {
                body: body.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_run_rejected_with_null_errors_is_ok() {
        let mock_server = MockServer::start().await;
        mount_ip(&mock_server, ResponseTemplate::new(200).set_body_string("203.0.113.5")).await;

        let body = r#"{"success":false,"errors":null,"messages":null,"result":null}"#;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(400).set_body_string(body))
            .mount(&mock_server)
            .await;

        let report = Updater::new(&config(&mock_server)).unwrap().run().await.unwrap();
        assert_eq!(
            report,
            Report::Rejected {
                body: body.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_ip_timeout_skips_update() {
        let mock_server = MockServer::start().await;
        mount_ip(
            &mock_server,
            ResponseTemplate::new(200)
                .set_body_string("203.0.113.5")
                .set_delay(Duration::from_secs(3)),
        )
        .await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut config = config(&mock_server);
        config.timeout_secs = 1;

        let err = Updater::new(&config).unwrap().run().await.unwrap_err();
        assert!(matches!(err, DdnsError::Network(_)));
    }

    #[tokio::test]
    async fn test_update_timeout_is_fatal() {
        let mock_server = MockServer::start().await;
        mount_ip(&mock_server, ResponseTemplate::new(200).set_body_string("203.0.113.5")).await;

        Mock::given(method("PUT"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"success":true}"#)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&mock_server)
            .await;

        let mut config = config(&mock_server);
        config.timeout_secs = 1;

        let err = Updater::new(&config).unwrap().run().await.unwrap_err();
        assert!(matches!(err, DdnsError::Network(_)));
    }

    #[tokio::test]
    async fn test_dry_run_sends_no_update() {
        let mock_server = MockServer::start().await;
        mount_ip(&mock_server, ResponseTemplate::new(200).set_body_string("198.51.100.7\n")).await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let request = Updater::new(&config(&mock_server))
            .unwrap()
            .dry_run()
            .await
            .unwrap();
        assert_eq!(request.content, "198.51.100.7");
    }
}
