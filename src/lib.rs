//! # cf-ddns
//!
//! A single-shot dynamic DNS updater for one Cloudflare "A" record.
//!
//! Each run resolves the caller's public IP through a plain-text echo
//! service and overwrites the configured record with it. Run it from cron
//! or a systemd timer to keep the record current.
//!
//! ## Usage
//!
//! ```bash
//! cf-ddns /etc/cf-ddns/config.json
//!
//! # Show the payload without touching the record
//! cf-ddns --dry-run config.json
//! ```
//!
//! ## Config
//!
//! ```json
//! {
//!   "name": "vpn.example.com",
//!   "api_token": "...",
//!   "zone_id": "...",
//!   "dns_record_id": "..."
//! }
//! ```

pub mod cloudflare;
pub mod config;
pub mod error;
pub mod reporter;
pub mod resolver;
pub mod updater;

pub use config::Config;
pub use error::{DdnsError, Result};
pub use reporter::Report;
pub use updater::Updater;
