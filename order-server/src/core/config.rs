//! Server configuration
//!
//! Loaded once at startup and injected into every component that needs it.
//! There is deliberately no global/once-init configuration singleton.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | WORK_DIR | /var/lib/order-server | Working directory (database lives under it) |
//! | HTTP_PORT | 3000 | HTTP API port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | BUSINESS_TIMEZONE | America/Sao_Paulo | Timezone for ticket day keys |
//! | QR_GATEWAY_URL | https://api.mercadopago.com/instore/orders/qr | QR generation endpoint |
//! | QR_GATEWAY_TOKEN | (empty) | Bearer token for the QR gateway |
//! | NOTIFICATION_URL | http://localhost:3000/api/webhooks/payments | Webhook callback handed to the gateway |
//! | QR_EXPIRATION_MINUTES | 30 | Lifetime of a generated QR code |
//! | SHUTDOWN_TIMEOUT_MS | 10000 | Graceful shutdown budget |

use chrono_tz::Tz;

#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory; the embedded database lives under it
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Business timezone for ticket day keys
    pub business_timezone: String,
    /// QR generation endpoint
    pub qr_gateway_url: String,
    /// Bearer token for the QR gateway (generation and status fetches)
    pub qr_gateway_token: String,
    /// Webhook callback URL handed to the gateway on every QR code
    pub notification_url: String,
    /// Lifetime of a generated QR code
    pub qr_expiration_minutes: i64,
    /// Graceful shutdown budget (milliseconds)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/order-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            business_timezone: std::env::var("BUSINESS_TIMEZONE")
                .unwrap_or_else(|_| "America/Sao_Paulo".into()),
            qr_gateway_url: std::env::var("QR_GATEWAY_URL")
                .unwrap_or_else(|_| "https://api.mercadopago.com/instore/orders/qr".into()),
            qr_gateway_token: std::env::var("QR_GATEWAY_TOKEN").unwrap_or_default(),
            notification_url: std::env::var("NOTIFICATION_URL")
                .unwrap_or_else(|_| "http://localhost:3000/api/webhooks/payments".into()),
            qr_expiration_minutes: std::env::var("QR_EXPIRATION_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// Override the fields tests care about
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Parsed business timezone; unknown names fall back to UTC with a log
    pub fn tz(&self) -> Tz {
        self.business_timezone.parse().unwrap_or_else(|_| {
            tracing::warn!(tz = %self.business_timezone, "unknown timezone, falling back to UTC");
            chrono_tz::UTC
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
