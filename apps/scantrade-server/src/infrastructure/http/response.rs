//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::governance::{GovernanceRule, RiskLimits};
use crate::domain::scanner::ScannerDescriptor;
use crate::domain::settings::UserSettings;
use crate::domain::signal::Signal;
use crate::domain::webhook::WebhookEntry;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: String,
    /// Server version.
    pub version: String,
}

/// Successful scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    /// Always `true`.
    pub success: bool,
    /// Signals, newest first.
    pub signals: Vec<Signal>,
    /// Whether the webhook accepted the alert.
    pub alert_sent: bool,
}

/// Saved webhooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookListResponse {
    /// Entries sorted by name.
    pub webhooks: Vec<WebhookEntry>,
}

/// A saved or verified webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Always `true`.
    pub success: bool,
    /// The entry.
    pub webhook: WebhookEntry,
}

/// `GET /api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    /// Stored or default settings.
    #[serde(flatten)]
    pub settings: UserSettings,
    /// Role label of the caller.
    pub user_role: String,
}

/// `POST /api/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSavedResponse {
    /// Confirmation text.
    pub message: String,
    /// What was stored.
    pub data: UserSettings,
}

/// Settings body rejection. Carries no `success` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidRequestResponse {
    /// Always `Invalid request`.
    pub error: String,
}

/// `GET /api/governance/rules`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceRulesResponse {
    /// Rules in display order.
    pub rules: Vec<GovernanceRule>,
}

/// `GET /api/governance/risk-limits`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimitsResponse {
    /// Percent of capital per position.
    pub position_size_limit: f64,
    /// Percent of capital across positions.
    pub exposure_limit: f64,
    /// Drawdown ceiling in percent.
    pub max_drawdown_limit: f64,
    /// Simulated order flow.
    pub paper_trading: bool,
}

impl From<RiskLimits> for RiskLimitsResponse {
    fn from(limits: RiskLimits) -> Self {
        Self {
            position_size_limit: limits.max_position_size_pct,
            exposure_limit: limits.max_portfolio_exposure_pct,
            max_drawdown_limit: limits.max_drawdown_pct,
            paper_trading: limits.paper_trading,
        }
    }
}

/// `GET /api/scanners`.
#[derive(Debug, Clone, Serialize)]
pub struct ScannerListResponse {
    /// The built-in catalogue.
    pub scanners: &'static [ScannerDescriptor],
}
