//! Scan Sheet Use Case
//!
//! Fetch -> parse -> (optional) alert for a single request. Validation runs
//! before any network call; fetch and parse failures abort the scan; alert
//! failures only leave `alert_sent` false.

use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::{
    AlertDispatcher, SheetError, SheetSource, WebhookStore, WebhookStoreError,
};
use crate::domain::alert::{AlertIdentity, AlertPayload, local_time_label};
use crate::domain::signal::{ParseError, Signal, newest_first, parse_signals};
use crate::domain::webhook::normalize_name;
use crate::error::{ApiError, ErrorKind};

/// Caller input for a scan. Every field is optional on the wire.
#[derive(Debug, Clone, Default)]
pub struct ScanCommand {
    /// Spreadsheet identifier.
    pub sheet_id: Option<String>,
    /// Explicit destination webhook.
    pub webhook_url: Option<String>,
    /// Name of a saved webhook, used when `webhook_url` is absent.
    pub webhook_name: Option<String>,
}

/// Result of a successful scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Parsed signals, newest first.
    pub signals: Vec<Signal>,
    /// Whether the webhook accepted the alert.
    pub alert_sent: bool,
}

/// Scan failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScanError {
    /// `sheetId` absent or blank.
    #[error("Missing Sheet ID")]
    MissingSheetId,

    /// `webhookName` did not match a saved webhook.
    #[error("Unknown webhook: {0}")]
    UnknownWebhook(String),

    /// Sheet export could not be fetched.
    #[error(transparent)]
    Fetch(#[from] SheetError),

    /// Sheet export could not be tokenized.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Saved-webhook lookup failed.
    #[error(transparent)]
    Store(#[from] WebhookStoreError),
}

impl ScanError {
    /// Error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSheetId | Self::UnknownWebhook(_) => ErrorKind::Validation,
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::Parse(_) => ErrorKind::Parse,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Use case for scanning a sheet and alerting on its newest signal.
pub struct ScanSheetUseCase {
    sheets: Arc<dyn SheetSource>,
    dispatcher: Arc<dyn AlertDispatcher>,
    webhooks: Arc<dyn WebhookStore>,
    identity: AlertIdentity,
    max_signals: usize,
}

impl ScanSheetUseCase {
    /// Create a new `ScanSheetUseCase`.
    pub fn new(
        sheets: Arc<dyn SheetSource>,
        dispatcher: Arc<dyn AlertDispatcher>,
        webhooks: Arc<dyn WebhookStore>,
        identity: AlertIdentity,
        max_signals: usize,
    ) -> Self {
        Self {
            sheets,
            dispatcher,
            webhooks,
            identity,
            max_signals,
        }
    }

    /// Execute the scan.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] for missing input, an unknown webhook name, or a
    /// failed fetch/parse. Dispatch failures are never returned.
    pub async fn execute(&self, command: ScanCommand) -> Result<ScanOutcome, ScanError> {
        let sheet_id = non_blank(command.sheet_id).ok_or(ScanError::MissingSheetId)?;
        let webhook_url = self
            .resolve_webhook(command.webhook_url, command.webhook_name)
            .await?;

        let csv_text = self.sheets.fetch_csv(&sheet_id).await?;
        let signals = parse_signals(&csv_text, self.max_signals, Utc::now())?;

        tracing::info!(sheet_id = %sheet_id, count = signals.len(), "Parsed sheet signals");

        let alert_sent = match (webhook_url, signals.last()) {
            (Some(url), Some(latest)) => self.send_alert(&url, latest).await,
            _ => false,
        };

        Ok(ScanOutcome {
            signals: newest_first(signals),
            alert_sent,
        })
    }

    /// `webhook_url` wins; otherwise look `webhook_name` up in the store.
    async fn resolve_webhook(
        &self,
        webhook_url: Option<String>,
        webhook_name: Option<String>,
    ) -> Result<Option<String>, ScanError> {
        if let Some(url) = non_blank(webhook_url) {
            return Ok(Some(url));
        }
        let Some(raw) = non_blank(webhook_name) else {
            return Ok(None);
        };
        let name =
            normalize_name(&raw).map_err(|_| ScanError::UnknownWebhook(raw.trim().to_string()))?;

        match self.webhooks.get(&name).await? {
            Some(entry) => Ok(Some(entry.url)),
            None => Err(ScanError::UnknownWebhook(name)),
        }
    }

    async fn send_alert(&self, webhook_url: &str, latest: &Signal) -> bool {
        let payload = AlertPayload::for_signal(&self.identity, latest, &local_time_label());
        match self.dispatcher.dispatch(webhook_url, &payload).await {
            Ok(()) => {
                tracing::info!(symbol = %latest.symbol, action = %latest.action, "Alert sent");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, symbol = %latest.symbol, "Failed to send alert");
                false
            }
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DispatchError, MockAlertDispatcher, MockSheetSource};
    use crate::domain::alert::{BUY_COLOR, SELL_COLOR};
    use crate::domain::webhook::WebhookEntry;
    use crate::infrastructure::persistence::InMemoryWebhookStore;
    use mockall::predicate::eq;

    const SHEET: &str = "Header\nAAPL,BUY,150\nMSFT,SELL,300\n";
    const HOOK: &str = "https://discord.example/api/webhooks/1/abc";

    fn use_case(
        sheets: MockSheetSource,
        dispatcher: MockAlertDispatcher,
        store: InMemoryWebhookStore,
    ) -> ScanSheetUseCase {
        ScanSheetUseCase::new(
            Arc::new(sheets),
            Arc::new(dispatcher),
            Arc::new(store),
            AlertIdentity::default(),
            5,
        )
    }

    fn sheet_returning(body: &'static str) -> MockSheetSource {
        let mut sheets = MockSheetSource::new();
        sheets
            .expect_fetch_csv()
            .with(eq("sheet-1"))
            .times(1)
            .returning(move |_| Ok(body.to_string()));
        sheets
    }

    fn command(webhook_url: Option<&str>) -> ScanCommand {
        ScanCommand {
            sheet_id: Some("sheet-1".to_string()),
            webhook_url: webhook_url.map(str::to_string),
            webhook_name: None,
        }
    }

    #[tokio::test]
    async fn returns_signals_newest_first_without_webhook() {
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher.expect_dispatch().never();

        let outcome = use_case(sheet_returning(SHEET), dispatcher, InMemoryWebhookStore::new())
            .execute(command(None))
            .await
            .unwrap();

        assert!(!outcome.alert_sent);
        let symbols: Vec<&str> = outcome.signals.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn missing_sheet_id_fails_before_fetch() {
        let mut sheets = MockSheetSource::new();
        sheets.expect_fetch_csv().never();
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher.expect_dispatch().never();

        let err = use_case(sheets, dispatcher, InMemoryWebhookStore::new())
            .execute(ScanCommand {
                sheet_id: Some("   ".to_string()),
                webhook_url: Some(HOOK.to_string()),
                webhook_name: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::MissingSheetId));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Missing Sheet ID");
    }

    #[tokio::test]
    async fn alerts_on_last_parsed_row() {
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher
            .expect_dispatch()
            .withf(|url, payload| {
                url == HOOK
                    && payload.embeds.len() == 1
                    && payload.embeds[0].title.contains("MSFT")
                    && payload.embeds[0].color == SELL_COLOR
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = use_case(sheet_returning(SHEET), dispatcher, InMemoryWebhookStore::new())
            .execute(command(Some(HOOK)))
            .await
            .unwrap();

        assert!(outcome.alert_sent);
    }

    #[tokio::test]
    async fn dispatch_failure_does_not_fail_scan() {
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher.expect_dispatch().times(1).returning(|_, _| {
            Err(DispatchError::Network {
                message: "connection reset".to_string(),
            })
        });

        let outcome = use_case(sheet_returning(SHEET), dispatcher, InMemoryWebhookStore::new())
            .execute(command(Some(HOOK)))
            .await
            .unwrap();

        assert!(!outcome.alert_sent);
        assert_eq!(outcome.signals.len(), 2);
    }

    #[tokio::test]
    async fn empty_sheet_skips_dispatch() {
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher.expect_dispatch().never();

        let outcome = use_case(sheet_returning("Header\n"), dispatcher, InMemoryWebhookStore::new())
            .execute(command(Some(HOOK)))
            .await
            .unwrap();

        assert!(outcome.signals.is_empty());
        assert!(!outcome.alert_sent);
    }

    #[tokio::test]
    async fn fetch_error_is_classified() {
        let mut sheets = MockSheetSource::new();
        sheets
            .expect_fetch_csv()
            .returning(|_| Err(SheetError::Status { status: 404 }));
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher.expect_dispatch().never();

        let err = use_case(sheets, dispatcher, InMemoryWebhookStore::new())
            .execute(command(Some(HOOK)))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Fetch);
        let api: ApiError = err.into();
        assert!(api.message().contains("404"));
    }

    #[tokio::test]
    async fn webhook_name_resolves_through_store() {
        let store = InMemoryWebhookStore::new();
        store
            .save(WebhookEntry::new("alpha", HOOK).unwrap())
            .await
            .unwrap();

        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher
            .expect_dispatch()
            .withf(|url, payload| url == HOOK && payload.embeds[0].color == BUY_COLOR)
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = use_case(sheet_returning("h\nAAPL,buy,1\n"), dispatcher, store)
            .execute(ScanCommand {
                sheet_id: Some("sheet-1".to_string()),
                webhook_url: None,
                webhook_name: Some("alpha".to_string()),
            })
            .await
            .unwrap();

        assert!(outcome.alert_sent);
    }

    #[tokio::test]
    async fn padded_webhook_name_matches_saved_entry() {
        let store = InMemoryWebhookStore::new();
        store
            .save(WebhookEntry::new("desk", HOOK).unwrap())
            .await
            .unwrap();

        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher
            .expect_dispatch()
            .withf(|url, _| url == HOOK)
            .times(1)
            .returning(|_, _| Ok(()));

        let outcome = use_case(sheet_returning(SHEET), dispatcher, store)
            .execute(ScanCommand {
                sheet_id: Some("sheet-1".to_string()),
                webhook_url: None,
                webhook_name: Some("  desk ".to_string()),
            })
            .await
            .unwrap();

        assert!(outcome.alert_sent);
    }

    #[tokio::test]
    async fn unknown_webhook_name_fails_before_fetch() {
        let mut sheets = MockSheetSource::new();
        sheets.expect_fetch_csv().never();
        let mut dispatcher = MockAlertDispatcher::new();
        dispatcher.expect_dispatch().never();

        let err = use_case(sheets, dispatcher, InMemoryWebhookStore::new())
            .execute(ScanCommand {
                sheet_id: Some("sheet-1".to_string()),
                webhook_url: None,
                webhook_name: Some("ghost".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ScanError::UnknownWebhook(ref n) if n == "ghost"));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
