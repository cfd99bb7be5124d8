//! Tiered exchange-rate resolution
//!
//! A lookup walks `Primary -> Secondary -> Fallback` and stops at the first
//! tier that yields a usable rate. Each live tier gets exactly one attempt.
//! `from == to` short-circuits with a rate of 1 and performs no lookup.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::fallback::FallbackTable;
use super::source::{
    describe_timeout, http_client, OfflineSource, PairConversionSource, RateSource,
    RateTableSource,
};
use crate::config::settings::RateSettings;
use crate::error::{PupilResult, RateError};
use crate::models::{ConversionQuery, ConversionResult, Currency, LiveTier, Provenance};
use crate::services::task::{run_cancellable, CancelToken};

/// Lookup progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupState {
    TryingPrimary,
    TryingSecondary,
    Fallback,
}

/// Resolves exchange rates across the live tiers and the fallback table
#[derive(Clone)]
pub struct RateProvider {
    primary: Arc<dyn RateSource>,
    secondary: Arc<dyn RateSource>,
    fallback: FallbackTable,
}

impl std::fmt::Debug for RateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateProvider")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .field("fallback_entries", &self.fallback.len())
            .finish()
    }
}

impl RateProvider {
    pub fn new(
        primary: impl RateSource + 'static,
        secondary: impl RateSource + 'static,
        fallback: FallbackTable,
    ) -> Self {
        Self {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
            fallback,
        }
    }

    /// Build the provider described by the user's settings
    pub fn from_settings(settings: &RateSettings) -> PupilResult<Self> {
        if settings.offline {
            debug!("rate provider in offline mode");
            return Ok(Self::offline());
        }

        let client = http_client(settings)?;
        debug!(
            primary = %settings.primary_base_url,
            secondary = %settings.secondary_url,
            timeout = %describe_timeout(settings.request_timeout()),
            "rate provider configured"
        );
        Ok(Self::new(
            RateTableSource::new(client.clone(), settings.primary_base_url.clone()),
            PairConversionSource::new(client, settings.secondary_url.clone()),
            FallbackTable::standard(),
        ))
    }

    /// Both live tiers fail immediately; answers come from the fallback table
    pub fn offline() -> Self {
        Self::new(
            OfflineSource::new(RateTableSource::NAME),
            OfflineSource::new(PairConversionSource::NAME),
            FallbackTable::standard(),
        )
    }

    pub fn fallback(&self) -> &FallbackTable {
        &self.fallback
    }

    /// Convert `query`, running to completion
    pub async fn convert(&self, query: &ConversionQuery) -> Result<ConversionResult, RateError> {
        self.convert_cancellable(query, &CancelToken::never()).await
    }

    /// Convert `query`; cancelling `token` aborts any in-flight lookup and
    /// skips the remaining tiers
    pub async fn convert_cancellable(
        &self,
        query: &ConversionQuery,
        token: &CancelToken,
    ) -> Result<ConversionResult, RateError> {
        let (rate, provenance) = self.resolve(query.from, query.to, token).await?;
        let result = ConversionResult::new(*query, rate, provenance);
        info!(
            from = %query.from,
            to = %query.to,
            rate,
            source = provenance.label(),
            "currency converted"
        );
        Ok(result)
    }

    /// Resolve the rate for a pair along with where it came from
    pub async fn resolve(
        &self,
        from: Currency,
        to: Currency,
        token: &CancelToken,
    ) -> Result<(f64, Provenance), RateError> {
        if from == to {
            return Ok((1.0, Provenance::Identity));
        }

        let mut state = LookupState::TryingPrimary;
        loop {
            state = match state {
                LookupState::TryingPrimary => {
                    match self.attempt(&*self.primary, from, to, token).await? {
                        Some(rate) => return Ok((rate, Provenance::Live(LiveTier::Primary))),
                        None => LookupState::TryingSecondary,
                    }
                }
                LookupState::TryingSecondary => {
                    match self.attempt(&*self.secondary, from, to, token).await? {
                        Some(rate) => return Ok((rate, Provenance::Live(LiveTier::Secondary))),
                        None => LookupState::Fallback,
                    }
                }
                LookupState::Fallback => {
                    return match self.fallback.rate(from, to) {
                        Some(rate) => {
                            warn!(%from, %to, rate, "live rates unavailable, using fallback table");
                            Ok((rate, Provenance::FallbackTable))
                        }
                        None => Err(RateError::NoRateAvailable { from, to }),
                    };
                }
            };
        }
    }

    /// One attempt against a live source; `Ok(None)` moves to the next tier
    async fn attempt(
        &self,
        source: &dyn RateSource,
        from: Currency,
        to: Currency,
        token: &CancelToken,
    ) -> Result<Option<f64>, RateError> {
        match run_cancellable(token, source.fetch_rate(from, to)).await? {
            Ok(rate) => {
                debug!(source = source.name(), %from, %to, rate, "live rate found");
                Ok(Some(rate))
            }
            Err(err) => {
                warn!(source = source.name(), error = %err, "rate source failed");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use Currency::{Eur, Inr, Jpy, Usd};

    use crate::services::task::cancel_pair;

    /// Returns a fixed outcome and counts calls
    struct Scripted {
        name: &'static str,
        outcome: Result<f64, RateError>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn ok(name: &'static str, rate: f64) -> (Self, Arc<AtomicUsize>) {
            Self::with(name, Ok(rate))
        }

        fn failing(name: &'static str) -> (Self, Arc<AtomicUsize>) {
            Self::with(
                name,
                Err(RateError::NetworkFailure {
                    source_name: name,
                    reason: "HTTP 503 Service Unavailable".into(),
                }),
            )
        }

        fn missing(name: &'static str) -> (Self, Arc<AtomicUsize>) {
            Self::with(
                name,
                Err(RateError::MissingRateInPair {
                    source_name: name,
                    from: Usd,
                    to: Eur,
                }),
            )
        }

        fn with(name: &'static str, outcome: Result<f64, RateError>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    name,
                    outcome,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl RateSource for Scripted {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch_rate(&self, _from: Currency, _to: Currency) -> Result<f64, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    /// Never answers
    struct Hanging;

    #[async_trait]
    impl RateSource for Hanging {
        fn name(&self) -> &'static str {
            "hanging"
        }

        async fn fetch_rate(&self, _from: Currency, _to: Currency) -> Result<f64, RateError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(1.0)
        }
    }

    fn query(amount: f64, from: Currency, to: Currency) -> ConversionQuery {
        ConversionQuery::new(amount, from, to)
    }

    #[tokio::test]
    async fn test_primary_answers_first() {
        let (primary, primary_calls) = Scripted::ok("p", 0.91);
        let (secondary, secondary_calls) = Scripted::ok("s", 0.95);
        let provider = RateProvider::new(primary, secondary, FallbackTable::standard());

        let result = provider.convert(&query(100.0, Usd, Eur)).await.unwrap();
        assert_eq!(result.provenance, Provenance::Live(LiveTier::Primary));
        assert_eq!(result.rate, 0.91);
        assert!((result.converted_amount - 91.0).abs() < 1e-9);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_secondary_after_primary_failure() {
        let (primary, primary_calls) = Scripted::failing("p");
        let (secondary, secondary_calls) = Scripted::ok("s", 0.95);
        let provider = RateProvider::new(primary, secondary, FallbackTable::standard());

        let result = provider.convert(&query(10.0, Usd, Eur)).await.unwrap();
        assert_eq!(result.provenance, Provenance::Live(LiveTier::Secondary));
        assert_eq!(result.rate, 0.95);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_rate_counts_as_failure() {
        let (primary, _) = Scripted::missing("p");
        let (secondary, _) = Scripted::ok("s", 0.93);
        let provider = RateProvider::new(primary, secondary, FallbackTable::standard());

        let result = provider.convert(&query(1.0, Usd, Eur)).await.unwrap();
        assert_eq!(result.provenance, Provenance::Live(LiveTier::Secondary));
    }

    #[tokio::test]
    async fn test_fallback_after_both_fail() {
        let (primary, primary_calls) = Scripted::failing("p");
        let (secondary, secondary_calls) = Scripted::missing("s");
        let provider = RateProvider::new(primary, secondary, FallbackTable::standard());

        let result = provider.convert(&query(100.0, Usd, Eur)).await.unwrap();
        assert_eq!(result.provenance, Provenance::FallbackTable);
        assert_eq!(result.rate, 0.92);
        assert!((result.converted_amount - 92.0).abs() < 1e-9);
        // One attempt per tier, no retries
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_rate_available() {
        let (primary, _) = Scripted::failing("p");
        let (secondary, _) = Scripted::failing("s");
        let table: FallbackTable = [(Usd, Eur, 0.92)].into_iter().collect();
        let provider = RateProvider::new(primary, secondary, table);

        let err = provider.convert(&query(5.0, Jpy, Inr)).await.unwrap_err();
        assert_eq!(err, RateError::NoRateAvailable { from: Jpy, to: Inr });
    }

    #[tokio::test]
    async fn test_identity_skips_lookup() {
        let (primary, primary_calls) = Scripted::ok("p", 2.0);
        let (secondary, secondary_calls) = Scripted::ok("s", 3.0);
        let provider = RateProvider::new(primary, secondary, FallbackTable::empty());

        let result = provider.convert(&query(42.5, Usd, Usd)).await.unwrap();
        assert_eq!(result.rate, 1.0);
        assert_eq!(result.converted_amount, 42.5);
        assert_eq!(result.provenance, Provenance::Identity);
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_offline_uses_fallback() {
        let provider = RateProvider::offline();
        let result = provider.convert(&query(100.0, Usd, Eur)).await.unwrap();
        assert_eq!(result.provenance, Provenance::FallbackTable);
        assert_eq!(result.rate, 0.92);
    }

    #[tokio::test]
    async fn test_from_settings_offline() {
        let settings = RateSettings {
            offline: true,
            ..RateSettings::default()
        };
        let provider = RateProvider::from_settings(&settings).unwrap();
        let result = provider.convert(&query(1.0, Eur, Usd)).await.unwrap();
        assert_eq!(result.rate, 1.09);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_lookup() {
        let (secondary, secondary_calls) = Scripted::ok("s", 0.95);
        let provider = Arc::new(RateProvider::new(Hanging, secondary, FallbackTable::standard()));
        let (handle, token) = cancel_pair();

        let task = {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                provider
                    .convert_cancellable(&query(1.0, Usd, Eur), &token)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();

        assert_eq!(task.await.unwrap().unwrap_err(), RateError::Cancelled);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }
}
