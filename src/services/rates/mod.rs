//! Exchange-rate lookup
//!
//! [`RateProvider`] tries the live sources in order and falls back to a
//! static [`FallbackTable`].

pub mod fallback;
pub mod provider;
pub mod source;

pub use fallback::FallbackTable;
pub use provider::RateProvider;
pub use source::{OfflineSource, PairConversionSource, RateSource, RateTableSource};
