//! Static fallback exchange rates
//!
//! Used when both live tiers fail. Rates are approximate and only as fresh as
//! this table.

use std::collections::HashMap;

use crate::models::Currency;
use crate::models::Currency::{Aud, Cad, Chf, Cny, Eur, Gbp, Inr, Jpy, Usd};

type Row = (Currency, [(Currency, f64); 8]);

const STANDARD_RATES: [Row; 9] = [
    (Usd, [(Eur, 0.92), (Gbp, 0.79), (Jpy, 149.5), (Cad, 1.35), (Aud, 1.52), (Chf, 0.87), (Cny, 7.18), (Inr, 83.2)]),
    (Eur, [(Usd, 1.09), (Gbp, 0.86), (Jpy, 162.5), (Cad, 1.47), (Aud, 1.65), (Chf, 0.95), (Cny, 7.80), (Inr, 90.4)]),
    (Gbp, [(Usd, 1.27), (Eur, 1.16), (Jpy, 189.2), (Cad, 1.71), (Aud, 1.92), (Chf, 1.10), (Cny, 9.09), (Inr, 105.3)]),
    (Jpy, [(Usd, 0.0067), (Eur, 0.0062), (Gbp, 0.0053), (Cad, 0.0090), (Aud, 0.0102), (Chf, 0.0058), (Cny, 0.048), (Inr, 0.56)]),
    (Cad, [(Usd, 0.74), (Eur, 0.68), (Gbp, 0.58), (Jpy, 110.7), (Aud, 1.13), (Chf, 0.64), (Cny, 5.32), (Inr, 61.6)]),
    (Aud, [(Usd, 0.66), (Eur, 0.61), (Gbp, 0.52), (Jpy, 98.4), (Cad, 0.88), (Chf, 0.57), (Cny, 4.72), (Inr, 54.7)]),
    (Chf, [(Usd, 1.15), (Eur, 1.05), (Gbp, 0.91), (Jpy, 172.4), (Cad, 1.56), (Aud, 1.75), (Cny, 8.25), (Inr, 95.6)]),
    (Cny, [(Usd, 0.14), (Eur, 0.13), (Gbp, 0.11), (Jpy, 20.8), (Cad, 0.19), (Aud, 0.21), (Chf, 0.12), (Inr, 11.6)]),
    (Inr, [(Usd, 0.012), (Eur, 0.011), (Gbp, 0.0095), (Jpy, 1.80), (Cad, 0.016), (Aud, 0.018), (Chf, 0.010), (Cny, 0.086)]),
];

/// A `(from, to) -> rate` lookup table
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackTable {
    rates: HashMap<(Currency, Currency), f64>,
}

impl FallbackTable {
    /// The built-in table covering every pair of supported currencies
    pub fn standard() -> Self {
        STANDARD_RATES
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(to, rate)| (*from, *to, *rate)))
            .collect()
    }

    /// An empty table; every lookup misses
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    pub fn rate(&self, from: Currency, to: Currency) -> Option<f64> {
        self.rates.get(&(from, to)).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All entries sorted by `(from, to)`
    pub fn entries(&self) -> Vec<(Currency, Currency, f64)> {
        let mut entries: Vec<_> = self
            .rates
            .iter()
            .map(|((from, to), rate)| (*from, *to, *rate))
            .collect();
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        entries
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FromIterator<(Currency, Currency, f64)> for FallbackTable {
    fn from_iter<I: IntoIterator<Item = (Currency, Currency, f64)>>(iter: I) -> Self {
        Self {
            rates: iter
                .into_iter()
                .map(|(from, to, rate)| ((from, to), rate))
                .collect(),
        }
    }
}
