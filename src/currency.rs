//! Multi-currency price display
//!
//! All stored prices are denominated in the base currency (USD). Conversion
//! uses a static rate table; the selected display currency persists across
//! sessions and restores to USD if the stored code is unknown.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{keys, KvStore};

/// Base currency all catalog prices are stored in
pub const BASE_CURRENCY: &str = "USD";

/// One entry of the conversion table
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    /// ISO-ish code
    pub code: &'static str,
    /// Rate relative to the base currency
    pub rate: f64,
    /// Display symbol
    pub symbol: &'static str,
    /// Human-readable name
    pub name: &'static str,
}

/// Currencies conventionally displayed without a fractional subunit
const ZERO_DECIMAL_CODES: &[&str] = &["JPY", "KRW"];

/// Static conversion table, USD base
pub static CURRENCY_TABLE: Lazy<Vec<Currency>> = Lazy::new(|| {
    vec![
        Currency { code: "USD", rate: 1.0, symbol: "$", name: "US Dollar" },
        Currency { code: "EUR", rate: 0.85, symbol: "\u{20ac}", name: "Euro" },
        Currency { code: "GBP", rate: 0.73, symbol: "\u{a3}", name: "British Pound" },
        Currency { code: "CAD", rate: 1.25, symbol: "C$", name: "Canadian Dollar" },
        Currency { code: "AUD", rate: 1.35, symbol: "A$", name: "Australian Dollar" },
        Currency { code: "JPY", rate: 110.0, symbol: "\u{a5}", name: "Japanese Yen" },
        Currency { code: "CHF", rate: 0.92, symbol: "CHF", name: "Swiss Franc" },
        Currency { code: "CNY", rate: 6.45, symbol: "\u{a5}", name: "Chinese Yuan" },
        Currency { code: "INR", rate: 74.5, symbol: "\u{20b9}", name: "Indian Rupee" },
        Currency { code: "BRL", rate: 5.2, symbol: "R$", name: "Brazilian Real" },
        Currency { code: "MXN", rate: 20.5, symbol: "$", name: "Mexican Peso" },
        Currency { code: "KRW", rate: 1180.0, symbol: "\u{20a9}", name: "Korean Won" },
    ]
});

/// Look up a table entry by code
pub fn lookup(code: &str) -> Option<&'static Currency> {
    CURRENCY_TABLE.iter().find(|c| c.code == code)
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCurrency {
    code: String,
}

/// Selected display currency with conversion and formatting
///
/// Owned by the application root and handed to price displays; not an
/// ambient singleton.
#[derive(Debug)]
pub struct CurrencyStore {
    current: &'static Currency,
    store: KvStore,
}

impl CurrencyStore {
    /// Restore the selection from the store, defaulting to the base currency
    ///
    /// A stored code that is no longer in the table reads as the default.
    pub fn load(store: KvStore) -> Self {
        let current = store
            .load::<PersistedCurrency>(keys::CURRENCY)
            .and_then(|p| lookup(&p.code))
            .or_else(|| lookup(BASE_CURRENCY))
            .unwrap_or(&CURRENCY_TABLE[0]);
        Self { current, store }
    }

    /// Currently selected currency
    pub fn current(&self) -> &Currency {
        self.current
    }

    /// Select a currency by code and persist the choice
    ///
    /// Unknown codes are ignored. A persistence failure degrades to an
    /// in-memory selection.
    pub fn set_currency(&mut self, code: &str) {
        let Some(currency) = lookup(code) else {
            return;
        };
        self.current = currency;
        if let Err(e) = self.store.save(
            keys::CURRENCY,
            &PersistedCurrency {
                code: code.to_string(),
            },
        ) {
            warn!(code, error = %e, "failed to persist currency selection");
        }
    }

    /// Convert a base-currency price into the selected currency
    ///
    /// Zero-decimal currencies round to a whole number, everything else to
    /// two decimal places.
    pub fn convert(&self, base_price: u32) -> f64 {
        let converted = f64::from(base_price) * self.current.rate;
        if self.is_zero_decimal() {
            converted.round()
        } else {
            (converted * 100.0).round() / 100.0
        }
    }

    /// Format a base-currency price for display in the selected currency
    pub fn format(&self, base_price: u32) -> String {
        let converted = self.convert(base_price);
        if self.is_zero_decimal() {
            format!(
                "{}{}",
                self.current.symbol,
                group_thousands(converted as i64)
            )
        } else {
            format!("{}{:.2}", self.current.symbol, converted)
        }
    }

    fn is_zero_decimal(&self) -> bool {
        ZERO_DECIMAL_CODES.contains(&self.current.code)
    }
}

/// Insert thousands separators into a whole number
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn open_store() -> (TempDir, CurrencyStore) {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        (dir, CurrencyStore::load(kv))
    }

    #[test]
    fn test_defaults_to_usd() {
        let (_dir, store) = open_store();
        assert_eq!(store.current().code, "USD");
    }

    #[test]
    fn test_usd_format_round_trip() {
        let (_dir, store) = open_store();
        assert_eq!(store.convert(42), 42.0);
        assert_eq!(store.format(42), "$42.00");
    }

    #[test]
    fn test_jpy_rounds_to_integer_with_grouping() {
        let (_dir, mut store) = open_store();
        store.set_currency("JPY");
        assert_eq!(store.convert(100), 11_000.0);
        assert_eq!(store.format(100), "\u{a5}11,000");
    }

    #[test]
    fn test_krw_is_zero_decimal() {
        let (_dir, mut store) = open_store();
        store.set_currency("KRW");
        assert_eq!(store.format(2), "\u{20a9}2,360");
    }

    #[test]
    fn test_two_decimal_rounding() {
        let (_dir, mut store) = open_store();
        store.set_currency("EUR");
        // 30 * 0.85 = 25.5
        assert_eq!(store.convert(30), 25.5);
        assert_eq!(store.format(30), "\u{20ac}25.50");
    }

    #[test]
    fn test_unknown_code_is_ignored() {
        let (_dir, mut store) = open_store();
        store.set_currency("XYZ");
        assert_eq!(store.current().code, "USD");
    }

    #[test]
    fn test_selection_persists_across_loads() {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        let mut store = CurrencyStore::load(kv.clone());
        store.set_currency("GBP");

        let restored = CurrencyStore::load(kv);
        assert_eq!(restored.current().code, "GBP");
    }

    #[test]
    fn test_unknown_persisted_code_restores_default() {
        let dir = TempDir::new().unwrap();
        let kv = KvStore::open(dir.path()).unwrap();
        kv.save(
            keys::CURRENCY,
            &PersistedCurrency {
                code: "ZZZ".to_string(),
            },
        )
        .unwrap();

        let store = CurrencyStore::load(kv);
        assert_eq!(store.current().code, "USD");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(123_456_789), "123,456,789");
    }
}
