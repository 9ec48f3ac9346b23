use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

pub const REFERENCE_CURRENCY: &str = "USD";

/// Rate file picked up from the working directory when `--rates` is not given.
pub const DEFAULT_RATES_FILE: &str = "exchange_rates.json";

// Include default rates at compile time
const DEFAULT_RATES_JSON: &str = include_str!("../default_exchange_rates.json");

/// Multiplicative factors converting a currency into the reference currency.
/// The reference currency always maps to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    rates: IndexMap<String, f64>,
}

impl ExchangeRateTable {
    /// A table that knows only the reference currency.
    pub fn reference_only() -> Self {
        let mut rates = IndexMap::new();
        rates.insert(REFERENCE_CURRENCY.to_string(), 1.0);
        Self { rates }
    }

    pub fn embedded() -> Result<Self> {
        Self::from_json(DEFAULT_RATES_JSON).context("Failed to parse embedded default rates")
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: IndexMap<String, f64> =
            serde_json::from_str(content).context("Rate table must be a JSON object of numbers")?;
        Self::from_rates(raw)
    }

    pub fn from_rates<I>(rates: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut table = Self::reference_only();
        for (code, factor) in rates {
            if !factor.is_finite() || factor <= 0.0 {
                anyhow::bail!("Invalid exchange rate for {}: {}", code, factor);
            }
            if code == REFERENCE_CURRENCY {
                continue;
            }
            table.rates.insert(code, factor);
        }
        Ok(table)
    }

    pub fn factor(&self, currency: &str) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Converts `amount` in `currency` to the reference currency.
///
/// Unknown currencies pass through unchanged, i.e. they are treated as if
/// already denominated in the reference currency.
pub fn normalize(amount: f64, currency: &str, table: &ExchangeRateTable) -> f64 {
    if currency == REFERENCE_CURRENCY {
        return amount;
    }

    match table.factor(currency) {
        Some(factor) => amount * factor,
        None => amount,
    }
}

pub fn load_exchange_rates(rates_file_path: Option<&Path>) -> Result<ExchangeRateTable> {
    load_exchange_rates_from(rates_file_path, Path::new(DEFAULT_RATES_FILE))
}

pub fn load_exchange_rates_from(
    rates_file_path: Option<&Path>,
    default_file: &Path,
) -> Result<ExchangeRateTable> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "rate_loading",
        "Starting exchange rate loading"
    );

    let table = if let Some(path) = rates_file_path {
        info!(action = "load", component = "rate_file", file_path = ?path, "Loading rates from specified file");
        if !path.exists() {
            anyhow::bail!("Rate file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)?;
        ExchangeRateTable::from_json(&content)
            .with_context(|| format!("Invalid rate file {:?}", path))?
    } else {
        let from_default_file = if default_file.exists() {
            info!(action = "load", component = "default_rate_file", file_path = ?default_file, "Loading rates from default file");
            match fs::read_to_string(default_file)
                .map_err(anyhow::Error::from)
                .and_then(|content| ExchangeRateTable::from_json(&content))
            {
                Ok(table) => Some(table),
                Err(e) => {
                    warn!(action = "parse", component = "default_rate_file", file_path = ?default_file, error = %e, "Ignoring invalid rate file");
                    None
                }
            }
        } else {
            None
        };

        match from_default_file {
            Some(table) => table,
            None => {
                info!(
                    action = "load",
                    component = "embedded_rates",
                    "Using embedded default rates"
                );
                ExchangeRateTable::embedded()?
            }
        }
    };

    let load_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "rate_loading",
        rate_count = table.len(),
        duration_ms = load_time.as_millis(),
        "Exchange rates ready"
    );
    Ok(table)
}

pub fn init_default_rates(target: &Path) -> Result<()> {
    if target.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            target.display()
        );
    }

    fs::write(target, DEFAULT_RATES_JSON)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    println!("Created {} with default exchange rates", target.display());

    Ok(())
}
