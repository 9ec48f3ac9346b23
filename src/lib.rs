pub mod aggregate;
pub mod args;
pub mod campaign;
pub mod currency;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod utils;

pub use args::Args;
pub use currency::{init_default_rates, ExchangeRateTable};
pub use error::ScrapeError;
pub use fetch::PageSource;
pub use pipeline::{analyze_campaigns, analyze_page};
pub use stats::{AnalysisResult, MetricsResult};
