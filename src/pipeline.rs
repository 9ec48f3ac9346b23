use anyhow::Result;
use std::time::Instant;
use tracing::{error, info};

use crate::aggregate::aggregate;
use crate::currency::{load_exchange_rates, ExchangeRateTable};
use crate::error::ScrapeError;
use crate::extract::extract_campaigns;
use crate::fetch::PageSource;
use crate::stats::{summarize, AnalysisResult};
use crate::Args;

/// Extract → aggregate → summarize over an already loaded page.
pub fn analyze_page(html: &str, rates: &ExchangeRateTable) -> Result<AnalysisResult, ScrapeError> {
    let page = extract_campaigns(html)?;
    let (category_groups, location_groups) = aggregate(&page.data, rates);

    let category_metrics = summarize(&category_groups);
    let location_metrics = summarize(&location_groups);

    Ok(AnalysisResult {
        campaign_count: page.data.len(),
        category_groups,
        location_groups,
        category_metrics,
        location_metrics,
    })
}

/// Runs the whole pipeline. `Ok(None)` means the page yielded no data and
/// nothing should be reported; malformed JSON and unreadable input files
/// are returned as errors.
pub fn analyze_campaigns(
    source: &PageSource,
    rates: &ExchangeRateTable,
) -> Result<Option<AnalysisResult>> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", source = ?source, "Starting campaign analysis");

    let outcome = source
        .load()
        .and_then(|html| analyze_page(&html, rates));

    let result = match outcome {
        Ok(result) => result,
        Err(e) if e.aborts_quietly() => {
            error!(action = "abort", component = "analysis", "{}", e);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        action = "complete",
        component = "analysis",
        campaign_count = result.campaign_count,
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(Some(result))
}

pub fn resolve_rates(args: &Args) -> Result<ExchangeRateTable> {
    if args.no_rates {
        info!(action = "configure", component = "rate_loading", "Currency conversion disabled");
        return Ok(ExchangeRateTable::reference_only());
    }
    load_exchange_rates(args.rates.as_deref())
}
