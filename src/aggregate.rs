use regex::Regex;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::info;

use crate::campaign::CampaignRecord;
use crate::currency::{normalize, ExchangeRateTable};
use crate::stats::{GroupAccumulator, GroupMap};

static TIME_LEFT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*(day|week|month|year)").unwrap());

/// Rough day counts per unit.
const UNIT_DAYS: [(&str, u64); 4] = [("day", 1), ("week", 7), ("month", 30), ("year", 365)];

/// Last comma-separated segment of a location, trimmed.
pub fn country_from_location(location: &str) -> &str {
    location.rsplit(',').next().unwrap_or(location).trim()
}

/// Parses the first "<n> <unit>" in `time_left` into days; 0 when absent.
pub fn days_from_time(time_left: &str) -> u64 {
    let Some(captures) = TIME_LEFT_PATTERN.captures(time_left) else {
        return 0;
    };

    // ASCII digits only, so a parse failure can only be overflow.
    let number = captures[1].parse::<u64>().unwrap_or(u64::MAX);
    let unit = &captures[2];
    let per_unit = UNIT_DAYS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, days)| *days)
        .unwrap_or(0);

    number.saturating_mul(per_unit)
}

fn upsert<'a>(groups: &'a mut GroupMap, key: &str) -> &'a mut GroupAccumulator {
    groups.entry(key.to_string()).or_default()
}

/// Buckets every campaign by category and by country, in input order.
pub fn aggregate(records: &[CampaignRecord], rates: &ExchangeRateTable) -> (GroupMap, GroupMap) {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "aggregation",
        campaign_count = records.len(),
        "Aggregating campaigns"
    );

    let mut category_groups = GroupMap::new();
    let mut location_groups = GroupMap::new();

    for record in records {
        let category = record.category();
        let country = country_from_location(record.location());
        let currency = record.currency();

        let raised = normalize(record.money_raised(), currency, rates);
        let target = normalize(record.target(), currency, rates);
        let fund_percentage = (raised / target) * 100.0;
        let days = days_from_time(record.time_left());

        upsert(&mut category_groups, category).record(raised, target, fund_percentage, days);
        upsert(&mut location_groups, country).record(raised, target, fund_percentage, days);
    }

    info!(
        action = "complete",
        component = "aggregation",
        categories = category_groups.len(),
        locations = location_groups.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Aggregation completed"
    );

    (category_groups, location_groups)
}
