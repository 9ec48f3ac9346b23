use indexmap::IndexMap;
use serde::Serialize;

/// Running totals for one category or country.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupAccumulator {
    money_raised: f64,
    total_target: f64,
    fund_percentages: Vec<f64>,
    time_periods: Vec<u64>,
    num_campaigns: usize,
}

impl GroupAccumulator {
    /// Adds one campaign. Amounts are already in the reference currency.
    pub fn record(&mut self, raised: f64, target: f64, fund_percentage: f64, days: u64) {
        self.money_raised += raised;
        self.total_target += target;
        self.fund_percentages.push(fund_percentage);
        self.time_periods.push(days);
        self.num_campaigns += 1;
    }

    pub fn money_raised(&self) -> f64 {
        self.money_raised
    }

    pub fn total_target(&self) -> f64 {
        self.total_target
    }

    pub fn fund_percentages(&self) -> &[f64] {
        &self.fund_percentages
    }

    pub fn time_periods(&self) -> &[u64] {
        &self.time_periods
    }

    pub fn num_campaigns(&self) -> usize {
        self.num_campaigns
    }

    pub fn total_days(&self) -> u64 {
        self.time_periods
            .iter()
            .fold(0u64, |acc, days| acc.saturating_add(*days))
    }
}

/// Groups keyed by category or country, in first-seen order.
pub type GroupMap = IndexMap<String, GroupAccumulator>;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    pub average_money_raised: IndexMap<String, f64>,
    pub average_fund_percentage: IndexMap<String, f64>,
    pub average_money_raised_per_day: IndexMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MoneyRaised,
    FundPercentage,
    MoneyRaisedPerDay,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::MoneyRaised,
        Metric::FundPercentage,
        Metric::MoneyRaisedPerDay,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::MoneyRaised => "Average Money Raised",
            Metric::FundPercentage => "Average Fund Percentage",
            Metric::MoneyRaisedPerDay => "Average Money Raised Per Day",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Metric::MoneyRaised => "average_money_raised",
            Metric::FundPercentage => "average_fund_percentage",
            Metric::MoneyRaisedPerDay => "average_money_raised_per_day",
        }
    }

    pub fn is_percentage(self) -> bool {
        matches!(self, Metric::FundPercentage)
    }
}

impl MetricsResult {
    pub fn values(&self, metric: Metric) -> &IndexMap<String, f64> {
        match metric {
            Metric::MoneyRaised => &self.average_money_raised,
            Metric::FundPercentage => &self.average_fund_percentage,
            Metric::MoneyRaisedPerDay => &self.average_money_raised_per_day,
        }
    }

    pub fn len(&self) -> usize {
        self.average_money_raised.len()
    }

    pub fn is_empty(&self) -> bool {
        self.average_money_raised.is_empty()
    }
}

/// Computes the three per-group averages. Empty groups are skipped.
pub fn summarize(groups: &GroupMap) -> MetricsResult {
    let mut metrics = MetricsResult::default();

    for (key, group) in groups {
        let num_campaigns = group.num_campaigns();
        if num_campaigns == 0 {
            continue;
        }

        let count = num_campaigns as f64;
        let average_money_raised = group.money_raised() / count;
        let average_fund_percentage = group.fund_percentages().iter().sum::<f64>() / count;
        // Not a per-campaign average: total raised over total days, or over 1
        // when no campaign reported any time left.
        let total_days = match group.total_days() {
            0 => 1,
            days => days,
        };
        let average_money_raised_per_day = group.money_raised() / total_days as f64;

        metrics
            .average_money_raised
            .insert(key.clone(), average_money_raised);
        metrics
            .average_fund_percentage
            .insert(key.clone(), average_fund_percentage);
        metrics
            .average_money_raised_per_day
            .insert(key.clone(), average_money_raised_per_day);
    }

    metrics
}

/// First key holding the strictly largest value, scanning in map order.
pub fn find_best(values: &IndexMap<String, f64>) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    let mut best_value = f64::NEG_INFINITY;

    for (key, value) in values {
        if *value > best_value {
            best_value = *value;
            best = Some((key.as_str(), *value));
        }
    }

    best
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub campaign_count: usize,
    pub category_groups: GroupMap,
    pub location_groups: GroupMap,
    pub category_metrics: MetricsResult,
    pub location_metrics: MetricsResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(entries: &[(f64, f64, u64)]) -> GroupAccumulator {
        let mut acc = GroupAccumulator::default();
        for (raised, target, days) in entries {
            acc.record(*raised, *target, raised / target * 100.0, *days);
        }
        acc
    }

    #[test]
    fn record_keeps_lists_in_step_with_count() {
        let acc = group(&[(10.0, 20.0, 3), (5.0, 5.0, 0), (1.0, 4.0, 7)]);
        assert_eq!(acc.num_campaigns(), 3);
        assert_eq!(acc.fund_percentages().len(), 3);
        assert_eq!(acc.time_periods(), &[3, 0, 7]);
        assert_eq!(acc.money_raised(), 16.0);
        assert_eq!(acc.total_target(), 29.0);
        assert_eq!(acc.total_days(), 10);
    }

    #[test]
    fn averages_per_group() {
        let mut groups = GroupMap::new();
        groups.insert("Health".into(), group(&[(100.0, 200.0, 90), (300.0, 100.0, 10)]));

        let metrics = summarize(&groups);
        assert_eq!(metrics.average_money_raised["Health"], 200.0);
        assert_eq!(metrics.average_fund_percentage["Health"], 175.0);
        assert_eq!(metrics.average_money_raised_per_day["Health"], 4.0);
    }

    #[test]
    fn zero_days_divides_by_one() {
        let mut groups = GroupMap::new();
        groups.insert("Remote".into(), group(&[(120.0, 100.0, 0), (30.0, 100.0, 0)]));

        let metrics = summarize(&groups);
        assert_eq!(metrics.average_money_raised_per_day["Remote"], 150.0);
    }

    #[test]
    fn empty_groups_are_skipped() {
        let mut groups = GroupMap::new();
        groups.insert("Empty".into(), GroupAccumulator::default());
        groups.insert("Animals".into(), group(&[(1.0, 2.0, 1)]));

        let metrics = summarize(&groups);
        assert_eq!(metrics.len(), 1);
        for metric in Metric::ALL {
            assert!(!metrics.values(metric).contains_key("Empty"));
        }
    }

    #[test]
    fn find_best_prefers_first_on_ties() {
        let mut values = IndexMap::new();
        values.insert("Education".to_string(), 50.0);
        values.insert("Health".to_string(), 80.0);
        values.insert("Animals".to_string(), 80.0);
        values.insert("Arts".to_string(), -5.0);

        assert_eq!(find_best(&values), Some(("Health", 80.0)));
    }

    #[test]
    fn find_best_handles_negative_and_empty() {
        let mut values = IndexMap::new();
        assert_eq!(find_best(&values), None);

        values.insert("a".to_string(), -10.0);
        values.insert("b".to_string(), -3.0);
        assert_eq!(find_best(&values), Some(("b", -3.0)));

        let mut nan_only = IndexMap::new();
        nan_only.insert("x".to_string(), f64::NAN);
        assert_eq!(find_best(&nan_only), None);
    }
}
