use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::{self, Write};

use crate::args::OutputFormat;
use crate::stats::{find_best, AnalysisResult, Metric, MetricsResult};
use crate::utils::{format_metric, format_percent, format_usd};

#[derive(Debug, Serialize, PartialEq)]
pub struct Best {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Conclusion {
    pub category: Option<Best>,
    pub location: Option<Best>,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub campaign_count: usize,
    pub categories: &'a MetricsResult,
    pub locations: &'a MetricsResult,
    pub conclusion: IndexMap<&'static str, Conclusion>,
}

fn best(metrics: &MetricsResult, metric: Metric) -> Option<Best> {
    find_best(metrics.values(metric)).map(|(key, value)| Best {
        key: key.to_string(),
        value,
    })
}

pub fn conclusion(result: &AnalysisResult, metric: Metric) -> Conclusion {
    Conclusion {
        category: best(&result.category_metrics, metric),
        location: best(&result.location_metrics, metric),
    }
}

fn write_group_section<W: Write>(
    out: &mut W,
    title: &str,
    metrics: &MetricsResult,
    top: Option<usize>,
) -> io::Result<()> {
    writeln!(out, "{}", title)?;

    let limit = top.unwrap_or(usize::MAX);
    for (key, raised) in metrics.average_money_raised.iter().take(limit) {
        let (Some(fund_percentage), Some(raised_per_day)) = (
            metrics.average_fund_percentage.get(key).copied(),
            metrics.average_money_raised_per_day.get(key).copied(),
        ) else {
            continue;
        };

        writeln!(out, "{}:", key)?;
        writeln!(out, "  Average Money Raised (USD): {}", format_usd(*raised))?;
        writeln!(out, "  Average Fund Percentage: {}", format_percent(fund_percentage))?;
        writeln!(
            out,
            "  Average Money Raised Per Day (USD): {}",
            format_usd(raised_per_day)
        )?;
        writeln!(out, "-----")?;
    }

    if metrics.len() > limit {
        writeln!(out, "... {} more", metrics.len() - limit)?;
    }
    Ok(())
}

fn write_best<W: Write>(out: &mut W, label: &str, best: Option<&Best>, metric: Metric) -> io::Result<()> {
    match best {
        Some(best) => writeln!(out, "  {}: {} - {}", label, best.key, format_metric(metric, best.value)),
        None => writeln!(out, "  {}: n/a", label),
    }
}

pub fn write_text_report<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    top: Option<usize>,
) -> io::Result<()> {
    write_group_section(out, "Category Analysis:", &result.category_metrics, top)?;
    writeln!(out)?;
    write_group_section(out, "Location Analysis:", &result.location_metrics, top)?;

    writeln!(out, "\nConclusion:")?;
    for metric in Metric::ALL {
        let conclusion = conclusion(result, metric);
        writeln!(out, "Best {}:", metric.label())?;
        write_best(out, "Category", conclusion.category.as_ref(), metric)?;
        write_best(out, "Location", conclusion.location.as_ref(), metric)?;
        writeln!(out, "-----")?;
    }
    Ok(())
}

pub fn render_json(result: &AnalysisResult) -> Result<String> {
    let report = JsonReport {
        campaign_count: result.campaign_count,
        categories: &result.category_metrics,
        locations: &result.location_metrics,
        conclusion: Metric::ALL
            .into_iter()
            .map(|metric| (metric.key(), conclusion(result, metric)))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn print_analysis_results(
    result: &AnalysisResult,
    format: OutputFormat,
    top: Option<usize>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => write_text_report(&mut out, result, top)?,
        OutputFormat::Json => writeln!(out, "{}", render_json(result)?)?,
    }
    out.flush()?;
    Ok(())
}
