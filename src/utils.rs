use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::stats::Metric;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_usd(value: f64) -> String {
    format!("{:.2} USD", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_metric(metric: Metric, value: f64) -> String {
    if metric.is_percentage() {
        format_percent(value)
    } else {
        format_usd(value)
    }
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be greater than 0");
        }
    }

    if args.input.is_none() {
        let url = Url::parse(&args.url)
            .map_err(|e| anyhow::anyhow!("--url is not a valid URL ({}): {}", e, args.url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("--url must use http or https, got '{}'", url.scheme());
        }
    }

    Ok(())
}
