use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::fetch::{PageSource, DISCOVER_URL};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "fundscope",
    about = "Scrape crowdfunding campaigns and compare categories and countries by funding performance",
    version,
    long_about = None
)]
pub struct Args {
    /// Discovery page to scrape
    #[arg(short, long, default_value = DISCOVER_URL)]
    pub url: String,

    /// Read the page HTML from a file instead of fetching it
    #[arg(short, long, conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Path to a JSON exchange rate file (currency code to USD factor)
    #[arg(short, long)]
    pub rates: Option<PathBuf>,

    /// Disable currency conversion
    #[arg(long, conflicts_with = "rates")]
    pub no_rates: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Number of groups to list per analysis
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Initialize exchange_rates.json with default rates
    #[arg(long)]
    pub init: bool,
}

impl Args {
    pub fn source(&self) -> PageSource {
        match &self.input {
            Some(path) => PageSource::File(path.clone()),
            None => PageSource::Url(self.url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_discovery_page() {
        let args = Args::try_parse_from(["fundscope"]).unwrap();
        assert_eq!(args.source(), PageSource::Url(DISCOVER_URL.to_string()));
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.no_rates);
    }

    #[test]
    fn input_file_replaces_url() {
        let args =
            Args::try_parse_from(["fundscope", "--input", "page.html", "--format", "json"]).unwrap();
        assert_eq!(args.source(), PageSource::File(PathBuf::from("page.html")));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn conflicting_sources_rejected() {
        assert!(
            Args::try_parse_from(["fundscope", "--input", "a.html", "--url", "https://x.org"]).is_err()
        );
        assert!(Args::try_parse_from(["fundscope", "--rates", "r.json", "--no-rates"]).is_err());
    }
}
