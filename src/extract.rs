use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Instant;
use tracing::info;

use crate::campaign::CampaignPage;
use crate::error::ScrapeError;

/// Global the discovery page assigns its campaign listing to.
pub const CAMPAIGNS_MARKER: &str = "window.Chuffed.campaigns";

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("script").unwrap());

// Greedy: runs to the last `};` in the script.
static ASSIGNMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)window\.Chuffed\.campaigns = (\{.*\});").unwrap());

/// Returns the text of the first script element mentioning the campaigns global.
pub fn find_campaigns_script(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&SCRIPT_SELECTOR)
        .map(|element| element.text().collect::<String>())
        .find(|text| text.contains(CAMPAIGNS_MARKER))
}

/// Isolates the JSON object literal assigned to the campaigns global.
pub fn extract_embedded_json(html: &str) -> Result<String, ScrapeError> {
    let script = find_campaigns_script(html).ok_or(ScrapeError::TagNotFound)?;

    let captures = ASSIGNMENT_PATTERN
        .captures(&script)
        .ok_or(ScrapeError::DataNotFound)?;

    Ok(captures[1].to_string())
}

pub fn parse_campaigns(json: &str) -> Result<CampaignPage, ScrapeError> {
    Ok(serde_json::from_str(json)?)
}

pub fn extract_campaigns(html: &str) -> Result<CampaignPage, ScrapeError> {
    let start_time = Instant::now();
    info!(action = "start", component = "extraction", html_bytes = html.len(), "Extracting embedded campaign data");

    let json = extract_embedded_json(html)?;
    let page = parse_campaigns(&json)?;

    info!(
        action = "complete",
        component = "extraction",
        json_bytes = json.len(),
        campaign_count = page.data.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Extraction completed"
    );
    Ok(page)
}
