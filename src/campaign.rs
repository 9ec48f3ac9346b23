use serde::Deserialize;

/// Top-level object assigned to the campaigns global on the discovery page.
/// Only `data` is read; pagination and other siblings are ignored.
#[derive(Debug, Deserialize)]
pub struct CampaignPage {
    #[serde(default)]
    pub data: Vec<CampaignRecord>,
}

/// One campaign as scraped. Every field may be absent or `null`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub focus: Option<String>,
    pub location: Option<String>,
    pub money_raised: Option<f64>,
    pub target: Option<f64>,
    pub currency: Option<String>,
    pub time_left_in_words: Option<String>,
}

impl CampaignRecord {
    pub fn category(&self) -> &str {
        self.focus.as_deref().unwrap_or("")
    }

    pub fn location(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }

    /// Absent amounts count as 0.
    pub fn money_raised(&self) -> f64 {
        self.money_raised.unwrap_or(0.0)
    }

    /// Absent targets count as 1 so the funded percentage stays finite.
    pub fn target(&self) -> f64 {
        self.target.unwrap_or(1.0)
    }

    pub fn currency(&self) -> &str {
        self.currency
            .as_deref()
            .unwrap_or(crate::currency::REFERENCE_CURRENCY)
    }

    pub fn time_left(&self) -> &str {
        self.time_left_in_words.as_deref().unwrap_or("")
    }
}
