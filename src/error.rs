use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("Error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to scrape. Code: {}", .status.as_u16())]
    HttpStatus { status: StatusCode },
    #[error("Couldn't find the campaigns script tag.")]
    TagNotFound,
    #[error("Couldn't extract the JSON data.")]
    DataNotFound,
    #[error("Malformed campaign JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read page: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    /// Failures that mean "no data": the run stops without a report but
    /// still terminates normally.
    pub fn aborts_quietly(&self) -> bool {
        matches!(
            self,
            ScrapeError::Http(_)
                | ScrapeError::HttpStatus { .. }
                | ScrapeError::TagNotFound
                | ScrapeError::DataNotFound
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_includes_code() {
        let err = ScrapeError::HttpStatus {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "Failed to scrape. Code: 404");
        assert!(err.aborts_quietly());
    }

    #[test]
    fn malformed_json_is_not_quiet() {
        let err: ScrapeError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(!err.aborts_quietly());
        assert!(!ScrapeError::Io(std::io::Error::other("gone")).aborts_quietly());
        assert!(ScrapeError::TagNotFound.aborts_quietly());
        assert!(ScrapeError::DataNotFound.aborts_quietly());
    }
}
