use chrono_tz::Tz;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base url of the Pollemic backend
    pub api_url: String,
    /// Bearer token attached to every backend request
    pub api_token: Option<String>,
    /// Timezone in which dates and times of a schedule draft are
    /// interpreted. Validation compares drafts against "now" in this zone.
    pub timezone: Tz,
    /// How many surveys to load as reference data
    pub survey_limit: usize,
}

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_SURVEY_LIMIT: usize = 20;

impl Config {
    pub fn new() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_source<F: Fn(&str) -> Option<String>>(get: F) -> Self {
        let api_url = match get("POLLEMIC_API_URL") {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                info!(
                    "Did not find POLLEMIC_API_URL environment variable. Falling back to {}.",
                    DEFAULT_API_URL
                );
                DEFAULT_API_URL.to_string()
            }
        };

        let api_token = get("POLLEMIC_API_TOKEN").filter(|token| !token.is_empty());
        if api_token.is_none() {
            info!("Did not find POLLEMIC_API_TOKEN environment variable. Requests will be sent without authorization.");
        }

        let timezone = match get("POLLEMIC_TIMEZONE") {
            Some(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given POLLEMIC_TIMEZONE: {} is not valid, falling back to UTC.",
                        tz
                    );
                    Tz::UTC
                }
            },
            None => Tz::UTC,
        };

        let survey_limit = match get("POLLEMIC_SURVEY_LIMIT") {
            Some(limit) => match limit.parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    warn!(
                        "The given POLLEMIC_SURVEY_LIMIT: {} is not valid, falling back to the default limit: {}.",
                        limit, DEFAULT_SURVEY_LIMIT
                    );
                    DEFAULT_SURVEY_LIMIT
                }
            },
            None => DEFAULT_SURVEY_LIMIT,
        };

        Self {
            api_url,
            api_token,
            timezone,
            survey_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
