use chrono::NaiveDate;
use chrono_tz::Tz;
use httpmock::MockServer;
use pollemic_infra::{Config, FixedSys, PollemicContext};
use pollemic_sdk::{PollemicSDK, StaticSession};
use std::sync::Arc;

pub const TOKEN: &str = "test-token";

pub struct TestApp {
    pub server: MockServer,
    pub ctx: PollemicContext,
}

/// "Now" for every test: 2025-03-10 12:00 on the dashboard wall clock
pub fn now() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// Launch a mock backend and point a context at it
pub async fn spawn_app() -> (TestApp, PollemicSDK, String) {
    let server = MockServer::start_async().await;
    let address = server.base_url();

    let config = Config {
        api_url: address.clone(),
        api_token: Some(TOKEN.into()),
        timezone: Tz::UTC,
        survey_limit: 20,
    };
    let session = Arc::new(StaticSession::new(Some(TOKEN.into()), None));
    let ctx = PollemicContext::create(config, session, Arc::new(FixedSys::at_utc(now())));
    let sdk = ctx.sdk.clone();

    (TestApp { server, ctx }, sdk, address)
}
