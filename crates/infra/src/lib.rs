mod config;
mod system;

pub use config::Config;
use pollemic_domain::NaiveDateTime;
use pollemic_sdk::{PollemicSDK, Session, StaticSession};
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};

#[derive(Clone)]
pub struct PollemicContext {
    pub config: Config,
    pub sdk: PollemicSDK,
    pub sys: Arc<dyn ISys>,
}

impl PollemicContext {
    pub fn create(config: Config, session: Arc<dyn Session>, sys: Arc<dyn ISys>) -> Self {
        let sdk = PollemicSDK::new(config.api_url.clone(), session);
        Self { config, sdk, sys }
    }

    /// "Now" on the dashboard wall clock
    pub fn now(&self) -> NaiveDateTime {
        self.sys.now_in(&self.config.timezone)
    }
}

/// Will setup the infrastructure context given the environment
pub fn setup_context() -> PollemicContext {
    let config = Config::new();
    let session = Arc::new(StaticSession::new(config.api_token.clone(), None));
    PollemicContext::create(config, session, Arc::new(RealSys {}))
}
