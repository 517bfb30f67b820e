mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, TwilioConfig};
pub use repos::{DeleteResult, Repos};
pub use services::{
    AssistantError, CannedAssistantProvider, FoodDataApi, FoodDataError, GeminiAssistantProvider,
    IAssistantProvider, ISmsGateway, InMemorySmsGateway, NutritionFacts, SmsError,
    TwilioSmsGateway,
};
use services::{create_assistant_provider, create_sms_gateway};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct GlucomateContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub sms: Arc<dyn ISmsGateway>,
    pub assistant: Arc<dyn IAssistantProvider>,
}

struct ContextParams {
    pub mongodb_connection_string: String,
    pub mongodb_db_name: String,
}

impl GlucomateContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_mongodb(
            &params.mongodb_connection_string,
            &params.mongodb_db_name,
        )
        .await
        .expect("Mongodb credentials must be set and valid");
        let config = Config::new();
        let sms = create_sms_gateway(&config);
        let assistant = create_assistant_provider(&config);
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            sms,
            assistant,
        }
    }

    /// Context backed entirely by in-memory doubles. Tests replace `sys`,
    /// `sms` and `assistant` with their own instances where needed.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            sms: Arc::new(InMemorySmsGateway::new()),
            assistant: Arc::new(CannedAssistantProvider::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> GlucomateContext {
    GlucomateContext::create(ContextParams {
        mongodb_connection_string: get_env_var("MONGODB_CONNECTION_STRING"),
        mongodb_db_name: get_env_var("MONGODB_NAME"),
    })
    .await
}

fn get_env_var(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| panic!("{} env var to be present.", name))
}
