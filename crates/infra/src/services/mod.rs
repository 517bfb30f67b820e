mod assistant;
mod food_data;
mod sms;

pub use assistant::{
    AssistantError, CannedAssistantProvider, GeminiAssistantProvider, IAssistantProvider,
};
pub use food_data::{FoodDataApi, FoodDataError, NutritionFacts};
pub use sms::{ISmsGateway, InMemorySmsGateway, SmsError, TwilioSmsGateway};

use crate::config::Config;
use std::sync::Arc;
use tracing::warn;

pub(crate) fn create_sms_gateway(config: &Config) -> Arc<dyn ISmsGateway> {
    match &config.twilio {
        Some(twilio) => Arc::new(TwilioSmsGateway::new(twilio)),
        None => {
            warn!("Twilio is not configured. Outbound SMS will only be recorded in memory.");
            Arc::new(InMemorySmsGateway::new())
        }
    }
}

pub(crate) fn create_assistant_provider(config: &Config) -> Arc<dyn IAssistantProvider> {
    match &config.gemini_api_key {
        Some(api_key) => Arc::new(GeminiAssistantProvider::new(api_key.clone())),
        None => {
            warn!("Gemini is not configured. The assistant will reply with a canned message.");
            Arc::new(CannedAssistantProvider::new())
        }
    }
}
