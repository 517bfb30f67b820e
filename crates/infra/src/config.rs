use glucomate_domain::{PhoneNumber, ID};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// The user whose reminders the delivery job evaluates each tick.
    /// When unset the job skips every tick (and logs that it did).
    pub reminder_recipient_user_id: Option<ID>,
    /// Twilio credentials for outbound SMS. When unset, sends are recorded
    /// in memory instead of hitting the transport.
    pub twilio: Option<TwilioConfig>,
    /// USDA FoodData Central API key for nutrition lookups
    pub fdc_api_key: Option<String>,
    /// Google Gemini API key for the assistant
    pub gemini_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: PhoneNumber,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or(default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let reminder_recipient_user_id = match std::env::var("REMINDER_RECIPIENT_USER_ID") {
            Ok(raw) => match raw.parse::<ID>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(
                        "The given REMINDER_RECIPIENT_USER_ID: {} is not a valid id. Reminder delivery will be disabled.",
                        raw
                    );
                    None
                }
            },
            Err(_) => {
                info!("Did not find REMINDER_RECIPIENT_USER_ID environment variable. Reminder delivery will be disabled.");
                None
            }
        };

        let twilio = match (
            std::env::var("TWILIO_ACCOUNT_SID"),
            std::env::var("TWILIO_AUTH_TOKEN"),
            std::env::var("TWILIO_PHONE_NUMBER"),
        ) {
            (Ok(account_sid), Ok(auth_token), Ok(from_number)) => {
                match from_number.parse::<PhoneNumber>() {
                    Ok(from_number) => Some(TwilioConfig {
                        account_sid,
                        auth_token,
                        from_number,
                    }),
                    Err(_) => {
                        warn!(
                            "The given TWILIO_PHONE_NUMBER: {} is not a valid E.164 number. SMS delivery will be disabled.",
                            from_number
                        );
                        None
                    }
                }
            }
            _ => {
                info!("Twilio environment variables (TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN, TWILIO_PHONE_NUMBER) are not all set. SMS delivery will be disabled.");
                None
            }
        };

        let fdc_api_key = std::env::var("FDC_API_KEY").ok();
        if fdc_api_key.is_none() {
            info!("Did not find FDC_API_KEY environment variable. Nutrition lookups will be disabled.");
        }

        let gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        if gemini_api_key.is_none() {
            info!("Did not find GEMINI_API_KEY environment variable. The assistant will use canned replies only.");
        }

        Self {
            port,
            reminder_recipient_user_id,
            twilio,
            fdc_api_key,
            gemini_api_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
