use crate::user::dtos::UserDTO;
use glucomate_domain::User;
use serde::{Deserialize, Serialize};

pub mod create_user {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub first_name: String,
        pub last_name: String,
        pub email: String,
        /// E.164, e.g. "+12345678901"
        pub phone: String,
        /// IANA timezone name, e.g. "Europe/Oslo"
        pub timezone: String,
    }

    /// The api key is only ever returned here, at signup.
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        pub api_key: String,
    }

    impl APIResponse {
        pub fn new(user: User) -> Self {
            let api_key = user.secret_api_key.clone();
            Self {
                user: UserDTO::new(user),
                api_key,
            }
        }
    }
}

pub mod get_me {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
    }

    impl APIResponse {
        pub fn new(user: User) -> Self {
            Self {
                user: UserDTO::new(user),
            }
        }
    }
}
