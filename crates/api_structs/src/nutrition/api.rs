use serde::{Deserialize, Serialize};

pub mod get_nutrition {
    use super::*;

    #[derive(Deserialize)]
    pub struct QueryParams {
        pub food: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub food: String,
        /// Grams of carbohydrate per 100g
        pub carbs: f64,
        /// Grams of protein per 100g
        pub protein: f64,
    }
}
