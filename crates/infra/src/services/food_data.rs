use serde::Deserialize;
use thiserror::Error;

const FDC_API_BASE: &str = "https://api.nal.usda.gov/fdc/v1";

const CARBS_NUTRIENT: &str = "Carbohydrate, by difference";
const PROTEIN_NUTRIENT: &str = "Protein";

#[derive(Debug, Error)]
pub enum FoodDataError {
    #[error("Nutrition lookup failed: {0}")]
    Request(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionFacts {
    pub carbs: f64,
    pub protein: f64,
}

/// Client for the USDA FoodData Central search API.
pub struct FoodDataApi {
    client: reqwest::Client,
    api_key: String,
}

impl FoodDataApi {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Looks up the best match for the food description and returns its
    /// carbohydrate and protein content. `None` when the API has no match
    /// or the match lacks either nutrient.
    pub async fn search(&self, food: &str) -> Result<Option<NutritionFacts>, FoodDataError> {
        let url = format!("{}/foods/search", FDC_API_BASE);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", food),
                ("pageSize", "1"),
            ])
            .send()
            .await
            .map_err(|e| FoodDataError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| FoodDataError::Request(e.to_string()))?;

        let data: SearchResponse = response
            .json()
            .await
            .map_err(|e| FoodDataError::Request(e.to_string()))?;

        let food = match data.foods.into_iter().next() {
            Some(food) => food,
            None => return Ok(None),
        };

        let nutrient = |name: &str| {
            food.food_nutrients
                .iter()
                .find(|n| n.nutrient_name == name)
                .map(|n| n.value)
        };
        let facts = match (nutrient(CARBS_NUTRIENT), nutrient(PROTEIN_NUTRIENT)) {
            (Some(carbs), Some(protein)) => Some(NutritionFacts { carbs, protein }),
            _ => None,
        };
        Ok(facts)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodItem {
    #[serde(default)]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodNutrient {
    #[serde(default)]
    nutrient_name: String,
    #[serde(default)]
    value: f64,
}
