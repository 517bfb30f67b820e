use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::get_nutrition::{APIResponse, QueryParams};
use glucomate_infra::{FoodDataApi, GlucomateContext, NutritionFacts};

fn error_handler(e: UseCaseErrors) -> GlucomateError {
    match e {
        UseCaseErrors::NotConfigured => GlucomateError::InternalError,
        UseCaseErrors::NoMatch => GlucomateError::NotFound(
            "No nutrition data found - try exact terms like 'raw potato'.".to_string(),
        ),
        UseCaseErrors::Lookup(_) => GlucomateError::InternalError,
    }
}

pub async fn get_nutrition_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    protect_route(&http_req, &ctx).await?;

    let food = query_params.into_inner().food;
    let usecase = GetNutritionUseCase { food: food.clone() };

    execute(usecase, &ctx)
        .await
        .map(|facts| {
            HttpResponse::Ok().json(APIResponse {
                food,
                carbs: facts.carbs,
                protein: facts.protein,
            })
        })
        .map_err(error_handler)
}

#[derive(Debug)]
struct GetNutritionUseCase {
    pub food: String,
}

#[derive(Debug)]
enum UseCaseErrors {
    NotConfigured,
    NoMatch,
    Lookup(String),
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNutritionUseCase {
    type Response = NutritionFacts;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetNutrition";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        let api_key = ctx
            .config
            .fdc_api_key
            .clone()
            .ok_or(UseCaseErrors::NotConfigured)?;

        let api = FoodDataApi::new(api_key);
        match api.search(&self.food).await {
            Ok(Some(facts)) => Ok(facts),
            Ok(None) => Err(UseCaseErrors::NoMatch),
            Err(e) => Err(UseCaseErrors::Lookup(e.to_string())),
        }
    }
}
