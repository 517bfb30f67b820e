use crate::error::GlucomateError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use chrono_tz::Tz;
use glucomate_api_structs::create_user::{APIResponse, RequestBody};
use glucomate_domain::{PhoneNumber, User};
use glucomate_infra::GlucomateContext;

fn error_handler(e: UseCaseErrors) -> GlucomateError {
    match e {
        UseCaseErrors::InvalidPhoneNumber(phone) => GlucomateError::BadClientData(format!(
            "Invalid phone number: {:?}. Expected E.164 format: +[country code][number].",
            phone
        )),
        UseCaseErrors::InvalidTimezone(timezone) => {
            GlucomateError::BadClientData(format!("Invalid timezone given: {:?}", timezone))
        }
        UseCaseErrors::InvalidEmail(email) => {
            GlucomateError::BadClientData(format!("Invalid email given: {:?}", email))
        }
        UseCaseErrors::EmailTaken(email) => GlucomateError::Conflict(format!(
            "A user with the email {:?} already exists.",
            email
        )),
        UseCaseErrors::StorageError => GlucomateError::InternalError,
    }
}

/// Signup. The only route besides the health check that requires no api
/// key; the response contains the key for all further requests.
pub async fn create_user_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let body = body.into_inner();
    let usecase = CreateUserUseCase {
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
        phone: body.phone,
        timezone: body.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Created().json(APIResponse::new(user)))
        .map_err(error_handler)
}

#[derive(Debug)]
struct CreateUserUseCase {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub timezone: String,
}

#[derive(Debug)]
enum UseCaseErrors {
    InvalidPhoneNumber(String),
    InvalidTimezone(String),
    InvalidEmail(String),
    EmailTaken(String),
    StorageError,
}

fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        if !is_valid_email(&self.email) {
            return Err(UseCaseErrors::InvalidEmail(self.email.clone()));
        }
        let phone = self
            .phone
            .parse::<PhoneNumber>()
            .map_err(|_| UseCaseErrors::InvalidPhoneNumber(self.phone.clone()))?;
        let timezone = self
            .timezone
            .parse::<Tz>()
            .map_err(|_| UseCaseErrors::InvalidTimezone(self.timezone.clone()))?;

        if ctx.repos.users.find_by_email(&self.email).await.is_some() {
            return Err(UseCaseErrors::EmailTaken(self.email.clone()));
        }

        let user = User::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
            phone,
            timezone,
            ctx.sys.get_timestamp_millis(),
        );

        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(user),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, phone: &str, timezone: &str) -> CreateUserUseCase {
        CreateUserUseCase {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            phone: phone.into(),
            timezone: timezone.into(),
        }
    }

    #[actix_web::test]
    async fn creates_user_with_api_key() {
        let ctx = GlucomateContext::create_inmemory();
        let user = execute(
            signup("ada@example.com", "+12345678901", "Europe/Oslo"),
            &ctx,
        )
        .await
        .unwrap();

        assert!(!user.secret_api_key.is_empty());
        assert_eq!(user.timezone, chrono_tz::Europe::Oslo);

        let found = ctx
            .repos
            .users
            .find_by_api_key(&user.secret_api_key)
            .await
            .unwrap();
        assert_eq!(found.id, user.id);
    }

    #[actix_web::test]
    async fn rejects_bad_input() {
        let ctx = GlucomateContext::create_inmemory();

        let res = execute(signup("not-an-email", "+12345678901", "UTC"), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::InvalidEmail(_))));

        let res = execute(signup("ada@example.com", "12345", "UTC"), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::InvalidPhoneNumber(_))));

        let res = execute(
            signup("ada@example.com", "+12345678901", "Mars/Olympus"),
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseErrors::InvalidTimezone(_))));
    }

    #[actix_web::test]
    async fn rejects_duplicate_email() {
        let ctx = GlucomateContext::create_inmemory();
        execute(signup("ada@example.com", "+12345678901", "UTC"), &ctx)
            .await
            .unwrap();

        let res = execute(signup("ada@example.com", "+12345678902", "UTC"), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::EmailTaken(_))));
    }
}
