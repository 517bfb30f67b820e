use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Weekday;
use glucomate_api_structs::create_reminder::{APIResponse, RequestBody};
use glucomate_api_structs::dtos::RecurrenceDTO;
use glucomate_domain::{is_valid_medicine_name, Recurrence, Reminder, SlotTime, ID};
use glucomate_infra::GlucomateContext;

fn error_handler(e: UseCaseErrors) -> GlucomateError {
    match e {
        UseCaseErrors::InvalidMedicineName(name) => GlucomateError::BadClientData(format!(
            "Invalid medicine name: {:?}. Only letters, numbers, hyphens and spaces are allowed.",
            name
        )),
        UseCaseErrors::InvalidTime(time) => GlucomateError::BadClientData(format!(
            "Invalid time given: {:?}. Expected \"HH:MM\".",
            time
        )),
        UseCaseErrors::TimeNotOnSlot(time) => GlucomateError::BadClientData(format!(
            "Invalid time given: {}. Reminders must fall on a fifteen-minute slot.",
            time
        )),
        UseCaseErrors::EmptyWeekdays => {
            GlucomateError::BadClientData("Please select at least one day.".to_string())
        }
        UseCaseErrors::InvalidWeekday(day) => {
            GlucomateError::BadClientData(format!("Invalid weekday given: {:?}", day))
        }
        UseCaseErrors::StorageError => GlucomateError::InternalError,
    }
}

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.into_inner();
    let usecase = CreateReminderUseCase {
        user_id: user.id,
        medicine: body.medicine,
        time: body.time,
        recurrence: body.recurrence,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(error_handler)
}

#[derive(Debug)]
struct CreateReminderUseCase {
    pub user_id: ID,
    pub medicine: String,
    pub time: String,
    pub recurrence: RecurrenceDTO,
}

#[derive(Debug)]
enum UseCaseErrors {
    InvalidMedicineName(String),
    InvalidTime(String),
    TimeNotOnSlot(SlotTime),
    EmptyWeekdays,
    InvalidWeekday(String),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        if !is_valid_medicine_name(&self.medicine) {
            return Err(UseCaseErrors::InvalidMedicineName(self.medicine.clone()));
        }

        let time_of_day = self
            .time
            .parse::<SlotTime>()
            .map_err(|_| UseCaseErrors::InvalidTime(self.time.clone()))?;
        if !time_of_day.is_quarter_aligned() {
            return Err(UseCaseErrors::TimeNotOnSlot(time_of_day));
        }

        let recurrence = match &self.recurrence {
            RecurrenceDTO::Daily => Recurrence::Daily,
            RecurrenceDTO::Once => Recurrence::Once,
            RecurrenceDTO::Weekdays(days) => {
                if days.is_empty() {
                    return Err(UseCaseErrors::EmptyWeekdays);
                }
                let days = days
                    .iter()
                    .map(|day| {
                        day.parse::<Weekday>()
                            .map_err(|_| UseCaseErrors::InvalidWeekday(day.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Recurrence::Weekdays(days)
            }
        };

        let reminder = Reminder::new(
            self.user_id.clone(),
            self.medicine.clone(),
            time_of_day,
            recurrence,
            ctx.sys.get_timestamp_millis(),
        );

        match ctx.repos.reminders.insert(&reminder).await {
            Ok(_) => Ok(reminder),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::prelude::*;
    use glucomate_domain::Firing;

    fn usecase(medicine: &str, time: &str, recurrence: RecurrenceDTO) -> CreateReminderUseCase {
        CreateReminderUseCase {
            user_id: Default::default(),
            medicine: medicine.into(),
            time: time.into(),
            recurrence,
        }
    }

    #[actix_web::test]
    async fn creates_daily_reminder() {
        let ctx = GlucomateContext::create_inmemory();
        let usecase = usecase("Metformin", "09:00", RecurrenceDTO::Daily);
        let user_id = usecase.user_id.clone();

        let reminder = execute(usecase, &ctx).await.unwrap();
        assert_eq!(reminder.medicine, "Metformin");
        assert_eq!(reminder.recurrence, Recurrence::Daily);
        assert_eq!(reminder.time_of_day.to_string(), "09:00");

        let stored = ctx.repos.reminders.find_by_user(&user_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], reminder);
    }

    #[actix_web::test]
    async fn creates_weekday_reminder() {
        let ctx = GlucomateContext::create_inmemory();
        let usecase = usecase(
            "Insulin",
            "21:45",
            RecurrenceDTO::Weekdays(vec!["Monday".into(), "Friday".into()]),
        );

        let reminder = execute(usecase, &ctx).await.unwrap();
        assert_eq!(
            reminder.recurrence,
            Recurrence::Weekdays(vec![Weekday::Mon, Weekday::Fri])
        );
        // 2024-01-19 is a Friday
        let now = chrono_tz::UTC.ymd(2024, 1, 19).and_hms(21, 45, 0);
        assert_eq!(reminder.evaluate(&now), Firing::Fires);
    }

    #[actix_web::test]
    async fn rejects_invalid_medicine_name() {
        let ctx = GlucomateContext::create_inmemory();
        for name in &["", "   ", "Met@formin"] {
            let res = execute(usecase(name, "09:00", RecurrenceDTO::Daily), &ctx).await;
            assert!(matches!(
                res,
                Err(UseCaseErrors::InvalidMedicineName(_))
            ));
        }
    }

    #[actix_web::test]
    async fn rejects_time_off_the_quarter_grid() {
        let ctx = GlucomateContext::create_inmemory();
        let res = execute(usecase("Metformin", "09:20", RecurrenceDTO::Daily), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::TimeNotOnSlot(_))));
    }

    #[actix_web::test]
    async fn rejects_malformed_time() {
        let ctx = GlucomateContext::create_inmemory();
        let res = execute(usecase("Metformin", "25:00", RecurrenceDTO::Daily), &ctx).await;
        assert!(matches!(res, Err(UseCaseErrors::InvalidTime(_))));
    }

    #[actix_web::test]
    async fn rejects_empty_weekday_list() {
        let ctx = GlucomateContext::create_inmemory();
        let res = execute(
            usecase("Metformin", "09:00", RecurrenceDTO::Weekdays(vec![])),
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseErrors::EmptyWeekdays)));
    }

    #[actix_web::test]
    async fn rejects_unknown_weekday_name() {
        let ctx = GlucomateContext::create_inmemory();
        let res = execute(
            usecase(
                "Metformin",
                "09:00",
                RecurrenceDTO::Weekdays(vec!["Blursday".into()]),
            ),
            &ctx,
        )
        .await;
        assert!(matches!(res, Err(UseCaseErrors::InvalidWeekday(_))));
    }
}
