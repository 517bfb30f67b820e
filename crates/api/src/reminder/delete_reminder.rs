use crate::error::GlucomateError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use glucomate_api_structs::delete_reminder::{APIResponse, PathParams};
use glucomate_domain::{Reminder, ID};
use glucomate_infra::GlucomateContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<GlucomateContext>,
) -> Result<HttpResponse, GlucomateError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        user_id: user.id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(|e| match e {
            UseCaseErrors::NotFound => {
                GlucomateError::NotFound("The requested reminder was not found.".to_string())
            }
        })
}

#[derive(Debug)]
struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
enum UseCaseErrors {
    NotFound,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user_id => (),
            _ => return Err(UseCaseErrors::NotFound),
        }

        // The reminder can disappear between find and delete if the
        // delivery job or another request raced us. Treated as not found.
        ctx.repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .ok_or(UseCaseErrors::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glucomate_domain::Recurrence;

    fn reminder_for(user_id: &ID) -> Reminder {
        Reminder::new(
            user_id.clone(),
            "Metformin".into(),
            "09:00".parse().unwrap(),
            Recurrence::Daily,
            0,
        )
    }

    #[actix_web::test]
    async fn deletes_own_reminder() {
        let ctx = GlucomateContext::create_inmemory();
        let user_id = ID::new();
        let reminder = reminder_for(&user_id);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            user_id: user_id.clone(),
            reminder_id: reminder.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert_eq!(deleted.id, reminder.id);
        assert!(ctx.repos.reminders.find_by_user(&user_id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn cannot_delete_another_users_reminder() {
        let ctx = GlucomateContext::create_inmemory();
        let owner_id = ID::new();
        let reminder = reminder_for(&owner_id);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            user_id: ID::new(),
            reminder_id: reminder.id.clone(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseErrors::NotFound)
        ));
        assert_eq!(
            ctx.repos.reminders.find_by_user(&owner_id).await.unwrap().len(),
            1
        );
    }
}
