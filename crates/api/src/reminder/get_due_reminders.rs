use crate::shared::usecase::UseCase;
use chrono::prelude::*;
use glucomate_domain::{Firing, PhoneNumber, Reminder, SlotStamp, ID};
use glucomate_infra::GlucomateContext;

/// The fetch-and-evaluate half of one delivery tick: resolves the
/// recipient's contact, loads their reminders and keeps the ones that
/// fire at the current instant in the recipient's timezone.
#[derive(Debug)]
pub struct GetDueRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    /// The configured recipient does not exist (yet); the tick is skipped
    UserNotFound,
    /// The reminder store could not be queried; the tick is aborted
    StorageError,
}

#[derive(Debug)]
pub struct DueReminders {
    /// Where the notifications go
    pub to: PhoneNumber,
    pub due: Vec<Reminder>,
    /// The calendar minute these reminders fired in
    pub stamp: SlotStamp,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetDueRemindersUseCase {
    type Response = DueReminders;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "GetDueReminders";

    /// This will run every minute
    async fn execute(&mut self, ctx: &GlucomateContext) -> Result<Self::Response, Self::Errors> {
        let user = ctx
            .repos
            .users
            .find(&self.user_id)
            .await
            .ok_or(UseCaseErrors::UserNotFound)?;

        let now = Utc
            .timestamp_millis(ctx.sys.get_timestamp_millis())
            .with_timezone(&user.timezone);

        let reminders = ctx
            .repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        let due = reminders
            .into_iter()
            .filter(|reminder| reminder.evaluate(&now) == Firing::Fires)
            .collect();

        Ok(DueReminders {
            to: user.phone,
            due,
            stamp: SlotStamp::from_datetime(&now),
        })
    }
}
