use crate::reminder::dispatcher::{DispatchOutcome, ReminderDispatcher};
use crate::reminder::get_due_reminders::GetDueRemindersUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::{interval, sleep_until, Instant};
use glucomate_domain::ID;
use glucomate_infra::GlucomateContext;
use std::time::Duration;
use tracing::{debug, error, info};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// The background reminder-delivery loop. Constructed once at process
/// start with the recipient threaded in explicitly; there is no ambient
/// user context anywhere in the tick path.
pub struct ReminderDeliveryJob {
    ctx: GlucomateContext,
    recipient: Option<ID>,
    dispatcher: ReminderDispatcher,
}

impl ReminderDeliveryJob {
    pub fn new(ctx: GlucomateContext, recipient: Option<ID>) -> Self {
        let dispatcher = ReminderDispatcher::new(ctx.sms.clone());
        Self {
            ctx,
            recipient,
            dispatcher,
        }
    }

    /// Spawns the loop on the background executor. Consuming `self` keeps
    /// it to one active instance; `Application::new` calls this exactly
    /// once per process. The first tick is aligned to the next minute
    /// boundary, then the loop fires every 60 seconds.
    pub fn start(self) {
        actix_web::rt::spawn(async move {
            let now = self.ctx.sys.get_timestamp_millis();
            let secs_to_next_run = get_start_delay(now as usize, 0);
            let start = Instant::now() + Duration::from_secs(secs_to_next_run as u64);

            sleep_until(start).await;
            let mut minutely_interval = interval(Duration::from_secs(60));
            loop {
                minutely_interval.tick().await;
                // Awaited inline: a slow tick defers the next one instead
                // of overlapping it against the same reminder set.
                run_tick(&self.ctx, self.recipient.as_ref(), &self.dispatcher).await;
            }
        });
    }
}

/// Per-tick outcome counts, logged for observability. The loop has no
/// caller to return anything to.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub fired: usize,
    pub delivered: usize,
    pub failed: usize,
    pub deduped: usize,
}

/// One pass of the delivery loop. Never propagates an error: a missing
/// recipient or a store failure skips the tick, a failed dispatch is
/// counted and logged, and the next tick always proceeds normally.
pub async fn run_tick(
    ctx: &GlucomateContext,
    recipient: Option<&ID>,
    dispatcher: &ReminderDispatcher,
) -> TickSummary {
    let user_id = match recipient {
        Some(user_id) => user_id.clone(),
        None => {
            debug!("No reminder recipient is configured, skipping tick");
            return TickSummary::default();
        }
    };

    let usecase = GetDueRemindersUseCase { user_id };
    let due = match execute(usecase, ctx).await {
        Ok(due) => due,
        // Already logged by execute; the next tick proceeds normally
        Err(_) => return TickSummary::default(),
    };

    let mut summary = TickSummary {
        fired: due.due.len(),
        ..Default::default()
    };
    for reminder in &due.due {
        match dispatcher.dispatch(reminder, &due.to, due.stamp).await {
            DispatchOutcome::Delivered => summary.delivered += 1,
            DispatchOutcome::AlreadyDelivered => summary.deduped += 1,
            DispatchOutcome::Failed(reason) => {
                error!(
                    "Failed to deliver reminder for {}: {}",
                    reminder.medicine, reason
                );
                summary.failed += 1;
            }
        }
    }

    if summary.fired > 0 {
        info!(
            "Reminder tick complete: fired={} delivered={} failed={} deduped={}",
            summary.fired, summary.delivered, summary.failed, summary.deduped
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::prelude::*;
    use glucomate_domain::{Recurrence, Reminder, User};
    use glucomate_infra::{ISys, InMemorySmsGateway};
    use std::sync::Arc;

    #[test]
    fn start_delay_works() {
        assert_eq!(get_start_delay(50 * 1000, 5), 5);
        assert_eq!(get_start_delay(50 * 1000, 10), 60);
        assert_eq!(get_start_delay(50 * 1000, 15), 55);
        assert_eq!(get_start_delay(60 * 1000, 60), 60);
        assert_eq!(get_start_delay(60 * 1000, 10), 50);
        assert_eq!(get_start_delay(59 * 1000, 0), 1);
        assert_eq!(get_start_delay(59 * 1000, 1), 60);
    }

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    fn millis(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> i64 {
        Utc.ymd(year, month, day)
            .and_hms(hour, min, sec)
            .timestamp_millis()
    }

    struct TestContext {
        ctx: GlucomateContext,
        sms: Arc<InMemorySmsGateway>,
        user: User,
        dispatcher: ReminderDispatcher,
    }

    async fn setup(now: i64) -> TestContext {
        let mut ctx = GlucomateContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now));
        let sms = Arc::new(InMemorySmsGateway::new());
        ctx.sms = sms.clone();

        let user = User::new(
            "Ada".into(),
            "Lovelace".into(),
            "ada@example.com".into(),
            "+12345678901".parse().unwrap(),
            chrono_tz::UTC,
            0,
        );
        ctx.repos.users.insert(&user).await.unwrap();

        let dispatcher = ReminderDispatcher::new(ctx.sms.clone());
        TestContext {
            ctx,
            sms,
            user,
            dispatcher,
        }
    }

    fn daily_reminder(user: &User, medicine: &str, time: &str) -> Reminder {
        Reminder::new(
            user.id.clone(),
            medicine.into(),
            time.parse().unwrap(),
            Recurrence::Daily,
            0,
        )
    }

    #[actix_web::test]
    async fn delivers_a_due_reminder() {
        let mut test = setup(millis(2024, 1, 15, 9, 0, 10)).await;
        test.ctx
            .repos
            .reminders
            .insert(&daily_reminder(&test.user, "Metformin", "09:00"))
            .await
            .unwrap();

        let summary = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(
            summary,
            TickSummary {
                fired: 1,
                delivered: 1,
                failed: 0,
                deduped: 0
            }
        );

        let sent = test.sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, test.user.phone);
        assert_eq!(sent[0].1, "Time to take Metformin");

        // Same reminder one minute later: nothing fires
        test.ctx.sys = Arc::new(StaticTimeSys(millis(2024, 1, 15, 9, 1, 10)));
        let summary = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(summary, TickSummary::default());
        assert_eq!(test.sms.sent().len(), 1);
    }

    #[actix_web::test]
    async fn two_ticks_in_one_minute_dispatch_once() {
        let mut test = setup(millis(2024, 1, 15, 9, 0, 10)).await;
        test.ctx
            .repos
            .reminders
            .insert(&daily_reminder(&test.user, "Metformin", "09:00"))
            .await
            .unwrap();

        let first = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(first.delivered, 1);

        test.ctx.sys = Arc::new(StaticTimeSys(millis(2024, 1, 15, 9, 0, 45)));
        let second = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(
            second,
            TickSummary {
                fired: 1,
                delivered: 0,
                failed: 0,
                deduped: 1
            }
        );

        // Exactly one outbound message across both ticks
        assert_eq!(test.sms.sent().len(), 1);
    }

    #[actix_web::test]
    async fn a_failed_dispatch_does_not_block_the_rest_of_the_tick() {
        let test = setup(millis(2024, 1, 15, 9, 0, 0)).await;
        test.ctx
            .repos
            .reminders
            .insert(&daily_reminder(&test.user, "Metformin", "09:00"))
            .await
            .unwrap();
        test.ctx
            .repos
            .reminders
            .insert(&daily_reminder(&test.user, "Insulin", "09:00"))
            .await
            .unwrap();
        test.sms.fail_when_body_contains("Insulin");

        let summary = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(summary.fired, 2);
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.failed, 1);

        let sent = test.sms.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1, "Time to take Metformin");
    }

    #[actix_web::test]
    async fn a_failed_dispatch_still_consumes_the_minute_slot() {
        let mut test = setup(millis(2024, 1, 15, 9, 0, 5)).await;
        test.ctx
            .repos
            .reminders
            .insert(&daily_reminder(&test.user, "Metformin", "09:00"))
            .await
            .unwrap();
        test.sms.fail_when_body_contains("Metformin");

        let first = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(first.failed, 1);

        // A retry within the same minute is deduped, not re-attempted
        test.ctx.sys = Arc::new(StaticTimeSys(millis(2024, 1, 15, 9, 0, 50)));
        let second = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(second.deduped, 1);
        assert_eq!(second.failed, 0);
        assert!(test.sms.sent().is_empty());
    }

    #[actix_web::test]
    async fn skips_tick_without_a_recipient() {
        let test = setup(millis(2024, 1, 15, 9, 0, 0)).await;
        test.ctx
            .repos
            .reminders
            .insert(&daily_reminder(&test.user, "Metformin", "09:00"))
            .await
            .unwrap();

        let summary = run_tick(&test.ctx, None, &test.dispatcher).await;
        assert_eq!(summary, TickSummary::default());
        assert!(test.sms.sent().is_empty());
    }

    #[actix_web::test]
    async fn a_missing_recipient_user_skips_the_tick() {
        let test = setup(millis(2024, 1, 15, 9, 0, 0)).await;
        let unknown_user = glucomate_domain::ID::new();

        let summary = run_tick(&test.ctx, Some(&unknown_user), &test.dispatcher).await;
        assert_eq!(summary, TickSummary::default());
    }

    #[actix_web::test]
    async fn a_once_reminder_is_delivered_again_the_next_day() {
        // `Once` has no stored date and is never auto-disabled, so it
        // fires again at the same minute on the following day.
        let mut test = setup(millis(2024, 1, 15, 9, 0, 0)).await;
        let mut reminder = daily_reminder(&test.user, "Metformin", "09:00");
        reminder.recurrence = Recurrence::Once;
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let first = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(first.delivered, 1);

        test.ctx.sys = Arc::new(StaticTimeSys(millis(2024, 1, 16, 9, 0, 0)));
        let second = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(second.delivered, 1);
        assert_eq!(test.sms.sent().len(), 2);
    }

    #[actix_web::test]
    async fn a_reminder_deleted_between_ticks_stops_firing() {
        let mut test = setup(millis(2024, 1, 15, 9, 0, 5)).await;
        let reminder = daily_reminder(&test.user, "Metformin", "09:00");
        test.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let first = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(first.delivered, 1);

        // Deleted from the CRUD path while the job keeps ticking
        test.ctx.repos.reminders.delete(&reminder.id).await.unwrap();
        test.ctx.sys = Arc::new(StaticTimeSys(millis(2024, 1, 16, 9, 0, 5)));
        let second = run_tick(&test.ctx, Some(&test.user.id), &test.dispatcher).await;
        assert_eq!(second, TickSummary::default());
        assert_eq!(test.sms.sent().len(), 1);
    }
}
