//! Read-only views on the reminders
//!
//! The calendar view and the list view are recomputed from the store on every call

use chrono::Months;
use chrono::NaiveDate;
use serde::Serialize;

use crate::audiences::AudienceRegistry;
use crate::error::Error;
use crate::error::Result;
use crate::reminders::Reminder;
use crate::roles::Role;
use crate::schedule::DayBadge;
use crate::schedule::DayTone;
use crate::schedule::ScheduleIndex;
use crate::storage::ReminderStore;

/// The buckets of the list view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    /// Not completed and not sent
    Upcoming,

    /// Everything
    All,

    /// Sent to the audience
    Sent,
}

impl Bucket {
    pub fn includes(self, reminder: &Reminder) -> bool {
        match self {
            Bucket::Upcoming => reminder.is_upcoming(),
            Bucket::All => true,
            Bucket::Sent => reminder.delivery.is_sent(),
        }
    }
}

/// Status of a reminder as shown in the list view
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum Status {
    Sent,
    Completed,
    /// Admin sees the reminder still has to be sent
    #[serde(rename = "Not Sent")]
    NotSent,
    /// Student sees the reminder still has to be done
    Pending,
}

impl Status {
    /// Status of a reminder for a viewer
    ///
    /// Delivery goes before completion
    pub fn of(reminder: &Reminder, viewer: Role) -> Self {
        if reminder.delivery.is_sent() {
            Status::Sent
        } else if reminder.completed {
            Status::Completed
        } else if viewer.is_admin() {
            Status::NotSent
        } else {
            Status::Pending
        }
    }
}

/// Single row of the list view
#[derive(Debug)]
pub struct ListRow<'a> {
    pub reminder: &'a Reminder,
    pub status: Status,

    /// Completed or sent, shown muted
    pub settled: bool,

    /// Only resolved for admins
    pub audience_name: Option<&'a str>,
}

/// Single reminder of the calendar view
#[derive(Debug)]
pub struct CalendarEntry<'a> {
    pub reminder: &'a Reminder,

    /// Viewer is an admin, changes the available actions
    pub is_admin: bool,

    /// Only resolved for admins
    pub audience_name: Option<&'a str>,
}

/// A selected day in the calendar view
#[derive(Debug)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub entries: Vec<CalendarEntry<'a>>,
    pub badge: Option<DayBadge>,

    /// "N reminders for this day"
    pub caption: String,
}

/// Decoration of a single day in a calendar month
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DayDecoration {
    pub date: NaiveDate,
    pub badge: DayBadge,
    pub tone: DayTone,
}

/// Projects the store into the calendar and list views
#[derive(Clone, Copy, Debug)]
pub struct ViewProjector<'a> {
    store: &'a ReminderStore,
    audiences: &'a AudienceRegistry,
}

impl<'a> ViewProjector<'a> {
    pub fn new(store: &'a ReminderStore, audiences: &'a AudienceRegistry) -> Self {
        Self { store, audiences }
    }

    /// The reminders of a single day, in insertion order
    pub fn calendar_day(&self, date: NaiveDate, viewer: Role) -> CalendarDay<'a> {
        let index = ScheduleIndex::build(self.store);

        let entries = index
            .by_date(date)
            .iter()
            .map(|&reminder| CalendarEntry {
                reminder,
                is_admin: viewer.is_admin(),
                audience_name: self.audience_name(reminder, viewer),
            })
            .collect::<Vec<_>>();

        CalendarDay {
            date,
            caption: caption(entries.len()),
            badge: index.day_badge(date),
            entries,
        }
    }

    /// Decorations for every day of a month with reminders
    pub fn calendar_month(&self, year: i32, month: u32) -> Result<Vec<DayDecoration>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::validation(format!("Invalid month {year}-{month}")))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| Error::validation(format!("Invalid month {year}-{month}")))?;

        let index = ScheduleIndex::build(self.store);

        Ok(index
            .days_between(first, last)
            .into_iter()
            .filter_map(|date| {
                Some(DayDecoration {
                    date,
                    badge: index.day_badge(date)?,
                    tone: index.day_tone(date)?,
                })
            })
            .collect())
    }

    /// A bucket of the list view, in chronological order
    pub fn bucket(&self, bucket: Bucket, viewer: Role) -> Vec<ListRow<'a>> {
        let mut reminders = self
            .store
            .list()
            .iter()
            .filter(|reminder| bucket.includes(reminder))
            .collect::<Vec<_>>();

        sort_chronologically(&mut reminders);

        reminders
            .into_iter()
            .map(|reminder| ListRow {
                reminder,
                status: Status::of(reminder, viewer),
                settled: reminder.is_settled(),
                audience_name: self.audience_name(reminder, viewer),
            })
            .collect()
    }

    fn audience_name(&self, reminder: &Reminder, viewer: Role) -> Option<&'a str> {
        viewer
            .is_admin()
            .then(|| self.audiences.resolve_name(&reminder.audience))
    }
}

/// Sort by date and time, incomplete before completed on the same instant
///
/// Stable, reminders that compare equal keep their order
pub fn sort_chronologically(reminders: &mut [&Reminder]) {
    reminders.sort_by(|a, b| {
        a.scheduled_at()
            .cmp(&b.scheduled_at())
            .then(a.completed.cmp(&b.completed))
    });
}

fn caption(count: usize) -> String {
    if count == 1 {
        "1 reminder for this day".to_string()
    } else {
        format!("{count} reminders for this day")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;
    use chrono::Utc;

    use crate::lifecycle::ManualClock;
    use crate::lifecycle::Reminders;
    use crate::lifecycle::TracingNotifier;
    use crate::reminders::ReminderDraft;
    use crate::reminders::ReminderId;
    use crate::reminders::ReminderKind;
    use crate::reminders::parse_date;
    use crate::schedule::Severity;

    use super::*;

    fn setup() -> Reminders {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap());

        Reminders::new(
            ReminderStore::new(),
            AudienceRegistry::with_default_groups().unwrap(),
            Arc::new(clock),
            Arc::new(TracingNotifier),
        )
    }

    fn create(
        reminders: &mut Reminders,
        title: &str,
        date: &str,
        time: &str,
        kind: ReminderKind,
        audience: &str,
    ) -> ReminderId {
        let draft = ReminderDraft {
            title: title.to_string(),
            description: String::new(),
            date: date.to_string(),
            time: time.to_string(),
            kind,
            audience: audience.to_string(),
        };

        reminders.create(&draft).unwrap().id
    }

    fn titles(rows: &[ListRow<'_>]) -> Vec<String> {
        rows.iter().map(|row| row.reminder.title.clone()).collect()
    }

    fn bucket(reminders: &Reminders, bucket: Bucket) -> Vec<String> {
        let views = ViewProjector::new(reminders.store(), reminders.audiences());

        titles(&views.bucket(bucket, Role::Admin))
    }

    #[test]
    fn test_scenario() {
        let mut reminders = setup();
        let a = create(
            &mut reminders,
            "A",
            "2025-05-15",
            "23:59",
            ReminderKind::Deadline,
            "cse-students",
        );
        create(
            &mut reminders,
            "B",
            "2025-05-15",
            "23:59",
            ReminderKind::Event,
            "all",
        );

        let date = parse_date("2025-05-15").unwrap();

        {
            let views = ViewProjector::new(reminders.store(), reminders.audiences());
            let day = views.calendar_day(date, Role::Admin);

            let day_titles = day
                .entries
                .iter()
                .map(|entry| entry.reminder.title.as_str())
                .collect::<Vec<_>>();
            assert_eq!(vec!["A", "B"], day_titles);
            assert_eq!(
                Some(DayBadge {
                    count: 2,
                    severity: Severity::Critical,
                }),
                day.badge
            );
        }

        reminders.send(a).unwrap();

        assert_eq!(vec!["A"], bucket(&reminders, Bucket::Sent));
        assert_eq!(vec!["B"], bucket(&reminders, Bucket::Upcoming));

        let sent_at = reminders.store().get(a).unwrap().delivery.sent_at();

        reminders.toggle_complete(a).unwrap();
        let a = reminders.toggle_complete(a).unwrap();

        assert!(!a.completed);
        assert!(sent_at.is_some());
        assert_eq!(sent_at, a.delivery.sent_at());
    }

    #[test]
    fn test_equal_instants_put_incomplete_first() {
        let mut reminders = setup();
        let first = create(
            &mut reminders,
            "Completed first",
            "2025-05-15",
            "23:59",
            ReminderKind::Deadline,
            "all",
        );
        create(
            &mut reminders,
            "Open one",
            "2025-05-15",
            "23:59",
            ReminderKind::Deadline,
            "all",
        );
        create(
            &mut reminders,
            "Open two",
            "2025-05-15",
            "23:59",
            ReminderKind::Event,
            "all",
        );
        create(
            &mut reminders,
            "Earlier",
            "2025-05-15",
            "08:00",
            ReminderKind::Event,
            "all",
        );
        reminders.toggle_complete(first).unwrap();

        let expected = vec!["Earlier", "Open one", "Open two", "Completed first"];

        // deterministic, no matter how often it is asked for
        for _ in 0..3 {
            assert_eq!(expected, bucket(&reminders, Bucket::All));
        }
    }

    #[test]
    fn test_sorted_by_date_then_time() {
        let mut reminders = setup();
        create(
            &mut reminders,
            "June",
            "2025-06-01",
            "08:00",
            ReminderKind::Event,
            "all",
        );
        create(
            &mut reminders,
            "May evening",
            "2025-05-01",
            "20:00",
            ReminderKind::Event,
            "all",
        );
        create(
            &mut reminders,
            "May morning",
            "2025-05-01",
            "07:30",
            ReminderKind::Deadline,
            "all",
        );

        assert_eq!(
            vec!["May morning", "May evening", "June"],
            bucket(&reminders, Bucket::Upcoming)
        );
    }

    #[test]
    fn test_bucket_membership() {
        let mut reminders = setup();
        let mut ids = Vec::new();
        for (i, kind) in [ReminderKind::Deadline, ReminderKind::Event]
            .into_iter()
            .cycle()
            .take(6)
            .enumerate()
        {
            ids.push(create(
                &mut reminders,
                &format!("Reminder {i}"),
                &format!("2025-05-{:02}", 10 + i),
                "12:00",
                kind,
                "all",
            ));
        }

        // every combination of completed and sent
        reminders.send(ids[0]).unwrap();
        reminders.send(ids[1]).unwrap();
        reminders.toggle_complete(ids[1]).unwrap();
        reminders.toggle_complete(ids[2]).unwrap();
        reminders.toggle_complete(ids[4]).unwrap();
        reminders.toggle_complete(ids[4]).unwrap();

        let all = bucket(&reminders, Bucket::All);
        let upcoming = bucket(&reminders, Bucket::Upcoming);
        let sent = bucket(&reminders, Bucket::Sent);

        assert_eq!(6, all.len());
        assert!(upcoming.iter().all(|title| all.contains(title)));
        assert!(sent.iter().all(|title| all.contains(title)));
        assert!(upcoming.iter().all(|title| !sent.contains(title)));

        assert_eq!(vec!["Reminder 0", "Reminder 1"], sent);
        assert_eq!(vec!["Reminder 3", "Reminder 4", "Reminder 5"], upcoming);
    }

    #[test]
    fn test_status_depends_on_viewer() {
        let mut reminders = setup();
        let sent = create(
            &mut reminders,
            "Sent",
            "2025-05-10",
            "10:00",
            ReminderKind::Event,
            "all",
        );
        let completed = create(
            &mut reminders,
            "Completed",
            "2025-05-11",
            "10:00",
            ReminderKind::Event,
            "all",
        );
        create(
            &mut reminders,
            "Open",
            "2025-05-12",
            "10:00",
            ReminderKind::Event,
            "all",
        );
        reminders.send(sent).unwrap();
        reminders.toggle_complete(sent).unwrap();
        reminders.toggle_complete(completed).unwrap();

        let views = ViewProjector::new(reminders.store(), reminders.audiences());

        let statuses = |viewer| {
            views
                .bucket(Bucket::All, viewer)
                .iter()
                .map(|row| (row.status, row.settled))
                .collect::<Vec<_>>()
        };

        assert_eq!(
            vec![
                (Status::Sent, true),
                (Status::Completed, true),
                (Status::NotSent, false)
            ],
            statuses(Role::Admin)
        );
        assert_eq!(
            vec![
                (Status::Sent, true),
                (Status::Completed, true),
                (Status::Pending, false)
            ],
            statuses(Role::Student)
        );
    }

    #[test]
    fn test_audience_names_for_admins_only() {
        let mut reminders = setup();
        create(
            &mut reminders,
            "A",
            "2025-05-15",
            "23:59",
            ReminderKind::Deadline,
            "cse-students",
        );

        let views = ViewProjector::new(reminders.store(), reminders.audiences());
        let date = parse_date("2025-05-15").unwrap();

        let admin_day = views.calendar_day(date, Role::Admin);
        assert!(admin_day.entries[0].is_admin);
        assert_eq!(
            Some("Computer Science Students"),
            admin_day.entries[0].audience_name
        );

        let student_day = views.calendar_day(date, Role::Student);
        assert!(!student_day.entries[0].is_admin);
        assert_eq!(None, student_day.entries[0].audience_name);

        let rows = views.bucket(Bucket::Upcoming, Role::Student);
        assert_eq!(None, rows[0].audience_name);
    }

    #[test]
    fn test_calendar_captions() {
        let mut reminders = setup();
        create(
            &mut reminders,
            "A",
            "2025-05-15",
            "23:59",
            ReminderKind::Deadline,
            "all",
        );

        let views = ViewProjector::new(reminders.store(), reminders.audiences());

        let day = views.calendar_day(parse_date("2025-05-15").unwrap(), Role::Student);
        assert_eq!("1 reminder for this day", day.caption);

        let day = views.calendar_day(parse_date("2025-05-16").unwrap(), Role::Student);
        assert_eq!("0 reminders for this day", day.caption);
        assert!(day.entries.is_empty());
        assert_eq!(None, day.badge);
    }

    #[test]
    fn test_calendar_month() {
        let mut reminders = setup();
        let workshop = create(
            &mut reminders,
            "Workshop",
            "2025-05-05",
            "14:00",
            ReminderKind::Event,
            "all",
        );
        create(
            &mut reminders,
            "Deadline",
            "2025-05-31",
            "23:59",
            ReminderKind::Deadline,
            "all",
        );
        create(
            &mut reminders,
            "Next month",
            "2025-06-01",
            "09:00",
            ReminderKind::Event,
            "all",
        );
        reminders.toggle_complete(workshop).unwrap();

        let views = ViewProjector::new(reminders.store(), reminders.audiences());

        let month = views.calendar_month(2025, 5).unwrap();

        assert_eq!(2, month.len());
        assert_eq!(parse_date("2025-05-05").unwrap(), month[0].date);
        assert_eq!(DayTone::Settled, month[0].tone);
        assert_eq!(Severity::Normal, month[0].badge.severity);
        assert_eq!(parse_date("2025-05-31").unwrap(), month[1].date);
        assert_eq!(DayTone::Deadline, month[1].tone);
        assert_eq!(Severity::Critical, month[1].badge.severity);

        assert!(views.calendar_month(2025, 13).is_err());
        assert!(views.calendar_month(2025, 0).is_err());
    }
}
