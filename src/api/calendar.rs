//! Calendar API

use axum::Extension;
use chrono::NaiveDate;
use serde::Serialize;

use crate::roles::Role;
use crate::schedule::DayBadge;
use crate::views::CalendarDay;
use crate::views::DayDecoration;
use crate::views::ViewProjector;

use super::CurrentRole;
use super::Error;
use super::PathParameters;
use super::SharedReminders;
use super::Success;
use super::parse_path_date;
use super::reminders::ReminderResponse;

/// A reminder on the selected day
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntryResponse {
    #[serde(flatten)]
    pub reminder: ReminderResponse,

    /// Admins send, students complete
    pub is_admin: bool,

    /// Only for admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_name: Option<String>,
}

/// The selected day
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayResponse {
    pub date: NaiveDate,
    pub viewer: Role,
    pub caption: String,
    pub badge: Option<DayBadge>,
    pub reminders: Vec<CalendarEntryResponse>,
}

impl CalendarDayResponse {
    fn from_day(day: CalendarDay<'_>, viewer: Role) -> Self {
        Self {
            date: day.date,
            viewer,
            caption: day.caption,
            badge: day.badge,
            reminders: day
                .entries
                .into_iter()
                .map(|entry| CalendarEntryResponse {
                    reminder: ReminderResponse::from_reminder(entry.reminder),
                    is_admin: entry.is_admin,
                    audience_name: entry.audience_name.map(ToString::to_string),
                })
                .collect(),
        }
    }
}

/// All reminders on a single day
///
/// Request:
/// ```sh
/// curl -v -H 'X-Portal-Role: admin' http://localhost:6000/api/calendar/2025-05-15
/// ```
pub async fn day(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
    PathParameters(date): PathParameters<String>,
) -> Result<Success<CalendarDayResponse>, Error> {
    let date = parse_path_date(&date)?;

    let reminders = reminders.lock().await;

    let day = ViewProjector::new(reminders.store(), reminders.audiences())
        .calendar_day(date, *current_role);

    Ok(Success::ok(CalendarDayResponse::from_day(
        day,
        *current_role,
    )))
}

/// Badges and tones of the days with reminders in a month
pub async fn month(
    Extension(reminders): Extension<SharedReminders>,
    _current_role: CurrentRole,
    PathParameters((year, month)): PathParameters<(i32, u32)>,
) -> Result<Success<Vec<DayDecoration>>, Error> {
    let reminders = reminders.lock().await;

    let decorations = ViewProjector::new(reminders.store(), reminders.audiences())
        .calendar_month(year, month)?;

    Ok(Success::ok(decorations))
}
