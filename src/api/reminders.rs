//! Reminder API management

use axum::Extension;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::reminders::Reminder;
use crate::reminders::ReminderDraft;
use crate::reminders::ReminderId;
use crate::reminders::ReminderKind;
use crate::reminders::TIME_FORMAT;
use crate::roles::Role;
use crate::views::Bucket;
use crate::views::ListRow;
use crate::views::Status;
use crate::views::ViewProjector;

use super::CurrentRole;
use super::Error;
use super::Form;
use super::PathParameters;
use super::SharedReminders;
use super::Success;

/// The reminder response information
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// `HH:MM`
    pub time: String,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub audience: String,
    pub completed: bool,
    /// `null` as long as the reminder is not sent
    pub sent_at: Option<DateTime<Utc>>,
}

impl ReminderResponse {
    /// Create a reminder response from a [`Reminder`](Reminder)
    pub fn from_reminder(reminder: &Reminder) -> Self {
        Self {
            id: reminder.id,
            title: reminder.title.clone(),
            description: reminder.description.clone(),
            date: reminder.date,
            time: reminder.time.format(TIME_FORMAT).to_string(),
            kind: reminder.kind,
            audience: reminder.audience.clone(),
            completed: reminder.completed,
            sent_at: reminder.delivery.sent_at(),
        }
    }
}

/// A row of one of the reminder lists
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRowResponse {
    #[serde(flatten)]
    pub reminder: ReminderResponse,

    pub status: Status,

    /// Completed or sent
    pub settled: bool,

    /// Only for admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_name: Option<String>,
}

impl ListRowResponse {
    fn from_rows(rows: Vec<ListRow<'_>>) -> Vec<Self> {
        rows.into_iter()
            .map(|row| Self {
                reminder: ReminderResponse::from_reminder(row.reminder),
                status: row.status,
                settled: row.settled,
                audience_name: row.audience_name.map(ToString::to_string),
            })
            .collect()
    }
}

async fn list_bucket(
    reminders: &SharedReminders,
    current_role: &CurrentRole,
    bucket: Bucket,
) -> Success<Vec<ListRowResponse>> {
    let reminders = reminders.lock().await;

    let rows = ViewProjector::new(reminders.store(), reminders.audiences())
        .bucket(bucket, **current_role);

    Success::ok(ListRowResponse::from_rows(rows))
}

/// All reminders, in chronological order
///
/// Request:
/// ```sh
/// curl -v -H 'X-Portal-Role: student' http://localhost:6000/api/reminders
/// ```
pub async fn list(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
) -> Success<Vec<ListRowResponse>> {
    list_bucket(&reminders, &current_role, Bucket::All).await
}

/// Reminders not completed and not sent yet
pub async fn upcoming(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
) -> Success<Vec<ListRowResponse>> {
    list_bucket(&reminders, &current_role, Bucket::Upcoming).await
}

/// Reminders sent to their audience
pub async fn sent(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
) -> Success<Vec<ListRowResponse>> {
    list_bucket(&reminders, &current_role, Bucket::Sent).await
}

pub async fn single(
    Extension(reminders): Extension<SharedReminders>,
    _current_role: CurrentRole,
    PathParameters(id): PathParameters<ReminderId>,
) -> Result<Success<ReminderResponse>, Error> {
    let reminders = reminders.lock().await;

    let reminder = reminders.store().get(id)?;

    Ok(Success::ok(ReminderResponse::from_reminder(reminder)))
}

fn default_time() -> String {
    "09:00".to_string()
}

fn default_audience() -> String {
    "all".to_string()
}

/// Create reminder form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderForm {
    title: String,
    #[serde(default)]
    description: String,
    date: String,
    #[serde(default = "default_time")]
    time: String,
    #[serde(default, rename = "type")]
    kind: ReminderKind,
    #[serde(default = "default_audience")]
    audience: String,
}

/// Create a reminder, admins only
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' -H 'X-Portal-Role: admin' \
///     -d '{ "title": "Career Fair", "date": "2025-05-10", "time": "10:00" }' \
///     http://localhost:6000/api/reminders
/// ```
pub async fn create(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
    Form(form): Form<CreateReminderForm>,
) -> Result<Success<ReminderResponse>, Error> {
    current_role.is_allowed(Role::Admin)?;

    let draft = ReminderDraft {
        title: form.title,
        description: form.description,
        date: form.date,
        time: form.time,
        kind: form.kind,
        audience: form.audience,
    };

    let reminder = reminders.lock().await.create(&draft)?;

    Ok(Success::created(ReminderResponse::from_reminder(&reminder)))
}

/// Send a reminder to its audience, admins only
///
/// Sending again keeps the original `sentAt`
pub async fn send(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
    PathParameters(id): PathParameters<ReminderId>,
) -> Result<Success<ReminderResponse>, Error> {
    current_role.is_allowed(Role::Admin)?;

    let outcome = reminders.lock().await.send(id)?;

    Ok(Success::ok(ReminderResponse::from_reminder(
        &outcome.reminder,
    )))
}

/// Mark a reminder as complete or incomplete, students only
pub async fn toggle_complete(
    Extension(reminders): Extension<SharedReminders>,
    current_role: CurrentRole,
    PathParameters(id): PathParameters<ReminderId>,
) -> Result<Success<ReminderResponse>, Error> {
    current_role.is_allowed(Role::Student)?;

    let reminder = reminders.lock().await.toggle_complete(id)?;

    Ok(Success::ok(ReminderResponse::from_reminder(&reminder)))
}
