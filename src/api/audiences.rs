use axum::Extension;

use crate::audiences::StudentGroup;

use super::CurrentRole;
use super::SharedReminders;
use super::Success;

/// All student groups reminders can be addressed to
pub async fn list(
    Extension(reminders): Extension<SharedReminders>,
    _current_role: CurrentRole,
) -> Success<Vec<StudentGroup>> {
    let groups = reminders.lock().await.audiences().groups().to_vec();

    Success::ok(groups)
}
