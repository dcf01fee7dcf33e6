//! All API endpoint setup

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use axum::routing::post;
use tokio::sync::Mutex;

use crate::lifecycle::Reminders;

pub use current_role::CurrentRole;
pub use request::Form;
pub use request::PathParameters;
pub use request::parse_path_date;
pub use response::Error;
pub use response::Success;

mod audiences;
mod calendar;
mod current_role;
mod reminders;
mod request;
mod response;

/// The reminders, shared between all requests
///
/// The lock is only held for a single lifecycle operation or view
pub type SharedReminders = Arc<Mutex<Reminders>>;

/// Get the Axum router for all API routes
pub fn router() -> Router {
    let reminders = Router::new()
        .route("/", get(reminders::list))
        .route("/", post(reminders::create))
        .route("/upcoming", get(reminders::upcoming))
        .route("/sent", get(reminders::sent))
        .route("/{reminder}", get(reminders::single))
        .route("/{reminder}/send", post(reminders::send))
        .route("/{reminder}/toggle-complete", post(reminders::toggle_complete));

    let calendar = Router::new()
        .route("/{date}", get(calendar::day))
        .route("/{year}/{month}", get(calendar::month));

    Router::new()
        .nest("/reminders", reminders)
        .nest("/calendar", calendar)
        .route("/audiences", get(audiences::list))
}
