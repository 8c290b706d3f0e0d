pub mod api_client;
pub mod dashboard;

pub use api_client::{ApiClient, BusinessApi, ClientError};
pub use dashboard::{Dashboard, DashboardView, FieldErrors, RegenerateTicket, SubmitRequest};
