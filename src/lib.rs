pub mod api;
pub mod client;
pub mod config;
pub mod profile;

pub use api::{AppState, app};
pub use client::{ApiClient, BusinessApi, ClientError, Dashboard};
pub use config::{AppConfig, ConfigError};
pub use profile::{BusinessProfile, HeadlineUpdate, ProfileError, ProfileGenerator};
