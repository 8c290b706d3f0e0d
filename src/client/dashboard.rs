//! Single-screen business dashboard.
//!
//! The form moves between Idle, Loading and Loaded. Network calls are split
//! into `begin_*` / `finish_*` pairs so callers (and tests) can observe the
//! Loading state; `submit` and `regenerate` drive both halves over any
//! [`BusinessApi`].

use crate::client::api_client::{BusinessApi, ClientError};
use crate::profile::{BusinessProfile, HeadlineUpdate};
use std::fmt;
use tracing::warn;

pub const NAME_REQUIRED: &str = "Business name required";
pub const LOCATION_REQUIRED: &str = "Location required";
pub const FETCH_FAILED: &str = "Failed to fetch business data. Please try again.";
pub const REGENERATE_FAILED: &str = "Failed to regenerate headline. Please try again.";

pub const SUBMIT_LABEL: &str = "Get Business Data";
pub const LOADING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub location: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}

/// Inputs captured when a submit passes validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub name: String,
    pub location: String,
}

/// Identifies one headline regeneration. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerateTicket {
    seq: u64,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    name: String,
    location: String,
    field_errors: FieldErrors,
    banner: Option<String>,
    loading: bool,
    profile: Option<BusinessProfile>,
    // Highest sequence number issued, and the one whose result is on screen
    issued_seq: u64,
    applied_seq: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    // Editing never touches field errors; they change only when validation runs.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn profile(&self) -> Option<&BusinessProfile> {
        self.profile.as_ref()
    }

    fn validate(&mut self) -> bool {
        self.field_errors = FieldErrors {
            name: self.name.trim().is_empty().then_some(NAME_REQUIRED),
            location: self.location.trim().is_empty().then_some(LOCATION_REQUIRED),
        };
        self.field_errors.is_empty()
    }

    /// Start a submit. Returns `None` while a submit is already in flight or
    /// when validation fails; no request should be sent in either case.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.loading || !self.validate() {
            return None;
        }

        self.loading = true;
        self.banner = None;

        Some(SubmitRequest {
            name: self.name.clone(),
            location: self.location.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<BusinessProfile, ClientError>) {
        self.loading = false;

        match result {
            Ok(profile) => {
                self.profile = Some(profile);
                // Regenerations issued against the previous profile are stale now
                self.issued_seq += 1;
                self.applied_seq = self.issued_seq;
            }
            Err(e) => {
                warn!(error = %e, "Error fetching business data");
                self.banner = Some(FETCH_FAILED.to_string());
            }
        }
    }

    /// Start a headline regeneration. Only possible once a profile is shown.
    pub fn begin_regenerate(&mut self) -> Option<RegenerateTicket> {
        self.profile.as_ref()?;
        self.issued_seq += 1;
        Some(RegenerateTicket {
            seq: self.issued_seq,
        })
    }

    /// Apply a regeneration result. Returns `false` when the response was
    /// superseded by a newer one and dropped.
    pub fn finish_regenerate(
        &mut self,
        ticket: RegenerateTicket,
        result: Result<HeadlineUpdate, ClientError>,
    ) -> bool {
        if ticket.seq <= self.applied_seq {
            return false;
        }
        self.applied_seq = ticket.seq;

        match result {
            Ok(update) => {
                if let Some(profile) = self.profile.as_mut() {
                    profile.headline = update.headline;
                }
            }
            Err(e) => {
                warn!(error = %e, "Error regenerating headline");
                self.banner = Some(REGENERATE_FAILED.to_string());
            }
        }
        true
    }

    /// Validate, fetch and apply a profile. Returns whether a request was sent.
    pub async fn submit<A: BusinessApi>(&mut self, api: &A) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };

        let result = api.fetch_profile(&request.name, &request.location).await;
        self.finish_submit(result);
        true
    }

    /// Fetch and apply a new headline. Returns whether a request was sent.
    pub async fn regenerate<A: BusinessApi>(&mut self, api: &A) -> bool {
        let Some(ticket) = self.begin_regenerate() else {
            return false;
        };

        let result = api.regenerate_headline(&self.name, &self.location).await;
        self.finish_regenerate(ticket, result);
        true
    }

    pub fn view(&self) -> DashboardView<'_> {
        DashboardView {
            name: &self.name,
            location: &self.location,
            field_errors: &self.field_errors,
            banner: self.banner.as_deref(),
            submit: SubmitControl {
                disabled: self.loading,
                spinner: self.loading,
                label: if self.loading {
                    LOADING_LABEL
                } else {
                    SUBMIT_LABEL
                },
            },
            profile: self.profile.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub spinner: bool,
    pub label: &'static str,
}

/// What the screen shows for the current state
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    pub name: &'a str,
    pub location: &'a str,
    pub field_errors: &'a FieldErrors,
    pub banner: Option<&'a str>,
    pub submit: SubmitControl,
    pub profile: Option<&'a BusinessProfile>,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Local Business Dashboard")?;
        writeln!(f)?;
        writeln!(f, "Business Name: {}", self.name)?;
        if let Some(error) = self.field_errors.name {
            writeln!(f, "  ! {}", error)?;
        }
        writeln!(f, "Location: {}", self.location)?;
        if let Some(error) = self.field_errors.location {
            writeln!(f, "  ! {}", error)?;
        }

        let spinner = if self.submit.spinner { "⟳ " } else { "" };
        let state = if self.submit.disabled { " (disabled)" } else { "" };
        writeln!(f, "[ {}{} ]{}", spinner, self.submit.label, state)?;

        if let Some(banner) = self.banner {
            writeln!(f)?;
            writeln!(f, "Error: {}", banner)?;
        }

        if let Some(profile) = self.profile {
            writeln!(f)?;
            writeln!(f, "Business Information")?;
            writeln!(f, "  Name:     {}", profile.name)?;
            writeln!(f, "  Location: {}", profile.location)?;
            writeln!(f, "  Rating:   {} ★", profile.rating)?;
            writeln!(f, "  Reviews:  {}", profile.reviews)?;
            writeln!(f)?;
            writeln!(f, "SEO Headline")?;
            writeln!(f, "  \"{}\"", profile.headline)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn profile() -> BusinessProfile {
        BusinessProfile {
            rating: "4.3".to_string(),
            reviews: 128,
            headline: "Discover the Secret Behind Cake and Co's Recipes".to_string(),
            name: "Cake & Co".to_string(),
            location: "Mumbai".to_string(),
        }
    }

    fn update(headline: &str) -> HeadlineUpdate {
        HeadlineUpdate {
            headline: headline.to_string(),
            timestamp: "2025-01-01T10:00:00.000Z".to_string(),
        }
    }

    fn server_error() -> ClientError {
        ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Answers from canned data and counts calls
    #[derive(Default)]
    struct FakeApi {
        fail: bool,
        calls: AtomicUsize,
    }

    impl BusinessApi for FakeApi {
        async fn fetch_profile(
            &self,
            name: &str,
            location: &str,
        ) -> Result<BusinessProfile, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(server_error());
            }
            Ok(BusinessProfile {
                name: name.to_string(),
                location: location.to_string(),
                ..profile()
            })
        }

        async fn regenerate_headline(
            &self,
            _name: &str,
            _location: &str,
        ) -> Result<HeadlineUpdate, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(server_error());
            }
            Ok(update("Top Reasons Cake and Co leads the Sweets Section"))
        }
    }

    fn loaded() -> Dashboard {
        let mut dashboard = Dashboard::new();
        dashboard.set_name("Cake & Co");
        dashboard.set_location("Mumbai");
        dashboard.begin_submit().unwrap();
        dashboard.finish_submit(Ok(profile()));
        dashboard
    }

    #[test]
    fn test_blank_fields_block_submit() {
        let mut dashboard = Dashboard::new();
        dashboard.set_name("   ");

        assert!(dashboard.begin_submit().is_none());
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.field_errors().name, Some(NAME_REQUIRED));
        assert_eq!(dashboard.field_errors().location, Some(LOCATION_REQUIRED));
    }

    #[test]
    fn test_editing_does_not_clear_field_errors() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_submit();

        dashboard.set_name("Cake & Co");
        assert_eq!(dashboard.field_errors().name, Some(NAME_REQUIRED));

        // Next validation run recomputes
        dashboard.begin_submit();
        assert_eq!(dashboard.field_errors().name, None);
        assert_eq!(dashboard.field_errors().location, Some(LOCATION_REQUIRED));
    }

    #[test]
    fn test_loading_disables_submit() {
        let mut dashboard = Dashboard::new();
        dashboard.set_name("Cake & Co");
        dashboard.set_location("Mumbai");

        let request = dashboard.begin_submit().unwrap();
        assert_eq!(request.name, "Cake & Co");

        let view = dashboard.view();
        assert!(view.submit.disabled);
        assert!(view.submit.spinner);
        assert_eq!(view.submit.label, LOADING_LABEL);

        // Only one submit in flight
        assert!(dashboard.begin_submit().is_none());

        dashboard.finish_submit(Ok(profile()));
        let view = dashboard.view();
        assert!(!view.submit.disabled);
        assert_eq!(view.submit.label, SUBMIT_LABEL);
        assert_eq!(view.profile, Some(&profile()));
    }

    #[test]
    fn test_failed_submit_shows_banner_without_profile() {
        let mut dashboard = Dashboard::new();
        dashboard.set_name("Cake & Co");
        dashboard.set_location("Mumbai");
        dashboard.begin_submit().unwrap();
        dashboard.finish_submit(Err(server_error()));

        assert!(!dashboard.is_loading());
        assert!(dashboard.profile().is_none());
        assert_eq!(dashboard.banner(), Some(FETCH_FAILED));
    }

    #[test]
    fn test_banner_and_field_errors_are_independent() {
        let mut dashboard = Dashboard::new();
        dashboard.set_name("Cake & Co");
        dashboard.set_location("Mumbai");
        dashboard.begin_submit().unwrap();
        dashboard.finish_submit(Err(server_error()));

        dashboard.set_location("");
        assert!(dashboard.begin_submit().is_none());

        let view = dashboard.view();
        assert_eq!(view.banner, Some(FETCH_FAILED));
        assert_eq!(view.field_errors.location, Some(LOCATION_REQUIRED));
    }

    #[test]
    fn test_regenerate_requires_profile() {
        let mut dashboard = Dashboard::new();
        assert!(dashboard.begin_regenerate().is_none());
    }

    #[test]
    fn test_regenerate_replaces_only_headline() {
        let mut dashboard = loaded();
        let ticket = dashboard.begin_regenerate().unwrap();

        assert!(dashboard.finish_regenerate(ticket, Ok(update("Fresh headline"))));

        let shown = dashboard.profile().unwrap();
        assert_eq!(shown.headline, "Fresh headline");
        assert_eq!(
            BusinessProfile {
                headline: profile().headline,
                ..shown.clone()
            },
            profile()
        );
    }

    #[test]
    fn test_failed_regenerate_keeps_profile() {
        let mut dashboard = loaded();
        let ticket = dashboard.begin_regenerate().unwrap();

        dashboard.finish_regenerate(ticket, Err(server_error()));

        assert_eq!(dashboard.profile(), Some(&profile()));
        assert_eq!(dashboard.banner(), Some(REGENERATE_FAILED));
    }

    #[test]
    fn test_stale_regenerate_is_dropped() {
        let mut dashboard = loaded();
        let first = dashboard.begin_regenerate().unwrap();
        let second = dashboard.begin_regenerate().unwrap();

        assert!(dashboard.finish_regenerate(second, Ok(update("Second"))));
        assert!(!dashboard.finish_regenerate(first, Ok(update("First"))));
        assert_eq!(dashboard.profile().unwrap().headline, "Second");
    }

    #[test]
    fn test_in_order_regenerates_both_apply() {
        let mut dashboard = loaded();
        let first = dashboard.begin_regenerate().unwrap();
        let second = dashboard.begin_regenerate().unwrap();

        assert!(dashboard.finish_regenerate(first, Ok(update("First"))));
        assert!(dashboard.finish_regenerate(second, Ok(update("Second"))));
        assert_eq!(dashboard.profile().unwrap().headline, "Second");
    }

    #[test]
    fn test_regenerate_issued_before_new_profile_is_dropped() {
        let mut dashboard = loaded();
        let ticket = dashboard.begin_regenerate().unwrap();

        dashboard.begin_submit().unwrap();
        dashboard.finish_submit(Ok(profile()));

        assert!(!dashboard.finish_regenerate(ticket, Ok(update("Late"))));
        assert_eq!(dashboard.profile(), Some(&profile()));
    }

    #[tokio::test]
    async fn test_submit_and_regenerate_over_api() {
        let api = FakeApi::default();
        let mut dashboard = Dashboard::new();

        assert!(!dashboard.submit(&api).await);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);

        dashboard.set_name("Bean Bar");
        dashboard.set_location("Goa");
        assert!(dashboard.submit(&api).await);
        assert_eq!(dashboard.profile().unwrap().name, "Bean Bar");

        assert!(dashboard.regenerate(&api).await);
        assert_eq!(
            dashboard.profile().unwrap().headline,
            "Top Reasons Cake and Co leads the Sweets Section"
        );
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_submit_failure_over_api() {
        let api = FakeApi {
            fail: true,
            ..Default::default()
        };
        let mut dashboard = Dashboard::new();
        dashboard.set_name("Bean Bar");
        dashboard.set_location("Goa");

        assert!(dashboard.submit(&api).await);
        assert!(dashboard.profile().is_none());
        assert_eq!(dashboard.banner(), Some(FETCH_FAILED));
    }

    #[test]
    fn test_render_loaded_view() {
        let dashboard = loaded();
        let text = dashboard.view().to_string();

        assert!(text.contains("Business Information"));
        assert!(text.contains("Rating:   4.3 ★"));
        assert!(text.contains("Reviews:  128"));
        assert!(text.contains("\"Discover the Secret Behind Cake and Co's Recipes\""));
        assert!(text.contains(SUBMIT_LABEL));
        assert!(!text.contains("Error:"));
    }

    #[test]
    fn test_render_errors() {
        let mut dashboard = Dashboard::new();
        dashboard.begin_submit();
        let text = dashboard.view().to_string();

        assert!(text.contains(NAME_REQUIRED));
        assert!(text.contains(LOCATION_REQUIRED));
        assert!(!text.contains("Business Information"));
    }
}
