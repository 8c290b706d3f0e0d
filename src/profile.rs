use chrono::{SecondsFormat, Utc};
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_NAME: &str = "Cake & Co";
pub const DEFAULT_LOCATION: &str = "Mumbai";

pub const DEFAULT_HEADLINES: [&str; 4] = [
    "Why Cake and Co is Mumbai's Sweetest Spot in 2025",
    "Discover the Secret Behind Cake and Co's Recipes",
    "Mumbai's Sweet Sensation: Why Everyone Loves Cake and Co",
    "Top Reasons Cake and Co leads the Sweets Section",
];

const MIN_RATING: f64 = 3.5;
const MAX_RATING: f64 = 5.0;
const MAX_REVIEWS: u32 = 300;

/// Fabricated business data returned by `/business-data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// One fractional digit, e.g. `"4.2"`
    pub rating: String,
    pub reviews: u32,
    pub headline: String,
    pub name: String,
    pub location: String,
}

/// Response of `/regenerate-headline`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineUpdate {
    pub headline: String,
    pub timestamp: String,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("headline list must contain at least one entry")]
    NoHeadlines,
}

/// Builds business profiles from a fixed headline list.
///
/// The list is immutable after construction and cheap to clone, so one
/// generator can be shared by every request handler.
#[derive(Debug, Clone)]
pub struct ProfileGenerator {
    headlines: Arc<[String]>,
}

impl Default for ProfileGenerator {
    fn default() -> Self {
        Self {
            headlines: DEFAULT_HEADLINES.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl ProfileGenerator {
    pub fn new<I, S>(headlines: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headlines: Arc<[String]> = headlines.into_iter().map(Into::into).collect();
        if headlines.is_empty() {
            return Err(ProfileError::NoHeadlines);
        }
        Ok(Self { headlines })
    }

    pub fn headlines(&self) -> &[String] {
        &self.headlines
    }

    /// Generate a profile using the thread-local RNG
    pub fn generate(&self, name: Option<&str>, location: Option<&str>) -> BusinessProfile {
        self.generate_with(&mut rand::thread_rng(), name, location)
    }

    /// Generate a profile. Absent or empty inputs fall back to the defaults.
    pub fn generate_with<R: Rng>(
        &self,
        rng: &mut R,
        name: Option<&str>,
        location: Option<&str>,
    ) -> BusinessProfile {
        let rating = rng.gen_range(MIN_RATING..MAX_RATING);

        BusinessProfile {
            rating: format!("{:.1}", rating),
            reviews: rng.gen_range(0..MAX_REVIEWS),
            headline: self.headline_with(rng),
            name: or_default(name, DEFAULT_NAME),
            location: or_default(location, DEFAULT_LOCATION),
        }
    }

    pub fn headline(&self) -> String {
        self.headline_with(&mut rand::thread_rng())
    }

    pub fn headline_with<R: Rng>(&self, rng: &mut R) -> String {
        self.headlines
            .choose(rng)
            .cloned()
            .expect("headline list is non-empty, checked in `new`")
    }

    /// A fresh headline stamped with the current UTC time
    pub fn regenerate(&self) -> HeadlineUpdate {
        HeadlineUpdate {
            headline: self.headline(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}
