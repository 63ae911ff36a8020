//! Member user domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::photo_album::PhotoAlbum;
use super::profile_update::ProfileUpdate;

/// Full mutable member record, keyed by `user_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUser {
    pub id: i32,
    pub user_name: String,
    pub date_of_birth: NaiveDate,
    pub known_as: Option<String>,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub gender: Option<String>,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub photos: PhotoAlbum,
}

impl AppUser {
    /// Copy every field present in `update` onto this record.
    pub fn apply_update(&mut self, update: &ProfileUpdate) {
        let ProfileUpdate {
            introduction,
            looking_for,
            interests,
            city,
            country,
        } = update;

        if let Some(v) = introduction {
            self.introduction = Some(v.clone());
        }
        if let Some(v) = looking_for {
            self.looking_for = Some(v.clone());
        }
        if let Some(v) = interests {
            self.interests = Some(v.clone());
        }
        if let Some(v) = city {
            self.city = Some(v.clone());
        }
        if let Some(v) = country {
            self.country = Some(v.clone());
        }
    }
}
