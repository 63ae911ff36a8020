//! Read projections returned to API clients

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::app_user::AppUser;
use super::photo::Photo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDto {
    pub id: i32,
    pub url: String,
    pub is_main: bool,
}

/// Public view of a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i32,
    pub username: String,
    /// Url of the main photo, if the member has one.
    pub photo_url: Option<String>,
    pub age: i32,
    pub known_as: Option<String>,
    pub created: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub gender: Option<String>,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub photos: Vec<PhotoDto>,
}

/// Whole years between `date_of_birth` and `today`.
pub fn calculate_age(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

impl From<&Photo> for PhotoDto {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            url: photo.url.clone(),
            is_main: photo.is_main,
        }
    }
}

impl From<&AppUser> for Member {
    fn from(user: &AppUser) -> Self {
        Self {
            id: user.id,
            username: user.user_name.clone(),
            photo_url: user.photos.main().map(|p| p.url.clone()),
            age: calculate_age(user.date_of_birth, Utc::now().date_naive()),
            known_as: user.known_as.clone(),
            created: user.created,
            last_active: user.last_active,
            gender: user.gender.clone(),
            introduction: user.introduction.clone(),
            looking_for: user.looking_for.clone(),
            interests: user.interests.clone(),
            city: user.city.clone(),
            country: user.country.clone(),
            photos: user.photos.iter().map(PhotoDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhotoAlbum;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date(1990, 6, 15);
        assert_eq!(calculate_age(dob, date(2020, 6, 14)), 29);
        assert_eq!(calculate_age(dob, date(2020, 6, 15)), 30);
        assert_eq!(calculate_age(dob, date(2020, 12, 1)), 30);
    }

    #[test]
    fn test_member_projection_uses_main_photo_url() {
        let user = AppUser {
            id: 3,
            user_name: "bob".into(),
            date_of_birth: date(1985, 1, 1),
            known_as: Some("Bob".into()),
            created: Utc::now(),
            last_active: Utc::now(),
            gender: Some("male".into()),
            introduction: None,
            looking_for: None,
            interests: None,
            city: None,
            country: None,
            photos: PhotoAlbum::from_photos(vec![
                Photo {
                    id: 5,
                    url: "https://img.example/5.jpg".into(),
                    is_main: false,
                    public_id: None,
                },
                Photo {
                    id: 6,
                    url: "https://img.example/6.jpg".into(),
                    is_main: true,
                    public_id: None,
                },
            ]),
        };

        let member = Member::from(&user);
        assert_eq!(member.username, "bob");
        assert_eq!(member.photo_url.as_deref(), Some("https://img.example/6.jpg"));
        assert_eq!(member.photos.len(), 2);
        assert!(member.photos[1].is_main);
    }

    #[test]
    fn test_member_serializes_camel_case() {
        let dto = PhotoDto {
            id: 1,
            url: "u".into(),
            is_main: true,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["isMain"], true);
    }
}
