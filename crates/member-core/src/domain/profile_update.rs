//! Partial profile update payload

use member_shared::constants::{MAX_LOCATION_LENGTH, MAX_PROFILE_TEXT_LENGTH};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fields a member may change on their own profile. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(max = MAX_PROFILE_TEXT_LENGTH, message = "Introduction too long"))]
    pub introduction: Option<String>,

    #[validate(length(max = MAX_PROFILE_TEXT_LENGTH, message = "Looking for too long"))]
    pub looking_for: Option<String>,

    #[validate(length(max = MAX_PROFILE_TEXT_LENGTH, message = "Interests too long"))]
    pub interests: Option<String>,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "City too long"))]
    pub city: Option<String>,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "Country too long"))]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_payload() {
        let update: ProfileUpdate =
            serde_json::from_str(r#"{"lookingFor":"hiking partners","city":"Leeds"}"#).unwrap();

        assert_eq!(update.looking_for.as_deref(), Some("hiking partners"));
        assert_eq!(update.city.as_deref(), Some("Leeds"));
        assert!(update.introduction.is_none());
    }

    #[test]
    fn test_overlong_city_fails_validation() {
        let update = ProfileUpdate {
            city: Some("x".repeat(101)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
