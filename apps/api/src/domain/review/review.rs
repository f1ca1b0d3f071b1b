use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_TITLE_LENGTH: usize = 100;

/// Rating value object, between 1 and 10 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 10;

    /// Creates a rating
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::review::Rating;
    ///
    /// assert!(Rating::new(8).is_ok());
    /// assert!(Rating::new(11).is_err());
    /// ```
    pub fn new(value: i32) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!(
                "Please add a rating between {} and {}",
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A user's review of a bootcamp
///
/// A user can review each bootcamp only once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub rating: Rating,
    #[serde(rename = "bootcamp")]
    pub bootcamp_id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(serialize_with = "crate::domain::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields for a new review
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewInput {
    pub title: String,
    pub text: String,
    pub rating: i32,
}

/// Validated data for inserting a review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub id: Uuid,
    pub bootcamp_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub text: String,
    pub rating: Rating,
}

impl NewReview {
    pub fn new(bootcamp_id: Uuid, user_id: Uuid, input: ReviewInput) -> Result<Self, String> {
        Ok(Self {
            id: Uuid::new_v4(),
            bootcamp_id,
            user_id,
            title: validate_title(&input.title)?,
            text: validate_text(&input.text)?,
            rating: Rating::new(input.rating)?,
        })
    }
}

/// Client-supplied partial update of a review
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub title: Option<String>,
    pub text: Option<String>,
    pub rating: Option<i32>,
}

/// Validated partial update of a review
#[derive(Debug, Clone, Default)]
pub struct ReviewChanges {
    pub title: Option<String>,
    pub text: Option<String>,
    pub rating: Option<Rating>,
}

impl ReviewChanges {
    pub fn new(patch: ReviewPatch) -> Result<Self, String> {
        Ok(Self {
            title: patch.title.as_deref().map(validate_title).transpose()?,
            text: patch.text.as_deref().map(validate_text).transpose()?,
            rating: patch.rating.map(Rating::new).transpose()?,
        })
    }
}

fn validate_title(title: &str) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Please add a title for the review".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title can not be more than {} characters",
            MAX_TITLE_LENGTH
        ));
    }
    Ok(title.to_string())
}

fn validate_text(text: &str) -> Result<String, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("Please add some text".to_string());
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(10).unwrap().value(), 10);
        assert!(Rating::new(11).is_err());
    }

    #[test]
    fn rating_deserialization_validates() {
        assert!(serde_json::from_str::<Rating>("7").is_ok());
        assert!(serde_json::from_str::<Rating>("42").is_err());
    }

    #[test]
    fn valid_review() {
        let review = NewReview::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            ReviewInput {
                title: "Learned a ton!".to_string(),
                text: "Great instructors".to_string(),
                rating: 8,
            },
        )
        .unwrap();

        assert_eq!(review.rating.value(), 8);
    }

    #[test]
    fn long_title_is_rejected() {
        let patch = ReviewPatch {
            title: Some("t".repeat(101)),
            ..ReviewPatch::default()
        };
        assert!(ReviewChanges::new(patch).is_err());
    }
}
