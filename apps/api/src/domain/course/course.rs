use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Skill level a student needs before starting a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "minimum_skill", rename_all = "lowercase")]
pub enum MinimumSkill {
    Beginner,
    Intermediate,
    Advanced,
}

/// A course offered by a bootcamp
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub weeks: String,
    pub tuition: i32,
    pub minimum_skill: MinimumSkill,
    pub scholarship_available: bool,
    #[serde(rename = "bootcamp")]
    pub bootcamp_id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(serialize_with = "crate::domain::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields for creating a course
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub weeks: String,
    pub tuition: i32,
    pub minimum_skill: MinimumSkill,
    #[serde(default)]
    pub scholarship_available: bool,
}

/// Validated data for inserting a course
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub id: Uuid,
    pub bootcamp_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub weeks: String,
    pub tuition: i32,
    pub minimum_skill: MinimumSkill,
    pub scholarship_available: bool,
}

impl NewCourse {
    /// Validates a course for `bootcamp_id`, created by `user_id`
    ///
    /// # Business Rules Enforced
    /// - Title, description and weeks are required
    /// - Tuition cannot be negative
    pub fn new(bootcamp_id: Uuid, user_id: Uuid, input: CourseInput) -> Result<Self, String> {
        Ok(Self {
            id: Uuid::new_v4(),
            bootcamp_id,
            user_id,
            title: required(&input.title, "Please add a course title")?,
            description: required(&input.description, "Please add a description")?,
            weeks: required(&input.weeks, "Please add number of weeks")?,
            tuition: validate_tuition(input.tuition)?,
            minimum_skill: input.minimum_skill,
            scholarship_available: input.scholarship_available,
        })
    }
}

/// Client-supplied partial update of a course
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<String>,
    pub tuition: Option<i32>,
    pub minimum_skill: Option<MinimumSkill>,
    pub scholarship_available: Option<bool>,
}

/// Validated partial update of a course
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub weeks: Option<String>,
    pub tuition: Option<i32>,
    pub minimum_skill: Option<MinimumSkill>,
    pub scholarship_available: Option<bool>,
}

impl CourseChanges {
    pub fn new(patch: CoursePatch) -> Result<Self, String> {
        Ok(Self {
            title: patch
                .title
                .map(|t| required(&t, "Please add a course title"))
                .transpose()?,
            description: patch
                .description
                .map(|d| required(&d, "Please add a description"))
                .transpose()?,
            weeks: patch
                .weeks
                .map(|w| required(&w, "Please add number of weeks"))
                .transpose()?,
            tuition: patch.tuition.map(validate_tuition).transpose()?,
            minimum_skill: patch.minimum_skill,
            scholarship_available: patch.scholarship_available,
        })
    }
}

fn required(value: &str, message: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(message.to_string());
    }
    Ok(value.to_string())
}

fn validate_tuition(tuition: i32) -> Result<i32, String> {
    if tuition < 0 {
        return Err("Tuition cannot be negative".to_string());
    }
    Ok(tuition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CourseInput {
        CourseInput {
            title: "Front End Web Development".to_string(),
            description: "HTML, CSS and JavaScript".to_string(),
            weeks: "8".to_string(),
            tuition: 8000,
            minimum_skill: MinimumSkill::Beginner,
            scholarship_available: true,
        }
    }

    #[test]
    fn valid_course() {
        let bootcamp_id = Uuid::new_v4();
        let course = NewCourse::new(bootcamp_id, Uuid::new_v4(), input()).unwrap();

        assert_eq!(course.bootcamp_id, bootcamp_id);
        assert_eq!(course.tuition, 8000);
    }

    #[test]
    fn missing_title_is_rejected() {
        let result = NewCourse::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            CourseInput {
                title: " ".to_string(),
                ..input()
            },
        );
        assert_eq!(result.unwrap_err(), "Please add a course title");
    }

    #[test]
    fn negative_tuition_is_rejected() {
        let patch = CoursePatch {
            tuition: Some(-1),
            ..CoursePatch::default()
        };
        assert!(CourseChanges::new(patch).is_err());
    }

    #[test]
    fn minimum_skill_deserializes_lowercase() {
        let skill: MinimumSkill = serde_json::from_str("\"intermediate\"").unwrap();
        assert_eq!(skill, MinimumSkill::Intermediate);
        assert!(serde_json::from_str::<MinimumSkill>("\"expert\"").is_err());
    }
}
