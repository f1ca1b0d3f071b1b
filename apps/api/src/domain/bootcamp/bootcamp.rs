use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{slugify, Career};
use crate::domain::user::Email;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const DEFAULT_PHOTO: &str = "no_photo.jpg";

/// A bootcamp listed in the directory
///
/// `average_cost` and `average_rating` are derived from the bootcamp's courses
/// and reviews and are recalculated whenever those change.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub careers: Vec<Career>,
    pub average_rating: Option<f64>,
    pub average_cost: Option<i32>,
    pub photo: String,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(serialize_with = "crate::domain::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

/// Client-supplied fields for creating a bootcamp
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootcampInput {
    pub name: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub careers: Vec<String>,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
}

/// Validated data for inserting a bootcamp
#[derive(Debug, Clone)]
pub struct NewBootcamp {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub careers: Vec<Career>,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
}

impl NewBootcamp {
    /// Validates client input for a bootcamp owned by `user_id`
    ///
    /// # Business Rules Enforced
    /// - Name is required, at most 50 characters
    /// - Description is required, at most 500 characters
    /// - Address is required
    /// - At least one known career
    /// - Website, phone and email must be well formed when present
    ///
    /// # Example
    /// ```
    /// use devcamper_api::domain::bootcamp::{BootcampInput, NewBootcamp};
    /// use uuid::Uuid;
    ///
    /// let input = BootcampInput {
    ///     name: "Devworks Bootcamp".to_string(),
    ///     description: "Full stack web development".to_string(),
    ///     website: Some("https://devworks.com".to_string()),
    ///     phone: None,
    ///     email: None,
    ///     address: "233 Bay State Rd Boston MA 02215".to_string(),
    ///     careers: vec!["Web Development".to_string()],
    ///     housing: true,
    ///     job_assistance: false,
    ///     job_guarantee: false,
    ///     accept_gi: true,
    /// };
    ///
    /// let bootcamp = NewBootcamp::new(Uuid::new_v4(), input).expect("valid bootcamp");
    /// assert_eq!(bootcamp.slug, "devworks-bootcamp");
    /// ```
    pub fn new(user_id: Uuid, input: BootcampInput) -> Result<Self, String> {
        let name = validate_name(&input.name)?;

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            slug: slugify(&name),
            name,
            description: validate_description(&input.description)?,
            website: input.website.as_deref().map(validate_website).transpose()?,
            phone: input.phone.as_deref().map(validate_phone).transpose()?,
            email: input.email.as_deref().map(validate_email).transpose()?,
            address: validate_address(&input.address)?,
            careers: parse_careers(&input.careers)?,
            housing: input.housing,
            job_assistance: input.job_assistance,
            job_guarantee: input.job_guarantee,
            accept_gi: input.accept_gi,
        })
    }
}

/// Client-supplied partial update of a bootcamp
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootcampPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub careers: Option<Vec<String>>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

/// Validated partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default)]
pub struct BootcampChanges {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub careers: Option<Vec<Career>>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

impl BootcampChanges {
    /// Validates a patch with the same rules as creation
    ///
    /// A new name also produces a new slug.
    pub fn new(patch: BootcampPatch) -> Result<Self, String> {
        let name = patch.name.as_deref().map(validate_name).transpose()?;

        Ok(Self {
            slug: name.as_deref().map(slugify),
            name,
            description: patch
                .description
                .as_deref()
                .map(validate_description)
                .transpose()?,
            website: patch.website.as_deref().map(validate_website).transpose()?,
            phone: patch.phone.as_deref().map(validate_phone).transpose()?,
            email: patch.email.as_deref().map(validate_email).transpose()?,
            address: patch.address.as_deref().map(validate_address).transpose()?,
            careers: patch.careers.as_deref().map(parse_careers).transpose()?,
            housing: patch.housing,
            job_assistance: patch.job_assistance,
            job_guarantee: patch.job_guarantee,
            accept_gi: patch.accept_gi,
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

fn validate_name(name: &str) -> Result<String, String> {
    let name = required(name, "Please add a name")?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name can not be more than {} characters",
            MAX_NAME_LENGTH
        ));
    }
    Ok(name)
}

fn validate_description(description: &str) -> Result<String, String> {
    let description = required(description, "Please add a description")?;
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(format!(
            "Description can not be more than {} characters",
            MAX_DESCRIPTION_LENGTH
        ));
    }
    Ok(description)
}

fn validate_address(address: &str) -> Result<String, String> {
    required(address, "Please add an address")
}

fn validate_website(website: &str) -> Result<String, String> {
    let website = website.trim();
    let host = website
        .strip_prefix("https://")
        .or_else(|| website.strip_prefix("http://"))
        .map(|rest| rest.split('/').next().unwrap_or_default());

    match host {
        Some(host) if host.contains('.') && !host.starts_with('.') && !host.ends_with('.') => {
            Ok(website.to_string())
        }
        _ => Err("Please use a valid URL with HTTP or HTTPS".to_string()),
    }
}

fn validate_phone(phone: &str) -> Result<String, String> {
    // at least ten consecutive digits somewhere in the number
    let longest_run = phone
        .split(|c: char| !c.is_ascii_digit())
        .map(str::len)
        .max()
        .unwrap_or(0);

    if longest_run < 10 {
        return Err("Please give a correct 10 digit phone number".to_string());
    }
    Ok(phone.trim().to_string())
}

fn validate_email(email: &str) -> Result<String, String> {
    Email::new(email).map(String::from)
}

fn parse_careers(careers: &[String]) -> Result<Vec<Career>, String> {
    if careers.is_empty() {
        return Err("Please add at least one career".to_string());
    }

    let mut parsed: Vec<Career> = Vec::with_capacity(careers.len());
    for career in careers {
        let career = career.parse::<Career>()?;
        if !parsed.contains(&career) {
            parsed.push(career);
        }
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> BootcampInput {
        BootcampInput {
            name: "ModernTech Bootcamp".to_string(),
            description: "ModernTech has one goal, to make learning computer science affordable"
                .to_string(),
            website: Some("https://moderntech.com".to_string()),
            phone: Some("(222) 222-2222".to_string()),
            email: Some("enroll@moderntech.com".to_string()),
            address: "220 Pawtucket St, Lowell, MA 01854".to_string(),
            careers: vec!["Web Development".to_string(), "UI/UX".to_string()],
            housing: false,
            job_assistance: true,
            job_guarantee: false,
            accept_gi: true,
        }
    }

    #[test]
    fn valid_input_builds_bootcamp() {
        let owner = Uuid::new_v4();
        let bootcamp = NewBootcamp::new(
            owner,
            BootcampInput {
                phone: Some("2222222222".to_string()),
                ..input()
            },
        )
        .unwrap();

        assert_eq!(bootcamp.user_id, owner);
        assert_eq!(bootcamp.slug, "moderntech-bootcamp");
        assert_eq!(bootcamp.careers, vec![Career::WebDevelopment, Career::UiUx]);
        assert!(bootcamp.job_assistance);
    }

    #[test]
    fn formatted_phone_without_ten_digit_run_is_rejected() {
        let result = NewBootcamp::new(Uuid::new_v4(), input());
        assert!(result.unwrap_err().contains("phone"));
    }

    #[test]
    fn long_name_is_rejected() {
        let result = NewBootcamp::new(
            Uuid::new_v4(),
            BootcampInput {
                name: "x".repeat(51),
                ..input()
            },
        );
        assert!(result.unwrap_err().contains("50"));
    }

    #[test]
    fn unknown_career_is_rejected() {
        let result = NewBootcamp::new(
            Uuid::new_v4(),
            BootcampInput {
                careers: vec!["Cooking".to_string()],
                phone: None,
                ..input()
            },
        );
        assert_eq!(result.unwrap_err(), "Invalid career: Cooking");
    }

    #[test]
    fn empty_careers_are_rejected() {
        let result = NewBootcamp::new(
            Uuid::new_v4(),
            BootcampInput {
                careers: vec![],
                phone: None,
                ..input()
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn website_must_use_http() {
        assert!(validate_website("ftp://moderntech.com").is_err());
        assert!(validate_website("https://localhost").is_err());
        assert!(validate_website("http://www.devworks.com/about").is_ok());
    }

    #[test]
    fn renaming_produces_new_slug() {
        let changes = BootcampChanges::new(BootcampPatch {
            name: Some("Codemasters Academy".to_string()),
            ..BootcampPatch::default()
        })
        .unwrap();

        assert_eq!(changes.slug.as_deref(), Some("codemasters-academy"));
        assert!(changes.description.is_none());
    }

    #[test]
    fn patch_is_validated() {
        let result = BootcampChanges::new(BootcampPatch {
            email: Some("not-an-email".to_string()),
            ..BootcampPatch::default()
        });
        assert!(result.is_err());
    }
}
