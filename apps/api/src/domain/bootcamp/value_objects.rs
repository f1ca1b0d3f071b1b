use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Career track offered by a bootcamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    Business,
    Other,
}

impl Career {
    pub const ALL: [Career; 6] = [
        Career::WebDevelopment,
        Career::MobileDevelopment,
        Career::UiUx,
        Career::DataScience,
        Career::Business,
        Career::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Career::WebDevelopment => "Web Development",
            Career::MobileDevelopment => "Mobile Development",
            Career::UiUx => "UI/UX",
            Career::DataScience => "Data Science",
            Career::Business => "Business",
            Career::Other => "Other",
        }
    }
}

impl FromStr for Career {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Career::ALL
            .into_iter()
            .find(|career| career.as_str() == value)
            .ok_or_else(|| format!("Invalid career: {}", value))
    }
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a lowercase URL slug from a name
///
/// Runs of anything other than ASCII letters and digits collapse into a
/// single '-', with no leading or trailing separator.
///
/// # Example
/// ```
/// use devcamper_api::domain::bootcamp::slugify;
///
/// assert_eq!(slugify("Devworks Bootcamp"), "devworks-bootcamp");
/// assert_eq!(slugify("  ModernTech -- Bootcamp! "), "moderntech-bootcamp");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn careers_parse_from_display_names() {
        for career in Career::ALL {
            assert_eq!(career.as_str().parse::<Career>(), Ok(career));
        }
        assert!("Cooking".parse::<Career>().is_err());
    }

    #[test]
    fn careers_serialize_as_display_names() {
        let json = serde_json::to_value([Career::UiUx, Career::WebDevelopment]).unwrap();
        assert_eq!(json, serde_json::json!(["UI/UX", "Web Development"]));
    }

    #[test]
    fn slug_collapses_separators() {
        assert_eq!(slugify("Codemasters"), "codemasters");
        assert_eq!(slugify("UI/UX  Academy"), "ui-ux-academy");
        assert_eq!(slugify("---"), "");
    }
}
