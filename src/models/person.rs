use entity::person;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use validator::Validate;

use crate::models::{nullable, patch};

/// The JSON input for `POST /api/people`.
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct NewPerson {
    #[validate(length(min = 1, max = 255, message = "Name is required (at most 255 characters)"))]
    pub(crate) name: String,
    pub(crate) avatar_url: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category is required (at most 100 characters)"))]
    pub(crate) category: String,
    #[validate(length(min = 1, max = 255, message = "Location is required (at most 255 characters)"))]
    pub(crate) location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) verified: bool,
    pub(crate) company: Option<String>,
    pub(crate) position: Option<String>,
    #[validate(email(message = "Must be a valid email address."))]
    pub(crate) email: Option<String>,
    #[validate(url(message = "Must be a valid URL."))]
    pub(crate) linkedin: Option<String>,
    pub(crate) twitter: Option<String>,
    pub(crate) education: Option<String>,
    pub(crate) experience: Option<String>,
    pub(crate) skills: Option<String>,
    pub(crate) achievements: Option<String>,
    pub(crate) notes: Option<String>,
}

impl NewPerson {
    pub(crate) fn into_active_model(self) -> person::ActiveModel {
        person::ActiveModel {
            name: Set(self.name),
            avatar_url: Set(self.avatar_url),
            category: Set(self.category),
            location: Set(self.location),
            description: Set(self.description),
            verified: Set(self.verified),
            company: Set(self.company),
            position: Set(self.position),
            email: Set(self.email),
            linkedin: Set(self.linkedin),
            twitter: Set(self.twitter),
            education: Set(self.education),
            experience: Set(self.experience),
            skills: Set(self.skills),
            achievements: Set(self.achievements),
            notes: Set(self.notes),
            ..Default::default()
        }
    }
}

/// Changeset for `PUT /api/people/{id}`.
#[derive(Debug, Default, Validate, Deserialize)]
pub(crate) struct UpdatePerson {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty (at most 255 characters)"))]
    pub(crate) name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) avatar_url: Option<Option<String>>,
    #[validate(length(min = 1, max = 100, message = "Category cannot be empty (at most 100 characters)"))]
    pub(crate) category: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Location cannot be empty (at most 255 characters)"))]
    pub(crate) location: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub(crate) description: Option<String>,
    pub(crate) verified: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) company: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) position: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(email(message = "Must be a valid email address."))]
    pub(crate) email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "Must be a valid URL."))]
    pub(crate) linkedin: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) twitter: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) education: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) experience: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) skills: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) achievements: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) notes: Option<Option<String>>,
}

impl UpdatePerson {
    pub(crate) fn apply(self, person: &mut person::ActiveModel) {
        patch(&mut person.name, self.name);
        patch(&mut person.avatar_url, self.avatar_url);
        patch(&mut person.category, self.category);
        patch(&mut person.location, self.location);
        patch(&mut person.description, self.description);
        patch(&mut person.verified, self.verified);
        patch(&mut person.company, self.company);
        patch(&mut person.position, self.position);
        patch(&mut person.email, self.email);
        patch(&mut person.linkedin, self.linkedin);
        patch(&mut person.twitter, self.twitter);
        patch(&mut person.education, self.education);
        patch(&mut person.experience, self.experience);
        patch(&mut person.skills, self.skills);
        patch(&mut person.achievements, self.achievements);
        patch(&mut person.notes, self.notes);
    }
}
