use entity::company;
use sea_orm::ActiveValue::Set;
use serde::Deserialize;
use validator::Validate;

use crate::models::{nullable, patch};

/// The JSON input for `POST /api/companies`. Also the shape of the seed data.
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct NewCompany {
    #[validate(length(min = 1, max = 255, message = "Name is required (at most 255 characters)"))]
    pub(crate) name: String,
    pub(crate) logo_url: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Category is required (at most 100 characters)"))]
    pub(crate) category: String,
    #[validate(length(min = 1, max = 255, message = "Location is required (at most 255 characters)"))]
    pub(crate) location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) verified: bool,
    pub(crate) stage: Option<String>,
    #[validate(url(message = "Must be a valid URL."))]
    pub(crate) website: Option<String>,
    pub(crate) founded_year: Option<i32>,
    pub(crate) employee_count: Option<String>,
    pub(crate) funding_stage: Option<String>,
    pub(crate) total_funding: Option<String>,
    pub(crate) investor_information: Option<String>,
    pub(crate) product_description: Option<String>,
    pub(crate) business_model: Option<String>,
    pub(crate) target_market: Option<String>,
    pub(crate) competitive_landscape: Option<String>,
    pub(crate) traction_metrics: Option<String>,
    pub(crate) traction_score: Option<i32>,
    pub(crate) notes: Option<String>,
}

impl NewCompany {
    pub(crate) fn into_active_model(self) -> company::ActiveModel {
        company::ActiveModel {
            name: Set(self.name),
            logo_url: Set(self.logo_url),
            category: Set(self.category),
            location: Set(self.location),
            description: Set(self.description),
            verified: Set(self.verified),
            stage: Set(self.stage),
            website: Set(self.website),
            founded_year: Set(self.founded_year),
            employee_count: Set(self.employee_count),
            funding_stage: Set(self.funding_stage),
            total_funding: Set(self.total_funding),
            investor_information: Set(self.investor_information),
            product_description: Set(self.product_description),
            business_model: Set(self.business_model),
            target_market: Set(self.target_market),
            competitive_landscape: Set(self.competitive_landscape),
            traction_metrics: Set(self.traction_metrics),
            traction_score: Set(self.traction_score),
            notes: Set(self.notes),
            ..Default::default()
        }
    }
}

/// The action by which a company is updated. Can be understood as a sort of changeset.
///
/// Absent fields are left alone; `null` clears a nullable field.
#[derive(Debug, Default, Validate, Deserialize)]
pub(crate) struct UpdateCompany {
    #[validate(length(min = 1, max = 255, message = "Name cannot be empty (at most 255 characters)"))]
    pub(crate) name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) logo_url: Option<Option<String>>,
    #[validate(length(min = 1, max = 100, message = "Category cannot be empty (at most 100 characters)"))]
    pub(crate) category: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Location cannot be empty (at most 255 characters)"))]
    pub(crate) location: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub(crate) description: Option<String>,
    pub(crate) verified: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) stage: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(url(message = "Must be a valid URL."))]
    pub(crate) website: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) founded_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) employee_count: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) funding_stage: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) total_funding: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) investor_information: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) product_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) business_model: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) target_market: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) competitive_landscape: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) traction_metrics: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) traction_score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) notes: Option<Option<String>>,
}

impl UpdateCompany {
    pub(crate) fn apply(self, company: &mut company::ActiveModel) {
        patch(&mut company.name, self.name);
        patch(&mut company.logo_url, self.logo_url);
        patch(&mut company.category, self.category);
        patch(&mut company.location, self.location);
        patch(&mut company.description, self.description);
        patch(&mut company.verified, self.verified);
        patch(&mut company.stage, self.stage);
        patch(&mut company.website, self.website);
        patch(&mut company.founded_year, self.founded_year);
        patch(&mut company.employee_count, self.employee_count);
        patch(&mut company.funding_stage, self.funding_stage);
        patch(&mut company.total_funding, self.total_funding);
        patch(&mut company.investor_information, self.investor_information);
        patch(&mut company.product_description, self.product_description);
        patch(&mut company.business_model, self.business_model);
        patch(&mut company.target_market, self.target_market);
        patch(&mut company.competitive_landscape, self.competitive_landscape);
        patch(&mut company.traction_metrics, self.traction_metrics);
        patch(&mut company.traction_score, self.traction_score);
        patch(&mut company.notes, self.notes);
    }
}
