//! Startup seeding: the admin account plus sample directory data.

use anyhow::{Context, Result};
use entity::{
    prelude::{Blog, Company, Person, User},
    user,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::config::Config;
use crate::constants::{ADMIN_DEFAULT_PASSWORD, ADMIN_EMAIL_USER, LOCAL_PROVIDER};
use crate::models::{blog::NewBlog, company::NewCompany, person::NewPerson};
use crate::utils::pass::hash_password;

const SAMPLE_COMPANIES: &str = include_str!("../seed/companies.json");
const SAMPLE_PEOPLE: &str = include_str!("../seed/people.json");
const SAMPLE_BLOGS: &str = include_str!("../seed/blogs.json");

/// Make sure the admin account exists, then fill any empty table with sample rows.
pub async fn seed_database(db: &DatabaseConnection, config: &Config) -> Result<()> {
    let admin = ensure_admin(db, &config.allowed_email_domain).await?;

    if Company::find().count(db).await? == 0 {
        let companies: Vec<NewCompany> =
            serde_json::from_str(SAMPLE_COMPANIES).context("malformed sample companies")?;
        let count = companies.len();
        for company in companies {
            company.into_active_model().insert(db).await?;
        }
        tracing::info!("Seeded {} sample companies", count);
    } else {
        tracing::debug!("Companies already present, skipping");
    }

    if Person::find().count(db).await? == 0 {
        let people: Vec<NewPerson> =
            serde_json::from_str(SAMPLE_PEOPLE).context("malformed sample people")?;
        let count = people.len();
        for person in people {
            person.into_active_model().insert(db).await?;
        }
        tracing::info!("Seeded {} sample people", count);
    } else {
        tracing::debug!("People already present, skipping");
    }

    if Blog::find().count(db).await? == 0 {
        let posts: Vec<NewBlog> =
            serde_json::from_str(SAMPLE_BLOGS).context("malformed sample blog posts")?;
        let count = posts.len();
        for post in posts {
            post.into_active_model(admin.id).insert(db).await?;
        }
        tracing::info!("Seeded {} sample blog posts", count);
    } else {
        tracing::debug!("Blog posts already present, skipping");
    }

    Ok(())
}

/// Create the admin account, or restore its rights if it lost them.
pub async fn ensure_admin(db: &DatabaseConnection, domain: &str) -> Result<user::Model> {
    let email = format!("{}@{}", ADMIN_EMAIL_USER, domain);

    let existing = User::find()
        .filter(user::Column::Email.eq(email.as_str()))
        .one(db)
        .await?;

    let admin = match existing {
        Some(admin) if admin.is_admin && admin.is_cadenza => admin,
        Some(admin) => {
            tracing::info!("Restoring admin rights of {}", email);
            let mut admin: user::ActiveModel = admin.into();
            admin.is_admin = Set(true);
            admin.is_cadenza = Set(true);
            admin.update(db).await?
        }
        None => {
            let admin = user::ActiveModel {
                full_name: Set("Admin User".to_owned()),
                email: Set(email),
                password: Set(Some(hash_password(ADMIN_DEFAULT_PASSWORD)?)),
                is_cadenza: Set(true),
                is_admin: Set(true),
                auth_provider: Set(Some(LOCAL_PROVIDER.to_owned())),
                auth_provider_id: Set(None),
                profile_picture: Set(None),
                ..Default::default()
            }
            .insert(db)
            .await?;
            tracing::info!("Created admin account {}", admin.email);
            admin
        }
    };
    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_data_is_well_formed() {
        use validator::Validate;

        let companies: Vec<NewCompany> = serde_json::from_str(SAMPLE_COMPANIES).unwrap();
        assert_eq!(companies.len(), 5);
        assert!(companies.iter().all(|company| company.validate().is_ok()));

        let people: Vec<NewPerson> = serde_json::from_str(SAMPLE_PEOPLE).unwrap();
        assert!(people.iter().all(|person| person.validate().is_ok()));

        let posts: Vec<NewBlog> = serde_json::from_str(SAMPLE_BLOGS).unwrap();
        assert!(posts.iter().any(|post| !post.published));
        assert!(posts.iter().any(|post| post.pinned));
    }
}
