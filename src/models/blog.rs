use chrono::{DateTime, Utc};
use entity::{blog, user};
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{nullable, patch};

/// The JSON input for `POST /api/blogs`. The author is always the caller.
#[derive(Debug, Validate, Deserialize)]
pub(crate) struct NewBlog {
    #[validate(length(min = 1, max = 255, message = "Title is required (at most 255 characters)"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub(crate) content: String,
    #[validate(length(min = 1, message = "Summary is required"))]
    pub(crate) summary: String,
    pub(crate) image_url: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) tags: Option<String>,
    #[serde(default)]
    pub(crate) published: bool,
    pub(crate) publish_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) pinned: bool,
}

impl NewBlog {
    pub(crate) fn into_active_model(self, author_id: i32) -> blog::ActiveModel {
        let publish_date = match (self.published, self.publish_date) {
            (true, None) => Some(Utc::now()),
            (_, date) => date,
        };

        blog::ActiveModel {
            title: Set(self.title),
            content: Set(self.content),
            summary: Set(self.summary),
            image_url: Set(self.image_url),
            author_id: Set(author_id),
            category: Set(self.category),
            tags: Set(self.tags),
            published: Set(self.published),
            publish_date: Set(publish_date),
            pinned: Set(self.pinned),
            ..Default::default()
        }
    }
}

/// Changeset for `PUT /api/blogs/{id}`.
#[derive(Debug, Default, Validate, Deserialize)]
pub(crate) struct UpdateBlog {
    #[validate(length(min = 1, max = 255, message = "Title cannot be empty (at most 255 characters)"))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub(crate) content: Option<String>,
    #[validate(length(min = 1, message = "Summary cannot be empty"))]
    pub(crate) summary: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) category: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) tags: Option<Option<String>>,
    pub(crate) published: Option<bool>,
    #[serde(default, deserialize_with = "nullable")]
    pub(crate) publish_date: Option<Option<DateTime<Utc>>>,
    pub(crate) pinned: Option<bool>,
}

impl UpdateBlog {
    /// Apply the changes to `current`. Publishing a post that has no date stamps it with now.
    pub(crate) fn apply(self, current: blog::Model) -> blog::ActiveModel {
        let mut post: blog::ActiveModel = current.into();

        patch(&mut post.title, self.title);
        patch(&mut post.content, self.content);
        patch(&mut post.summary, self.summary);
        patch(&mut post.image_url, self.image_url);
        patch(&mut post.category, self.category);
        patch(&mut post.tags, self.tags);
        patch(&mut post.pinned, self.pinned);

        let explicit_date = self.publish_date.is_some();
        patch(&mut post.publish_date, self.publish_date);
        if let Some(published) = self.published {
            post.published = Set(published);
            let dated = match &post.publish_date {
                Set(date) | Unchanged(date) => date.is_some(),
                NotSet => false,
            };
            if published && !dated && !explicit_date {
                post.publish_date = Set(Some(Utc::now()));
            }
        }
        post
    }
}

/// The author's public details, embedded in blog responses.
#[derive(Debug, Serialize)]
pub(crate) struct AuthorSummary {
    pub(crate) id: i32,
    pub(crate) full_name: String,
}

/// A blog post as returned by the API.
#[derive(Debug, Serialize)]
pub(crate) struct BlogResponse {
    #[serde(flatten)]
    pub(crate) post: blog::Model,
    pub(crate) author: Option<AuthorSummary>,
}

impl From<(blog::Model, Option<user::Model>)> for BlogResponse {
    fn from((post, author): (blog::Model, Option<user::Model>)) -> Self {
        BlogResponse {
            post,
            author: author.map(|author| AuthorSummary {
                id: author.id,
                full_name: author.full_name,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> blog::Model {
        let now = Utc::now();
        blog::Model {
            id: 1,
            title: "Draft".into(),
            content: "Body".into(),
            summary: "Summary".into(),
            image_url: None,
            author_id: 1,
            category: None,
            tags: None,
            published: false,
            publish_date: None,
            pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn publishing_stamps_a_date() {
        let changes = UpdateBlog {
            published: Some(true),
            ..Default::default()
        };
        let post = changes.apply(draft());
        assert_eq!(post.published, Set(true));
        assert!(matches!(post.publish_date, Set(Some(_))));
    }

    #[test]
    fn explicit_date_is_kept() {
        let date = Utc::now() - chrono::Duration::days(3);
        let changes = UpdateBlog {
            published: Some(true),
            publish_date: Some(Some(date)),
            ..Default::default()
        };
        let post = changes.apply(draft());
        assert_eq!(post.publish_date, Set(Some(date)));
    }

    #[test]
    fn new_published_post_is_dated() {
        let post = NewBlog {
            title: "Hello".into(),
            content: "World".into(),
            summary: "Hi".into(),
            image_url: None,
            category: None,
            tags: None,
            published: true,
            publish_date: None,
            pinned: false,
        }
        .into_active_model(7);
        assert_eq!(post.author_id, Set(7));
        assert!(matches!(post.publish_date, Set(Some(_))));
    }
}
