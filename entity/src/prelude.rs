pub use super::blog::Entity as Blog;
pub use super::company::Entity as Company;
pub use super::person::Entity as Person;
pub use super::user::Entity as User;
