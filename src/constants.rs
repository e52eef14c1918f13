//! Constants

// for listings
pub(crate) const DEFAULT_PAGE_LIMIT: u64 = 10;
pub(crate) const MAX_PAGE_LIMIT: u64 = 100;
// keeps the row offset within what the database driver can bind
pub(crate) const MAX_PAGE: u64 = i64::MAX as u64 / MAX_PAGE_LIMIT;

// for users
pub(crate) const LOCAL_PROVIDER: &str = "local";
pub(crate) const ADMIN_EMAIL_USER: &str = "admin";
pub(crate) const ADMIN_DEFAULT_PASSWORD: &str = "admin123";

// for OAuth sign-in requests
pub(crate) const OAUTH_STATE_EXPIRY_SECS: i64 = 600;
pub(crate) const MAX_PENDING_OAUTH_STATES: usize = 10_000;

// for session tokens
pub(crate) const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

// for image redirects when a row has no image of its own
pub(crate) const PLACEHOLDER_BLOG_IMAGE: &str = "/images/blog_thumb/b1.png";
pub(crate) const PLACEHOLDER_PERSON_IMAGE: &str = "/images/users_img/u1.png";
pub(crate) const PLACEHOLDER_COMPANY_IMAGE: &str = "/images/company_img/c1.png";
