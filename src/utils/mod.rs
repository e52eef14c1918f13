//! Miscellaneous utils
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

pub(crate) mod pass;

const KEY_LENGTH: usize = 32;

/// Generate a random alphanumeric key `KEY_LENGTH` long.
pub(crate) fn generate_key() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect()
}
