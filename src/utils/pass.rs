//! Password-related utilities.

use lazy_static::lazy_static;
use libreauth::pass::{Algorithm, HashBuilder, Hasher};

use crate::error::CadenzaError;

pub(crate) const PWD_ALGORITHM: Algorithm = Algorithm::Argon2;
pub(crate) const PWD_SCHEME_VERSION: usize = 1;

// If the Hasher changes, make sure to increment PWD_SCHEME_VERSION
lazy_static! {
    pub(crate) static ref HASHER: Hasher = {
        HashBuilder::new()
            .algorithm(PWD_ALGORITHM)
            .version(PWD_SCHEME_VERSION)
            .finalize()
            .expect("password hasher configuration is valid")
    };
}

/// Outcome of checking a password against a stored PHC hash.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum PasswordCheck {
    Invalid,
    Valid,
    /// Valid, but hashed with an older scheme and should be re-hashed.
    ValidOutdated,
}

/// Hash a plaintext password into PHC form.
pub(crate) fn hash_password(password: &str) -> Result<String, CadenzaError> {
    HASHER
        .hash(password)
        .map_err(|e| CadenzaError::PasswordHash(format!("{:?}", e)))
}

pub(crate) fn check_password(stored: &str, candidate: &str) -> PasswordCheck {
    let checker = match HashBuilder::from_phc(stored) {
        Ok(checker) => checker,
        Err(e) => {
            tracing::warn!("Stored password hash is unreadable: {:?}", e);
            return PasswordCheck::Invalid;
        }
    };

    if !checker.is_valid(candidate) {
        PasswordCheck::Invalid
    } else if checker.needs_update(Some(PWD_SCHEME_VERSION)) {
        PasswordCheck::ValidOutdated
    } else {
        PasswordCheck::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_check() {
        let stored = hash_password("correct horse 1").unwrap();
        assert_ne!(stored, "correct horse 1");
        assert_eq!(check_password(&stored, "correct horse 1"), PasswordCheck::Valid);
        assert_eq!(check_password(&stored, "wrong horse 1"), PasswordCheck::Invalid);
    }

    #[test]
    fn garbage_hash_never_matches() {
        assert_eq!(check_password("not-a-phc-string", "anything"), PasswordCheck::Invalid);
    }
}
