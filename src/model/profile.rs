//! Profile entity: account identity with credential material.

use serde::Serialize;

use crate::error::AppError;
use crate::validation::hex_field;

pub const AT_HANDLE_MAX_LEN: usize = 32;
pub const EMAIL_MAX_LEN: usize = 32;
pub const ACTIVATION_TOKEN_LEN: usize = 32;
pub const PASS_HASH_LEN: usize = 128;
pub const SALT_HASH_LEN: usize = 64;

/// A registered profile. Credential fields are stored but never serialized
/// into API replies.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    profile_id: Option<i64>,
    #[serde(skip_serializing)]
    profile_activation_token: String,
    profile_at_handle: String,
    profile_email: String,
    #[serde(skip_serializing)]
    profile_pass_hash: String,
    #[serde(skip_serializing)]
    profile_salt_hash: String,
}

impl Profile {
    /// Build a profile, validating every field in order. The first failure
    /// wins and no partially constructed value escapes.
    pub fn new(
        profile_id: Option<i64>,
        activation_token: &str,
        at_handle: &str,
        email: &str,
        pass_hash: &str,
        salt_hash: &str,
    ) -> Result<Self, AppError> {
        let mut profile = Profile {
            profile_id: None,
            profile_activation_token: String::new(),
            profile_at_handle: String::new(),
            profile_email: String::new(),
            profile_pass_hash: String::new(),
            profile_salt_hash: String::new(),
        };
        profile.set_profile_id(profile_id)?;
        profile.set_activation_token(activation_token)?;
        profile.set_at_handle(at_handle)?;
        profile.set_email(email)?;
        profile.set_pass_hash(pass_hash)?;
        profile.set_salt_hash(salt_hash)?;
        Ok(profile)
    }

    pub fn profile_id(&self) -> Option<i64> {
        self.profile_id
    }

    pub fn activation_token(&self) -> &str {
        &self.profile_activation_token
    }

    pub fn at_handle(&self) -> &str {
        &self.profile_at_handle
    }

    pub fn email(&self) -> &str {
        &self.profile_email
    }

    pub fn pass_hash(&self) -> &str {
        &self.profile_pass_hash
    }

    pub fn salt_hash(&self) -> &str {
        &self.profile_salt_hash
    }

    /// None means "not yet persisted" and is stored verbatim.
    pub fn set_profile_id(&mut self, profile_id: Option<i64>) -> Result<(), AppError> {
        if let Some(id) = profile_id {
            if id <= 0 {
                return Err(AppError::Range("profile id is not positive".into()));
            }
        }
        self.profile_id = profile_id;
        Ok(())
    }

    pub fn set_activation_token(&mut self, token: &str) -> Result<(), AppError> {
        self.profile_activation_token =
            hex_field("profile activation token", token, ACTIVATION_TOKEN_LEN)?;
        Ok(())
    }

    pub fn set_at_handle(&mut self, at_handle: &str) -> Result<(), AppError> {
        let at_handle = at_handle.trim().to_lowercase();
        if at_handle.is_empty() {
            return Err(AppError::Invalid("profile at handle is empty".into()));
        }
        if !at_handle.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AppError::Invalid(
                "profile at handle must contain only alphanumeric characters".into(),
            ));
        }
        if at_handle.chars().count() > AT_HANDLE_MAX_LEN {
            return Err(AppError::Range("profile at handle exceeds length limit".into()));
        }
        self.profile_at_handle = at_handle;
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), AppError> {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::Invalid("profile email is empty".into()));
        }
        if email.chars().count() > EMAIL_MAX_LEN {
            return Err(AppError::Range("profile email exceeds length limit".into()));
        }
        self.profile_email = email;
        Ok(())
    }

    pub fn set_pass_hash(&mut self, pass_hash: &str) -> Result<(), AppError> {
        self.profile_pass_hash = hex_field("profile password hash", pass_hash, PASS_HASH_LEN)?;
        Ok(())
    }

    pub fn set_salt_hash(&mut self, salt_hash: &str) -> Result<(), AppError> {
        self.profile_salt_hash = hex_field("profile salt hash", salt_hash, SALT_HASH_LEN)?;
        Ok(())
    }

    /// Called by the store after a successful insert.
    pub(crate) fn assign_id(&mut self, profile_id: i64) {
        self.profile_id = Some(profile_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> String {
        "a".repeat(ACTIVATION_TOKEN_LEN)
    }

    fn pass_hash() -> String {
        "b".repeat(PASS_HASH_LEN)
    }

    fn salt_hash() -> String {
        "c".repeat(SALT_HASH_LEN)
    }

    fn valid_profile() -> Profile {
        Profile::new(
            None,
            &token(),
            "kkristl",
            "kkristl@cnm.edu",
            &pass_hash(),
            &salt_hash(),
        )
        .unwrap()
    }

    #[test]
    fn null_id_means_not_yet_persisted() {
        assert_eq!(valid_profile().profile_id(), None);
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        let mut profile = valid_profile();
        assert!(matches!(profile.set_profile_id(Some(0)), Err(AppError::Range(_))));
        assert!(matches!(profile.set_profile_id(Some(-7)), Err(AppError::Range(_))));
        // A rejected value is never stored.
        assert_eq!(profile.profile_id(), None);
        profile.set_profile_id(Some(42)).unwrap();
        assert_eq!(profile.profile_id(), Some(42));
    }

    #[test]
    fn activation_token_is_normalized() {
        let mut profile = valid_profile();
        profile
            .set_activation_token(&format!(" {} ", token().to_uppercase()))
            .unwrap();
        assert_eq!(profile.activation_token(), token());
    }

    #[test]
    fn hex_fields_enforce_exact_lengths() {
        let mut profile = valid_profile();
        assert!(matches!(
            profile.set_activation_token(&"a".repeat(31)),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            profile.set_pass_hash(&"b".repeat(127)),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            profile.set_salt_hash(&"c".repeat(65)),
            Err(AppError::Range(_))
        ));
        assert!(matches!(
            profile.set_pass_hash(&"g".repeat(PASS_HASH_LEN)),
            Err(AppError::Invalid(_))
        ));
    }

    #[test]
    fn at_handle_is_lowercased_and_bounded() {
        let mut profile = valid_profile();
        profile.set_at_handle(" KKristl1 ").unwrap();
        assert_eq!(profile.at_handle(), "kkristl1");

        assert!(matches!(profile.set_at_handle("   "), Err(AppError::Invalid(_))));
        assert!(matches!(
            profile.set_at_handle("not ok!"),
            Err(AppError::Invalid(_))
        ));
        assert!(matches!(
            profile.set_at_handle(&"h".repeat(AT_HANDLE_MAX_LEN + 1)),
            Err(AppError::Range(_))
        ));
    }

    #[test]
    fn email_is_required_and_bounded() {
        let mut profile = valid_profile();
        assert!(matches!(profile.set_email(""), Err(AppError::Invalid(_))));
        assert!(matches!(
            profile.set_email(&"e".repeat(EMAIL_MAX_LEN + 1)),
            Err(AppError::Range(_))
        ));
    }

    #[test]
    fn construction_fails_on_first_bad_field() {
        let err = Profile::new(Some(-1), &token(), "kkristl", "k@cnm.edu", &pass_hash(), &salt_hash())
            .unwrap_err();
        assert!(matches!(err, AppError::Range(_)));
    }

    #[test]
    fn credentials_never_serialize() {
        let json = serde_json::to_value(valid_profile()).unwrap();
        assert!(json.get("profileActivationToken").is_none());
        assert!(json.get("profilePassHash").is_none());
        assert!(json.get("profileSaltHash").is_none());
        assert_eq!(json["profileAtHandle"], "kkristl");
        assert_eq!(json["profileEmail"], "kkristl@cnm.edu");
    }
}
