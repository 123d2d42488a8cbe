//! User record and the typed inputs that create or modify one

use serde::{Deserialize, Serialize};

/// A user record
///
/// `id` is meant to identify a user uniquely, but nothing enforces it:
/// appending a record whose id is already taken leaves two records with the
/// same id, and lookups return the first one in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl User {
    /// Create a new user record
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Overwrite the fields present in `patch`, leaving the others untouched
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }

    /// The two records every fresh process starts with
    pub fn seed() -> Vec<User> {
        vec![
            User::new("1", "John Doe", "john.doe@example.com"),
            User::new("2", "Jane Doe", "jane.doe@example.com"),
        ]
    }
}

/// Input of the create operation, all fields required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<NewUser> for User {
    fn from(input: NewUser) -> Self {
        User {
            id: input.id,
            name: input.name,
            email: input.email,
        }
    }
}

/// Partial update of a user
///
/// `None` means "leave unchanged". There is no way to clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn new(name: Option<String>, email: Option<String>) -> Self {
        Self { name, email }
    }

    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order() {
        let seed = User::seed();

        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0], User::new("1", "John Doe", "john.doe@example.com"));
        assert_eq!(seed[1], User::new("2", "Jane Doe", "jane.doe@example.com"));
    }

    #[test]
    fn test_apply_name_only_keeps_email() {
        let mut user = User::new("1", "John Doe", "john.doe@example.com");

        user.apply(UserPatch::new(Some("Johnny".to_string()), None));

        assert_eq!(user.name, "Johnny");
        assert_eq!(user.email, "john.doe@example.com");
    }

    #[test]
    fn test_apply_empty_patch_is_noop() {
        let mut user = User::new("2", "Jane Doe", "jane.doe@example.com");
        let before = user.clone();

        let patch = UserPatch::default();
        assert!(patch.is_empty());
        user.apply(patch);

        assert_eq!(user, before);
    }

    #[test]
    fn test_patch_deserializes_missing_fields_as_none() {
        let patch: UserPatch = serde_json::from_str(r#"{"email":"jane@x.com"}"#).unwrap();

        assert_eq!(patch.name, None);
        assert_eq!(patch.email.as_deref(), Some("jane@x.com"));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_user_into_user() {
        let user: User = NewUser {
            id: "3".to_string(),
            name: "Jim".to_string(),
            email: "jim@example.com".to_string(),
        }
        .into();

        assert_eq!(user, User::new("3", "Jim", "jim@example.com"));
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"id": "3", "name": "Jim", "email": "jim@example.com"})
        );
    }
}
