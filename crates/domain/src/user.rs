//! User: a reporter identified by an external (Telegram) identity.

use serde::Deserialize;

use crate::id::UserId;
use crate::request::{Assignment, nullable_patch, push_if_set, required_nullable};

/// Table holding users.
pub const TABLE: &str = "t_user";

/// Columns of `t_user` that callers may write. `id` is assigned on insert and
/// immutable, so it is not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    Username,
    FirstName,
    LastName,
    TelegramUserId,
}

impl UserColumn {
    /// Column name in the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::TelegramUserId => "telegram_user_id",
        }
    }
}

/// Body of `POST /users`. Every key is required; `last_name` may be `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    #[serde(deserialize_with = "required_nullable")]
    pub last_name: Option<String>,
    pub telegram_user_id: i64,
}

impl NewUser {
    /// Column assignments in insert order, keyed by `id`.
    #[must_use]
    pub fn into_assignments(self, id: UserId) -> Vec<Assignment> {
        vec![
            Assignment::new("id", id),
            Assignment::new(UserColumn::Username.name(), self.username),
            Assignment::new(UserColumn::FirstName.name(), self.first_name),
            Assignment::new(UserColumn::LastName.name(), self.last_name),
            Assignment::new(UserColumn::TelegramUserId.name(), self.telegram_user_id),
        ]
    }
}

/// Body of `PUT /users/{id}`. Absent keys are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserChanges {
    pub username: Option<String>,
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_patch")]
    #[allow(clippy::option_option)]
    pub last_name: Option<Option<String>>,
    pub telegram_user_id: Option<i64>,
}

impl UserChanges {
    #[must_use]
    pub fn into_assignments(self) -> Vec<Assignment> {
        let mut out = Vec::new();
        push_if_set(&mut out, UserColumn::Username.name(), self.username);
        push_if_set(&mut out, UserColumn::FirstName.name(), self.first_name);
        push_if_set(&mut out, UserColumn::LastName.name(), self.last_name);
        push_if_set(
            &mut out,
            UserColumn::TelegramUserId.name(),
            self.telegram_user_id,
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::request::parse_body;
    use crate::value::Value;

    #[test]
    fn should_parse_complete_new_user() {
        let user: NewUser = parse_body(
            r#"{"telegram_user_id": 42, "username":"a","first_name":"A","last_name":"B"}"#,
        )
        .unwrap();
        assert_eq!(user.telegram_user_id, 42);
        assert_eq!(user.last_name.as_deref(), Some("B"));
    }

    #[test]
    fn should_accept_null_last_name() {
        let user: NewUser = parse_body(
            r#"{"telegram_user_id": 1, "username":"a","first_name":"A","last_name":null}"#,
        )
        .unwrap();
        assert!(user.last_name.is_none());
    }

    #[test]
    fn should_reject_new_user_when_last_name_key_missing() {
        let result: Result<NewUser, _> =
            parse_body(r#"{"telegram_user_id": 1, "username":"a","first_name":"A"}"#);
        assert!(matches!(result, Err(ValidationError::MalformedBody(_))));
    }

    #[test]
    fn should_reject_new_user_when_telegram_id_missing() {
        let result: Result<NewUser, _> =
            parse_body(r#"{"username":"a","first_name":"A","last_name":"B"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_keys_outside_allow_list() {
        let result: Result<UserChanges, _> = parse_body(r#"{"id": 5}"#);
        assert!(result.is_err());

        let result: Result<UserChanges, _> =
            parse_body(r#"{"username": "x", "is_admin = 1; --": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_only_assign_supplied_columns() {
        let changes: UserChanges = parse_body(r#"{"first_name": "Ann"}"#).unwrap();
        assert_eq!(
            changes.into_assignments(),
            vec![Assignment::new("first_name", "Ann")]
        );
    }

    #[test]
    fn should_distinguish_null_from_absent_last_name() {
        let cleared: UserChanges = parse_body(r#"{"last_name": null}"#).unwrap();
        assert_eq!(
            cleared.into_assignments(),
            vec![Assignment::new("last_name", Value::Null)]
        );

        let untouched: UserChanges = parse_body("{}").unwrap();
        assert!(untouched.into_assignments().is_empty());
    }

    #[test]
    fn should_assign_every_column_on_insert() {
        let user = NewUser {
            username: "u".to_string(),
            first_name: "F".to_string(),
            last_name: None,
            telegram_user_id: 7,
        };
        let columns: Vec<_> = user
            .into_assignments(UserId::from("u-1"))
            .into_iter()
            .map(|a| a.column)
            .collect();
        assert_eq!(
            columns,
            ["id", "username", "first_name", "last_name", "telegram_user_id"]
        );
    }
}
