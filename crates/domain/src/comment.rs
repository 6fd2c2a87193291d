//! Comment: a free-text note that doubles as an incident status transition.

use serde::Deserialize;

use crate::id::{CommentId, IncidentId, UserId};
use crate::request::{Assignment, push_if_set};

/// Table holding comments.
pub const TABLE: &str = "t_comment";

/// Status given to the comment created alongside every new incident.
pub const INITIAL_STATUS: &str = "Open";

/// Writable columns of `t_comment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentColumn {
    CreatedBy,
    IncidentId,
    IncidentStatus,
    Comment,
}

impl CommentColumn {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreatedBy => "created_by",
            Self::IncidentId => "incident_id",
            Self::IncidentStatus => "incident_status",
            Self::Comment => "comment",
        }
    }
}

/// Body of `POST /comments`.
///
/// `incident_status` is an open set ("Open", "In Progress", "Closed", ...);
/// the store does not constrain it either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewComment {
    pub created_by: UserId,
    pub incident_id: IncidentId,
    pub incident_status: String,
    pub comment: String,
}

impl NewComment {
    /// The comment recorded automatically when an incident is created.
    #[must_use]
    pub fn initial(reported_by: UserId, incident_id: IncidentId) -> Self {
        Self {
            created_by: reported_by,
            incident_id,
            incident_status: INITIAL_STATUS.to_string(),
            comment: String::new(),
        }
    }

    #[must_use]
    pub fn into_assignments(self, id: CommentId) -> Vec<Assignment> {
        vec![
            Assignment::new("id", id),
            Assignment::new(CommentColumn::CreatedBy.name(), self.created_by),
            Assignment::new(CommentColumn::IncidentId.name(), self.incident_id),
            Assignment::new(CommentColumn::IncidentStatus.name(), self.incident_status),
            Assignment::new(CommentColumn::Comment.name(), self.comment),
        ]
    }
}

/// Body of `PUT /comments/{creator_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentChanges {
    pub created_by: Option<UserId>,
    pub incident_id: Option<IncidentId>,
    pub incident_status: Option<String>,
    pub comment: Option<String>,
}

impl CommentChanges {
    #[must_use]
    pub fn into_assignments(self) -> Vec<Assignment> {
        let mut out = Vec::new();
        push_if_set(&mut out, CommentColumn::CreatedBy.name(), self.created_by);
        push_if_set(&mut out, CommentColumn::IncidentId.name(), self.incident_id);
        push_if_set(
            &mut out,
            CommentColumn::IncidentStatus.name(),
            self.incident_status,
        );
        push_if_set(&mut out, CommentColumn::Comment.name(), self.comment);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::parse_body;
    use crate::value::Value;

    #[test]
    fn should_open_initial_comment_with_empty_text() {
        let comment = NewComment::initial(UserId::from("u-4"), IncidentId::from("i-11"));
        assert_eq!(comment.incident_status, "Open");
        assert!(comment.comment.is_empty());
        assert_eq!(comment.created_by, UserId::from("u-4"));
        assert_eq!(comment.incident_id, IncidentId::from("i-11"));
    }

    #[test]
    fn should_accept_any_status_text() {
        let comment: NewComment = parse_body(
            r#"{"created_by": 1, "incident_id": 2, "incident_status": "Waiting on vendor", "comment": "ping"}"#,
        )
        .unwrap();
        assert_eq!(comment.incident_status, "Waiting on vendor");
    }

    #[test]
    fn should_reject_comment_without_text_key() {
        let result: Result<NewComment, _> =
            parse_body(r#"{"created_by": 1, "incident_id": 2, "incident_status": "Open"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_accept_admin_console_comment() {
        let comment: NewComment = parse_body(
            r#"{"incident_id": "42", "created_by": "86224793-b505-4a3a-91e9-1dfbf08f51c0", "incident_status": "In Progress", "comment": "on it"}"#,
        )
        .unwrap();
        assert_eq!(comment.incident_id, IncidentId::from("42"));
        assert_eq!(
            comment.created_by,
            UserId::from("86224793-b505-4a3a-91e9-1dfbf08f51c0")
        );
    }

    #[test]
    fn should_convert_ids_to_text_values() {
        let assignments = NewComment::initial(UserId::from("u-4"), IncidentId::from("i-11"))
            .into_assignments(CommentId::from("c-1"));
        assert_eq!(assignments[0].value, Value::Text("c-1".to_string()));
        assert_eq!(assignments[1].value, Value::Text("u-4".to_string()));
        assert_eq!(assignments[2].value, Value::Text("i-11".to_string()));
        assert_eq!(assignments[3].value, Value::Text("Open".to_string()));
    }
}
