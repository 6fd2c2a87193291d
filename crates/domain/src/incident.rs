//! Incident: a reported problem. Its status lives on its latest comment.

use serde::Deserialize;

use crate::id::{IncidentId, UserId};
use crate::request::{Assignment, push_if_set};

/// Table holding incidents.
pub const TABLE: &str = "t_incident";

/// Read-only join of each incident with its latest comment.
pub const VIEW: &str = "v_incident";

/// Writable columns of `t_incident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentColumn {
    ReportedBy,
    Description,
    Urgency,
    Impact,
}

impl IncidentColumn {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ReportedBy => "reported_by",
            Self::Description => "description",
            Self::Urgency => "urgency",
            Self::Impact => "impact",
        }
    }
}

/// Body of `POST /incidents`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewIncident {
    pub reported_by: UserId,
    pub description: String,
    pub urgency: String,
    pub impact: String,
}

impl NewIncident {
    #[must_use]
    pub fn into_assignments(self, id: IncidentId) -> Vec<Assignment> {
        vec![
            Assignment::new("id", id),
            Assignment::new(IncidentColumn::ReportedBy.name(), self.reported_by),
            Assignment::new(IncidentColumn::Description.name(), self.description),
            Assignment::new(IncidentColumn::Urgency.name(), self.urgency),
            Assignment::new(IncidentColumn::Impact.name(), self.impact),
        ]
    }
}

/// Body of `PUT /incidents/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncidentChanges {
    pub reported_by: Option<UserId>,
    pub description: Option<String>,
    pub urgency: Option<String>,
    pub impact: Option<String>,
}

impl IncidentChanges {
    #[must_use]
    pub fn into_assignments(self) -> Vec<Assignment> {
        let mut out = Vec::new();
        push_if_set(&mut out, IncidentColumn::ReportedBy.name(), self.reported_by);
        push_if_set(&mut out, IncidentColumn::Description.name(), self.description);
        push_if_set(&mut out, IncidentColumn::Urgency.name(), self.urgency);
        push_if_set(&mut out, IncidentColumn::Impact.name(), self.impact);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::parse_body;

    #[test]
    fn should_parse_new_incident() {
        let incident: NewIncident = parse_body(
            r#"{"reported_by": 3, "description": "printer on fire", "urgency": "High", "impact": "Low"}"#,
        )
        .unwrap();
        assert_eq!(incident.reported_by, UserId::from("3"));
        assert_eq!(incident.description, "printer on fire");
    }

    #[test]
    fn should_accept_uuid_reporter() {
        let incident: NewIncident = parse_body(
            r#"{"reported_by": "86224793-b505-4a3a-91e9-1dfbf08f51c0", "description": "d", "urgency": "High", "impact": "Low"}"#,
        )
        .unwrap();
        let assignments = incident.into_assignments(IncidentId::from("i-1"));
        assert_eq!(assignments[0], Assignment::new("id", "i-1"));
        assert_eq!(
            assignments[1],
            Assignment::new("reported_by", "86224793-b505-4a3a-91e9-1dfbf08f51c0")
        );
    }

    #[test]
    fn should_reject_new_incident_without_impact() {
        let result: Result<NewIncident, _> =
            parse_body(r#"{"reported_by": 3, "description": "d", "urgency": "High"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_reject_status_on_incident_row() {
        let result: Result<IncidentChanges, _> = parse_body(r#"{"incident_status": "Closed"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_build_assignments_in_column_order() {
        let changes: IncidentChanges =
            parse_body(r#"{"impact": "High", "description": "worse"}"#).unwrap();
        let columns: Vec<_> = changes
            .into_assignments()
            .into_iter()
            .map(|a| a.column)
            .collect();
        assert_eq!(columns, ["description", "impact"]);
    }
}
