use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display format of the dates kept in the audit block
pub const AUDIT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Audit block shown on every record
///
/// All four values are display strings. They are seeded when a record is
/// created and are not recomputed on save unless stamping is switched on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditInfo {
    pub created_by: String,
    pub created_date: String,
    pub updated_by: String,
    pub updated_date: String,
}

impl AuditInfo {
    /// Audit block for a record created by `user` at `now`
    pub fn seeded(user: &str, now: DateTime<Utc>) -> Self {
        let date = now.format(AUDIT_DATE_FORMAT).to_string();
        Self {
            created_by: user.to_string(),
            created_date: date.clone(),
            updated_by: user.to_string(),
            updated_date: date,
        }
    }

    /// Record a modification by `user` at `now`
    pub fn touch(&mut self, user: &str, now: DateTime<Utc>) {
        self.updated_by = user.to_string();
        self.updated_date = now.format(AUDIT_DATE_FORMAT).to_string();
    }
}
