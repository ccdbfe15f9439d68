// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Counts the audit events recorded so far.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_audit_events(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(audit_events::table.count().get_result(conn)?)
}

/// Returns the action names of every recorded event, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or an action cannot be decoded.
pub fn list_audit_action_names(
    conn: &mut SqliteConnection,
) -> Result<Vec<String>, PersistenceError> {
    let actions: Vec<String> = audit_events::table
        .order(audit_events::event_id.asc())
        .select(audit_events::action_json)
        .load(conn)?;

    actions
        .iter()
        .map(|json| -> Result<String, PersistenceError> {
            let value: serde_json::Value = serde_json::from_str(json)?;
            Ok(value
                .get("name")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string())
        })
        .collect()
}
