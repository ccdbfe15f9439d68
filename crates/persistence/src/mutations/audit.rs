// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use kitloan_audit::AuditEvent;

/// Appends an audit event.
///
/// # Errors
///
/// Returns an error if the event cannot be serialized or inserted.
pub fn insert_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<(), PersistenceError> {
    let subject_json: String = serde_json::to_string(&event.subject)?;
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::subject_json.eq(&subject_json),
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot.eq(&event.before.data),
            audit_events::after_snapshot.eq(&event.after.data),
        ))
        .execute(conn)?;

    debug!(action = %event.action.name, subject = %event.subject, "Recorded audit event");
    Ok(())
}
