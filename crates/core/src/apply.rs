// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Change, State, TransitionResult};
use kitloan_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot, Subject};
use kitloan_domain::{
    Booking, BookingDraft, BookingId, BookingStatus, DomainError, Kit, KitId, SalesPerson,
    validate_booking, validate_kit_fields,
};
use std::collections::HashSet;
use time::OffsetDateTime;

/// Applies a command to the current state, producing a new state and audit event.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, the change and one audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A booking draft fails validation (every violation is reported)
/// - A booking or kit id is already taken
/// - The referenced booking or kit does not exist
/// - The requested status transition is not permitted
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.name();
    let before: StateSnapshot = state.to_snapshot();

    let (new_state, change, details, subject) = match command {
        Command::CreateBooking {
            booking_id,
            created_at,
            draft,
        } => create_booking(state, booking_id, created_at, draft)?,
        Command::ActivateBooking { booking_id } => {
            change_status(state, &booking_id, BookingStatus::Active)?
        }
        Command::ReturnBooking { booking_id } => {
            change_status(state, &booking_id, BookingStatus::Returned)?
        }
        Command::CreateKit { kit } => create_kit(state, kit)?,
        Command::UpdateKit { kit } => update_kit(state, kit)?,
        Command::DeleteKit { kit_id } => delete_kit(state, &kit_id)?,
    };

    let after: StateSnapshot = new_state.to_snapshot();
    let action: Action = Action::new(String::from(action_name), Some(details));
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, subject, before, after);

    Ok(TransitionResult {
        new_state,
        change,
        audit_event,
    })
}

type Outcome = (State, Change, String, Subject);

fn create_booking(
    state: &State,
    booking_id: BookingId,
    created_at: OffsetDateTime,
    draft: BookingDraft,
) -> Result<Outcome, CoreError> {
    validate_booking(&draft).into_result()?;

    let (Some(date_out), Some(date_return)) = (draft.date_out, draft.date_return) else {
        return Err(DomainError::InvalidBooking(validate_booking(&draft).violations).into());
    };

    if state.find_booking(&booking_id).is_some() {
        return Err(DomainError::DuplicateBooking(booking_id.to_string()).into());
    }

    let mut seen: HashSet<KitId> = HashSet::new();
    let kit_ids: Vec<KitId> = draft
        .kit_ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let booking: Booking = Booking {
        id: booking_id.clone(),
        created_at,
        booking_type: draft.booking_type,
        status: BookingStatus::initial_for(draft.booking_type),
        date_out,
        date_return,
        sales_person: SalesPerson::new(&draft.sales_person)?,
        customer: draft.customer,
        kit_ids,
        extra_samples: draft.extra_samples,
        notes: draft.notes,
    };

    let details: String = format!(
        "Booked {} kit(s) for '{}' from {} to {} ({})",
        booking.kit_ids.len(),
        booking.customer.organization,
        booking.date_out,
        booking.date_return,
        booking.status
    );

    let mut new_state: State = state.clone();
    new_state.bookings.push(booking.clone());

    Ok((
        new_state,
        Change::BookingCreated(booking),
        details,
        Subject::Booking(booking_id),
    ))
}

fn change_status(
    state: &State,
    booking_id: &BookingId,
    target: BookingStatus,
) -> Result<Outcome, CoreError> {
    let current: BookingStatus = state
        .find_booking(booking_id)
        .map(|b| b.status)
        .ok_or_else(|| DomainError::BookingNotFound(booking_id.to_string()))?;

    current.validate_transition(target)?;

    let mut new_state: State = state.clone();
    for booking in new_state
        .bookings
        .iter_mut()
        .filter(|b| &b.id == booking_id)
    {
        booking.status = target;
    }

    Ok((
        new_state,
        Change::BookingStatusChanged {
            booking_id: booking_id.clone(),
            from: current,
            to: target,
        },
        format!("Booking moved from {current} to {target}"),
        Subject::Booking(booking_id.clone()),
    ))
}

fn create_kit(state: &State, kit: Kit) -> Result<Outcome, CoreError> {
    validate_kit_fields(&kit)?;

    if state.find_kit(&kit.id).is_some() {
        return Err(DomainError::DuplicateKit(kit.id.to_string()).into());
    }

    let details: String = format!("Added kit {} ({})", kit.kit_number, kit.category);
    let subject: Subject = Subject::Kit(kit.id.clone());

    let mut new_state: State = state.clone();
    new_state.kits.push(kit.clone());

    Ok((new_state, Change::KitCreated(kit), details, subject))
}

fn update_kit(state: &State, kit: Kit) -> Result<Outcome, CoreError> {
    validate_kit_fields(&kit)?;

    if state.find_kit(&kit.id).is_none() {
        return Err(DomainError::KitNotFound(kit.id.to_string()).into());
    }

    let details: String = format!("Updated kit {}", kit.kit_number);
    let subject: Subject = Subject::Kit(kit.id.clone());

    let mut new_state: State = state.clone();
    if let Some(slot) = new_state.kits.iter_mut().find(|k| k.id == kit.id) {
        *slot = kit.clone();
    }

    Ok((new_state, Change::KitUpdated(kit), details, subject))
}

fn delete_kit(state: &State, kit_id: &KitId) -> Result<Outcome, CoreError> {
    let kit: &Kit = state
        .find_kit(kit_id)
        .ok_or_else(|| DomainError::KitNotFound(kit_id.to_string()))?;

    let stale: usize = state
        .bookings
        .iter()
        .filter(|b| b.references_kit(kit_id))
        .count();
    let details: String = format!(
        "Removed kit {} ({stale} booking(s) keep a reference)",
        kit.kit_number
    );

    let mut new_state: State = state.clone();
    new_state.kits.retain(|k| &k.id != kit_id);

    Ok((
        new_state,
        Change::KitDeleted(kit_id.clone()),
        details,
        Subject::Kit(kit_id.clone()),
    ))
}
