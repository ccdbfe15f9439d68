// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every state-changing handler follows the same shape: load a snapshot
//! from the repository, apply one core command, persist the single change
//! it produced, record the audit event, then notify.

use kitloan::{Change, Command, State, TransitionResult, apply};
use kitloan_audit::{Actor, AuditEvent, Cause};
use kitloan_domain::{
    Booking, BookingBoard, BookingDraft, BookingId, BookingType, CustomerDetails, Kit,
    KitAvailability, KitConflict, KitId, LifecycleAction, compute_availability, overdue,
    parse_iso_date, search_bookings, search_kits, unavailable_selection,
    validate_booking_with_roster,
};
use kitloan_persistence::{Repository, StoreSource, Stored};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{AvailabilityPolicy, RegisterConfig};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::notify::{BookingNotice, Notifier};
use crate::request_response::{
    AvailabilityRequest, AvailabilityResponse, BookingBoardResponse, BookingStatusResponse,
    CreateBookingRequest, CreateBookingResponse, DeleteKitResponse, KitAvailabilityRow,
    KitRequest, KitResponse, ListKitsResponse,
};

/// The result of an API operation that includes both the response and the audit event.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The audit event generated by this operation.
    pub audit_event: AuditEvent,
}

/// Reports the weaker of two sources: any local read taints the answer.
const fn combine_sources(a: StoreSource, b: StoreSource) -> StoreSource {
    match (a, b) {
        (StoreSource::Database, StoreSource::Database) => StoreSource::Database,
        _ => StoreSource::LocalCache,
    }
}

fn load_state<R>(repo: &mut R) -> Result<(State, StoreSource), ApiError>
where
    R: Repository + ?Sized,
{
    let kits: Stored<Vec<Kit>> = repo.list_kits().map_err(translate_persistence_error)?;
    let bookings: Stored<Vec<Booking>> =
        repo.list_bookings().map_err(translate_persistence_error)?;
    let source: StoreSource = combine_sources(kits.source, bookings.source);

    debug!(
        kits = kits.value.len(),
        bookings = bookings.value.len(),
        %source,
        "Loaded register snapshot"
    );

    Ok((State::from_parts(kits.value, bookings.value), source))
}

fn parse_required_date(value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(translate_domain_error)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_required_date)
        .transpose()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Writes the single change a transition made.
fn persist_change<R>(repo: &mut R, change: &Change) -> Result<StoreSource, ApiError>
where
    R: Repository + ?Sized,
{
    let stored: Stored<()> = match change {
        Change::BookingCreated(booking) => repo.create_booking(booking),
        Change::BookingStatusChanged { booking_id, to, .. } => {
            repo.set_booking_status(booking_id, *to)
        }
        Change::KitCreated(kit) => repo.create_kit(kit),
        Change::KitUpdated(kit) => repo.update_kit(kit),
        Change::KitDeleted(kit_id) => repo.delete_kit(kit_id),
    }
    .map_err(translate_persistence_error)?;

    Ok(stored.source)
}

/// Appends the audit event. The change is already stored, so a failure
/// here is logged rather than reported.
fn record_audit<R>(repo: &mut R, event: &AuditEvent)
where
    R: Repository + ?Sized,
{
    if let Err(e) = repo.record_audit_event(event) {
        warn!(
            action = %event.action.name,
            subject = %event.subject,
            error = %e,
            "Failed to record audit event"
        );
    }
}

/// Parses the raw request into a draft.
///
/// An `IMMEDIATE` booking given no date out starts on `today`.
fn into_draft(request: CreateBookingRequest, today: Date) -> Result<BookingDraft, ApiError> {
    let booking_type: BookingType = request
        .booking_type
        .parse()
        .map_err(translate_domain_error)?;
    let date_out: Option<Date> = match parse_optional_date(request.date_out.as_deref())? {
        None if booking_type == BookingType::Immediate => Some(today),
        parsed => parsed,
    };

    Ok(BookingDraft {
        booking_type,
        date_out,
        date_return: parse_optional_date(request.date_return.as_deref())?,
        sales_person: request.sales_person,
        customer: CustomerDetails::new(
            &request.organization,
            &request.contact_name,
            &request.email,
            &request.phone,
        ),
        kit_ids: request
            .kit_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .map(KitId::new)
            .collect(),
        extra_samples: request.extra_samples,
        notes: request.notes,
    })
}

/// Checks which kits are free for a date window.
///
/// # Arguments
///
/// * `repo` - The repository to read from
/// * `request` - The window and optional catalog filter
///
/// # Errors
///
/// Returns an error if:
/// - Either date cannot be parsed
/// - The repository cannot be read
pub fn check_availability<R>(
    repo: &mut R,
    request: &AvailabilityRequest,
) -> Result<AvailabilityResponse, ApiError>
where
    R: Repository + ?Sized,
{
    let date_out: Date = parse_required_date(&request.date_out)?;
    let date_return: Date = parse_required_date(&request.date_return)?;
    let (state, source) = load_state(repo)?;

    let availability: BTreeMap<KitId, KitAvailability> =
        compute_availability(&state.kits, &state.bookings, date_out, date_return);

    let mut listed: Vec<&Kit> = search_kits(&state.kits, request.query.as_deref().unwrap_or(""));
    listed.sort_by(|a, b| {
        a.kit_number
            .cmp(&b.kit_number)
            .then_with(|| a.id.cmp(&b.id))
    });

    let kits: Vec<KitAvailabilityRow> = listed
        .into_iter()
        .map(|kit| {
            let entry: Option<&KitAvailability> = availability.get(&kit.id);
            KitAvailabilityRow {
                kit_id: kit.id.clone(),
                kit_number: kit.kit_number.clone(),
                category: kit.category.clone(),
                description: kit.description.clone(),
                bay: kit.bay.clone(),
                sizes: kit.sizes.clone(),
                is_available: entry.is_none_or(|a| a.is_available),
                conflict_reason: entry.and_then(|a| a.conflict_reason.clone()),
            }
        })
        .collect();

    let available_count: usize = kits.iter().filter(|row| row.is_available).count();
    let unavailable_count: usize = kits.len() - available_count;

    debug!(
        %date_out,
        %date_return,
        available_count,
        unavailable_count,
        "Checked availability"
    );

    Ok(AvailabilityResponse {
        date_out: date_out.to_string(),
        date_return: date_return.to_string(),
        kits,
        available_count,
        unavailable_count,
        source,
    })
}

/// Records a new booking.
///
/// This function:
/// - Parses the request into a booking draft
/// - Validates the draft, checking the sales person against the roster
/// - Applies `CreateBooking` (validation, duplicate checks, initial status)
/// - Checks the selected kits against the availability policy
/// - Persists the booking and its audit event
/// - Sends a `CREATED` notice
///
/// # Arguments
///
/// * `repo` - The repository to read from and write to
/// * `notifier` - Receives the lifecycle notice
/// * `config` - Availability policy and sales roster
/// * `request` - The raw booking input
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The creation timestamp to record
///
/// # Errors
///
/// Returns an error if:
/// - The booking type or a date cannot be parsed
/// - The booking breaks any booking rule, including the roster (every message is reported)
/// - The policy is enforced and a selected kit is already held
/// - The repository fails
pub fn create_booking<R, N>(
    repo: &mut R,
    notifier: &N,
    config: &RegisterConfig,
    request: CreateBookingRequest,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<ApiResult<CreateBookingResponse>, ApiError>
where
    R: Repository + ?Sized,
    N: Notifier + ?Sized,
{
    let draft: BookingDraft = into_draft(request, now.date())?;
    validate_booking_with_roster(&draft, &config.sales_roster)
        .into_result()
        .map_err(translate_domain_error)?;
    let (state, _) = load_state(repo)?;

    let command: Command = Command::CreateBooking {
        booking_id: BookingId::new(&new_id()),
        created_at: now,
        draft,
    };
    let transition: TransitionResult =
        apply(&state, command, actor, cause).map_err(translate_core_error)?;

    let Change::BookingCreated(booking) = &transition.change else {
        return Err(ApiError::Internal {
            message: String::from("CreateBooking produced an unexpected change"),
        });
    };

    let availability: BTreeMap<KitId, KitAvailability> = compute_availability(
        &state.kits,
        &state.bookings,
        booking.date_out,
        booking.date_return,
    );
    let conflicts: Vec<KitConflict> = unavailable_selection(&booking.kit_ids, &availability);

    if !conflicts.is_empty() {
        match config.availability_policy {
            AvailabilityPolicy::Enforced => {
                info!(
                    conflicts = conflicts.len(),
                    "Rejecting booking with unavailable kits"
                );
                return Err(ApiError::KitsUnavailable { conflicts });
            }
            AvailabilityPolicy::Advisory => {
                for conflict in &conflicts {
                    warn!(
                        booking_id = %booking.id,
                        kit_id = %conflict.kit_id,
                        reason = %conflict.reason,
                        "Booking selects a kit that is already held"
                    );
                }
            }
        }
    }

    let source: StoreSource = persist_change(repo, &transition.change)?;
    record_audit(repo, &transition.audit_event);
    notifier.notify(&BookingNotice::new(
        LifecycleAction::Created,
        booking,
        &state.kits,
    ));

    info!(
        booking_id = %booking.id,
        status = %booking.status,
        organization = %booking.customer.organization,
        %source,
        "Booking recorded"
    );

    Ok(ApiResult {
        response: CreateBookingResponse {
            booking: booking.clone(),
            warnings: conflicts,
            source,
            message: format!(
                "Booked for '{}' from {} to {}",
                booking.customer.organization, booking.date_out, booking.date_return
            ),
        },
        audit_event: transition.audit_event,
    })
}

fn transition_booking<R, N>(
    repo: &mut R,
    notifier: &N,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<BookingStatusResponse>, ApiError>
where
    R: Repository + ?Sized,
    N: Notifier + ?Sized,
{
    let (state, _) = load_state(repo)?;
    let transition: TransitionResult =
        apply(&state, command, actor, cause).map_err(translate_core_error)?;

    let Change::BookingStatusChanged {
        booking_id,
        from,
        to,
    } = &transition.change
    else {
        return Err(ApiError::Internal {
            message: String::from("Status command produced an unexpected change"),
        });
    };

    let source: StoreSource = persist_change(repo, &transition.change)?;
    record_audit(repo, &transition.audit_event);

    if let (Some(action), Some(booking)) = (
        from.lifecycle_action(*to),
        transition.new_state.find_booking(booking_id),
    ) {
        notifier.notify(&BookingNotice::new(action, booking, &state.kits));
    }

    info!(%booking_id, %from, %to, %source, "Booking status changed");

    Ok(ApiResult {
        response: BookingStatusResponse {
            booking_id: booking_id.clone(),
            previous_status: *from,
            status: *to,
            source,
            message: format!("Booking '{booking_id}' is now {to}"),
        },
        audit_event: transition.audit_event,
    })
}

/// Marks a pending booking as collected.
///
/// # Errors
///
/// Returns an error if the booking does not exist, is not pending, or the
/// repository fails.
pub fn activate_booking<R, N>(
    repo: &mut R,
    notifier: &N,
    booking_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<BookingStatusResponse>, ApiError>
where
    R: Repository + ?Sized,
    N: Notifier + ?Sized,
{
    let command: Command = Command::ActivateBooking {
        booking_id: BookingId::new(booking_id.trim()),
    };
    transition_booking(repo, notifier, command, actor, cause)
}

/// Marks an active booking as returned, releasing its kits.
///
/// # Errors
///
/// Returns an error if the booking does not exist, is not active, or the
/// repository fails.
pub fn return_booking<R, N>(
    repo: &mut R,
    notifier: &N,
    booking_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<BookingStatusResponse>, ApiError>
where
    R: Repository + ?Sized,
    N: Notifier + ?Sized,
{
    let command: Command = Command::ReturnBooking {
        booking_id: BookingId::new(booking_id.trim()),
    };
    transition_booking(repo, notifier, command, actor, cause)
}

/// Builds the booking board as of `today`.
///
/// # Arguments
///
/// * `repo` - The repository to read bookings from
/// * `today` - The date overdue holds are measured against
/// * `query` - Optional free-text filter applied before the board is derived
///
/// # Errors
///
/// Returns an error if the repository cannot be read.
pub fn booking_board<R>(
    repo: &mut R,
    today: Date,
    query: Option<&str>,
) -> Result<BookingBoardResponse, ApiError>
where
    R: Repository + ?Sized,
{
    let bookings: Stored<Vec<Booking>> =
        repo.list_bookings().map_err(translate_persistence_error)?;
    let matching: Vec<Booking> = search_bookings(&bookings.value, query.unwrap_or_default());
    let board: BookingBoard = BookingBoard::derive(&matching);
    let late: Vec<BookingId> = overdue(&matching, today)
        .into_iter()
        .map(|b| b.id)
        .collect();

    debug!(
        query = query.unwrap_or_default(),
        matched = matching.len(),
        active = board.active_out.len(),
        pending = board.forward_queue.len(),
        returned = board.archive.len(),
        overdue = late.len(),
        "Derived booking board"
    );

    Ok(BookingBoardResponse {
        active_out: board.active_out,
        forward_queue: board.forward_queue,
        archive: board.archive,
        overdue: late,
        source: bookings.source,
    })
}

/// Lists the kit catalog, optionally filtered by a free-text query.
///
/// # Errors
///
/// Returns an error if the repository cannot be read.
pub fn list_kits<R>(repo: &mut R, query: Option<&str>) -> Result<ListKitsResponse, ApiError>
where
    R: Repository + ?Sized,
{
    let kits: Stored<Vec<Kit>> = repo.list_kits().map_err(translate_persistence_error)?;
    let matched: Vec<Kit> = search_kits(&kits.value, query.unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();

    Ok(ListKitsResponse {
        kits: matched,
        source: kits.source,
    })
}

fn kit_from_request(kit_id: KitId, request: &KitRequest) -> Kit {
    Kit::new(
        kit_id,
        request.kit_number.trim(),
        request.supplier.trim(),
        request.category.trim(),
        request.description.trim(),
        request.bay.trim(),
        request.sizes.trim(),
    )
}

fn apply_kit_command<R>(
    repo: &mut R,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<(TransitionResult, StoreSource, State), ApiError>
where
    R: Repository + ?Sized,
{
    let (state, _) = load_state(repo)?;
    let transition: TransitionResult =
        apply(&state, command, actor, cause).map_err(translate_core_error)?;
    let source: StoreSource = persist_change(repo, &transition.change)?;
    record_audit(repo, &transition.audit_event);
    Ok((transition, source, state))
}

/// Adds a kit to the catalog under a fresh id.
///
/// # Errors
///
/// Returns an error if the kit number is blank or the repository fails.
pub fn create_kit<R>(
    repo: &mut R,
    request: &KitRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<KitResponse>, ApiError>
where
    R: Repository + ?Sized,
{
    let kit: Kit = kit_from_request(KitId::new(&new_id()), request);
    let (transition, source, _) =
        apply_kit_command(repo, Command::CreateKit { kit: kit.clone() }, actor, cause)?;

    info!(kit_id = %kit.id, kit_number = %kit.kit_number, %source, "Kit added");

    Ok(ApiResult {
        response: KitResponse {
            message: format!("Added kit {}", kit.kit_number),
            kit,
            source,
        },
        audit_event: transition.audit_event,
    })
}

/// Replaces every field of a kit except its id.
///
/// # Errors
///
/// Returns an error if the kit does not exist, the kit number is blank, or
/// the repository fails.
pub fn update_kit<R>(
    repo: &mut R,
    kit_id: &str,
    request: &KitRequest,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<KitResponse>, ApiError>
where
    R: Repository + ?Sized,
{
    let kit: Kit = kit_from_request(KitId::new(kit_id.trim()), request);
    let (transition, source, _) =
        apply_kit_command(repo, Command::UpdateKit { kit: kit.clone() }, actor, cause)?;

    info!(kit_id = %kit.id, %source, "Kit updated");

    Ok(ApiResult {
        response: KitResponse {
            message: format!("Updated kit {}", kit.kit_number),
            kit,
            source,
        },
        audit_event: transition.audit_event,
    })
}

/// Removes a kit from the catalog.
///
/// Bookings referencing the kit keep the reference; the response says how
/// many there are.
///
/// # Errors
///
/// Returns an error if the kit does not exist or the repository fails.
pub fn delete_kit<R>(
    repo: &mut R,
    kit_id: &str,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<DeleteKitResponse>, ApiError>
where
    R: Repository + ?Sized,
{
    let kit_id: KitId = KitId::new(kit_id.trim());
    let (transition, source, state) = apply_kit_command(
        repo,
        Command::DeleteKit {
            kit_id: kit_id.clone(),
        },
        actor,
        cause,
    )?;

    let stale_references: usize = state
        .bookings
        .iter()
        .filter(|b| b.references_kit(&kit_id))
        .count();

    info!(%kit_id, stale_references, %source, "Kit removed");

    Ok(ApiResult {
        response: DeleteKitResponse {
            message: format!("Removed kit '{kit_id}'"),
            kit_id,
            stale_references,
            source,
        },
        audit_event: transition.audit_event,
    })
}
