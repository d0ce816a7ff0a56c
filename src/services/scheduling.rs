//! Slot availability and timezone handling for the booking flow.
//!
//! Businesses operate on US Eastern civil time. Appointment instants are
//! stored in UTC; the civil-to-UTC conversion uses a month-based offset
//! approximation (March through November is treated as EDT, the rest as
//! EST). That is knowingly wrong during the DST transition weeks and is
//! kept as-is: it matches how existing data was written.

use anyhow::anyhow;
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::Serialize;

use crate::models::Booking;

/// The bookable menu: 30-minute slots from 9:00 AM through 4:30 PM,
/// with the 12:00/12:30 lunch slots simply omitted.
pub const SLOT_MENU: &[(u32, u32)] = &[
    (9, 0),
    (9, 30),
    (10, 0),
    (10, 30),
    (11, 0),
    (11, 30),
    (13, 0),
    (13, 30),
    (14, 0),
    (14, 30),
    (15, 0),
    (15, 30),
    (16, 0),
    (16, 30),
];

const EDT_SECS: i32 = 4 * 3600;
const EST_SECS: i32 = 5 * 3600;

/// Fixed Eastern offset for a civil date. EDT for March..=November,
/// EST otherwise.
pub fn eastern_offset(date: NaiveDate) -> FixedOffset {
    let secs = if (3..=11).contains(&date.month()) {
        EDT_SECS
    } else {
        EST_SECS
    };
    FixedOffset::west_opt(secs).unwrap_or_else(|| FixedOffset::west_opt(0).unwrap())
}

/// Parse a client-assembled civil string (`YYYY-MM-DDTHH:MM:SS`, no zone).
pub fn parse_civil(civil: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(civil, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| anyhow!("invalid appointment time {civil:?}: {e}"))
}

/// Normalize an Eastern civil time to a UTC timestamp using the offset
/// heuristic.
pub fn local_to_utc(local: NaiveDateTime) -> NaiveDateTime {
    let offset = eastern_offset(local.date());
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.naive_utc())
        .unwrap_or(local)
}

pub fn civil_to_utc(civil: &str) -> anyhow::Result<NaiveDateTime> {
    Ok(local_to_utc(parse_civil(civil)?))
}

/// UTC window covering one Eastern civil day, start-of-day to
/// end-of-day inclusive.
pub fn day_window_utc(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let offset = eastern_offset(date);
    let start = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    let end = date.and_hms_opt(23, 59, 59).unwrap_or_default();

    let to_utc = |local: NaiveDateTime| {
        offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| dt.naive_utc())
            .unwrap_or(local)
    };
    (to_utc(start), to_utc(end))
}

fn booking_local(booking: &Booking, offset: FixedOffset) -> NaiveDateTime {
    booking.appointment_at + chrono::Duration::seconds(i64::from(offset.local_minus_utc()))
}

/// Whether a candidate slot on `date` collides with any booking in the
/// fetched set. Equality is minute-exact on local date, hour, and minute:
/// a 60-minute service at 9:00 does NOT block a 9:30 candidate. This is
/// the product's conflict model, not an oversight.
pub fn slot_taken(bookings: &[Booking], date: NaiveDate, hour: u32, minute: u32) -> bool {
    let offset = eastern_offset(date);

    bookings.iter().any(|b| {
        if !b.status.is_active() {
            return false;
        }
        let local = booking_local(b, offset);
        local.date() == date && local.hour() == hour && local.minute() == minute
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    pub time: String,
    pub booked: bool,
}

/// Per-slot availability for the fixed menu on one civil day. The caller
/// supplies the day's bookings (already filtered to the UTC window).
pub fn slot_availability(bookings: &[Booking], date: NaiveDate) -> Vec<SlotAvailability> {
    SLOT_MENU
        .iter()
        .map(|&(hour, minute)| SlotAvailability {
            time: format!("{hour:02}:{minute:02}"),
            booked: slot_taken(bookings, date, hour, minute),
        })
        .collect()
}
