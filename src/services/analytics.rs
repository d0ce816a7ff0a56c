use std::collections::HashSet;

use serde::Serialize;

use crate::models::{BookingDetail, BookingStatus, Review};

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_revenue_cents: i64,
    pub total_bookings: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    pub no_show_bookings: i64,
    pub unique_clients: i64,
    pub review_count: i64,
    pub average_rating: Option<f64>,
}

/// Aggregates computed by walking the full booking set fetched for the
/// dashboard; there is no separate rollup path or cache. Revenue counts
/// non-cancelled bookings at the service's current price.
pub fn summarize(bookings: &[BookingDetail], reviews: &[Review]) -> AnalyticsSummary {
    let mut total_revenue_cents = 0;
    let mut confirmed = 0;
    let mut completed = 0;
    let mut cancelled = 0;
    let mut no_show = 0;
    let mut clients: HashSet<String> = HashSet::new();

    for detail in bookings {
        match detail.booking.status {
            BookingStatus::Confirmed => confirmed += 1,
            BookingStatus::Completed => completed += 1,
            BookingStatus::Cancelled => cancelled += 1,
            BookingStatus::NoShow => no_show += 1,
        }

        if detail.booking.status.is_active() {
            total_revenue_cents += detail.service_price_cents;
        }

        // Client identity: id when present, phone as the fallback key.
        let key = if detail.booking.client_id.is_empty() {
            detail.client_phone.clone()
        } else {
            detail.booking.client_id.clone()
        };
        clients.insert(key);
    }

    let review_count = reviews.len() as i64;
    let average_rating = if reviews.is_empty() {
        None
    } else {
        let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
        Some(sum as f64 / review_count as f64)
    };

    AnalyticsSummary {
        total_revenue_cents,
        total_bookings: bookings.len() as i64,
        confirmed_bookings: confirmed,
        completed_bookings: completed,
        cancelled_bookings: cancelled,
        no_show_bookings: no_show,
        unique_clients: clients.len() as i64,
        review_count,
        average_rating,
    }
}
