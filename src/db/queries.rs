use anyhow::anyhow;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::models::{
    Booking, BookingDetail, BookingStatus, Business, BusinessStatus, Client, ClientCustomization,
    Integration, Notification, Review, Service, TeamMember, User,
};

const DT_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn fmt_dt(dt: &NaiveDateTime) -> String {
    dt.format(DT_FMT).to_string()
}

fn parse_dt(s: &str) -> anyhow::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DT_FMT).map_err(|e| anyhow!("bad timestamp {s:?}: {e}"))
}

// ── Users & Sessions ──

pub fn create_user(conn: &Connection, user: &User) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO users (id, email, password_digest, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            user.id,
            user.email,
            user.password_digest,
            fmt_dt(&user.created_at)
        ],
    )?;
    Ok(())
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> anyhow::Result<Option<User>> {
    let result = conn.query_row(
        "SELECT id, email, password_digest, created_at FROM users WHERE email = ?1",
        params![email],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    );

    match result {
        Ok((id, email, password_digest, created_at)) => Ok(Some(User {
            id,
            email,
            password_digest,
            created_at: parse_dt(&created_at)?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn create_session(conn: &Connection, token: &str, user_id: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO sessions (token, user_id) VALUES (?1, ?2)",
        params![token, user_id],
    )?;
    Ok(())
}

pub fn get_session_user_id(conn: &Connection, token: &str) -> anyhow::Result<Option<String>> {
    let result = conn.query_row(
        "SELECT user_id FROM sessions WHERE token = ?1",
        params![token],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(user_id) => Ok(Some(user_id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn delete_session(conn: &Connection, token: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(count > 0)
}

// ── Businesses ──

const BUSINESS_COLS: &str = "id, user_id, slug, name, business_type, phone, email, address, description, status, created_at, updated_at";

fn parse_business_row(row: &rusqlite::Row) -> anyhow::Result<Business> {
    let status_str: String = row.get(9)?;
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;

    Ok(Business {
        id: row.get(0)?,
        user_id: row.get(1)?,
        slug: row.get(2)?,
        name: row.get(3)?,
        business_type: row.get(4)?,
        phone: row.get(5)?,
        email: row.get(6)?,
        address: row.get(7)?,
        description: row.get(8)?,
        status: BusinessStatus::parse(&status_str)
            .ok_or_else(|| anyhow!("invalid business status: {status_str}"))?,
        created_at: parse_dt(&created_at)?,
        updated_at: parse_dt(&updated_at)?,
    })
}

pub fn create_business(conn: &Connection, business: &Business) -> anyhow::Result<()> {
    conn.execute(
        &format!("INSERT INTO businesses ({BUSINESS_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"),
        params![
            business.id,
            business.user_id,
            business.slug,
            business.name,
            business.business_type,
            business.phone,
            business.email,
            business.address,
            business.description,
            business.status.as_str(),
            fmt_dt(&business.created_at),
            fmt_dt(&business.updated_at),
        ],
    )?;
    Ok(())
}

pub fn slug_exists(conn: &Connection, slug: &str) -> anyhow::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM businesses WHERE slug = ?1",
        params![slug],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn business_by(conn: &Connection, where_clause: &str, key: &str) -> anyhow::Result<Option<Business>> {
    let sql = format!("SELECT {BUSINESS_COLS} FROM businesses WHERE {where_clause}");
    let result = conn.query_row(&sql, params![key], |row| Ok(parse_business_row(row)));

    match result {
        Ok(business) => Ok(Some(business?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_business_by_slug(conn: &Connection, slug: &str) -> anyhow::Result<Option<Business>> {
    business_by(conn, "slug = ?1", slug)
}

pub fn get_business_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Business>> {
    business_by(conn, "id = ?1", id)
}

pub fn get_business_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Option<Business>> {
    business_by(conn, "user_id = ?1", user_id)
}

pub fn list_businesses(conn: &Connection) -> anyhow::Result<Vec<Business>> {
    let sql = format!("SELECT {BUSINESS_COLS} FROM businesses ORDER BY created_at DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| Ok(parse_business_row(row)))?;

    let mut businesses = vec![];
    for row in rows {
        businesses.push(row??);
    }
    Ok(businesses)
}

pub fn update_business_status(
    conn: &Connection,
    id: &str,
    status: BusinessStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE businesses SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

// ── Services ──

const SERVICE_COLS: &str = "id, business_id, name, description, price_cents, duration_minutes, image_url, is_active, created_at, updated_at";

fn parse_service_row(row: &rusqlite::Row) -> anyhow::Result<Service> {
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(Service {
        id: row.get(0)?,
        business_id: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        price_cents: row.get(4)?,
        duration_minutes: row.get(5)?,
        image_url: row.get(6)?,
        is_active: row.get::<_, i64>(7)? != 0,
        created_at: parse_dt(&created_at)?,
        updated_at: parse_dt(&updated_at)?,
    })
}

pub fn create_service(conn: &Connection, service: &Service) -> anyhow::Result<()> {
    conn.execute(
        &format!("INSERT INTO services ({SERVICE_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
        params![
            service.id,
            service.business_id,
            service.name,
            service.description,
            service.price_cents,
            service.duration_minutes,
            service.image_url,
            service.is_active as i64,
            fmt_dt(&service.created_at),
            fmt_dt(&service.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_services_by_business_id(
    conn: &Connection,
    business_id: &str,
    include_inactive: bool,
) -> anyhow::Result<Vec<Service>> {
    let sql = if include_inactive {
        format!("SELECT {SERVICE_COLS} FROM services WHERE business_id = ?1 ORDER BY created_at ASC")
    } else {
        format!("SELECT {SERVICE_COLS} FROM services WHERE business_id = ?1 AND is_active = 1 ORDER BY created_at ASC")
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![business_id], |row| Ok(parse_service_row(row)))?;

    let mut services = vec![];
    for row in rows {
        services.push(row??);
    }
    Ok(services)
}

pub fn get_service(conn: &Connection, id: &str) -> anyhow::Result<Option<Service>> {
    let sql = format!("SELECT {SERVICE_COLS} FROM services WHERE id = ?1");
    let result = conn.query_row(&sql, params![id], |row| Ok(parse_service_row(row)));

    match result {
        Ok(service) => Ok(Some(service?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_service(
    conn: &Connection,
    id: &str,
    name: &str,
    description: Option<&str>,
    price_cents: i64,
    duration_minutes: i32,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE services SET name = ?1, description = ?2, price_cents = ?3,
         duration_minutes = ?4, updated_at = datetime('now') WHERE id = ?5",
        params![name, description, price_cents, duration_minutes, id],
    )?;
    Ok(count > 0)
}

pub fn set_service_image(conn: &Connection, id: &str, image_url: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE services SET image_url = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![image_url, id],
    )?;
    Ok(count > 0)
}

pub fn deactivate_service(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE services SET is_active = 0, updated_at = datetime('now') WHERE id = ?1",
        params![id],
    )?;
    Ok(count > 0)
}

// ── Clients ──

const CLIENT_COLS: &str = "id, business_id, first_name, last_name, phone, email, created_at";

fn parse_client_row(row: &rusqlite::Row) -> anyhow::Result<Client> {
    let created_at: String = row.get(6)?;

    Ok(Client {
        id: row.get(0)?,
        business_id: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
        created_at: parse_dt(&created_at)?,
    })
}

pub fn create_client(conn: &Connection, client: &Client) -> anyhow::Result<()> {
    conn.execute(
        &format!("INSERT INTO clients ({CLIENT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
        params![
            client.id,
            client.business_id,
            client.first_name,
            client.last_name,
            client.phone,
            client.email,
            fmt_dt(&client.created_at),
        ],
    )?;
    Ok(())
}

/// First match wins; ordered by creation so repeat bookings keep
/// attaching to the original record.
pub fn find_client_by_phone(
    conn: &Connection,
    business_id: &str,
    phone: &str,
) -> anyhow::Result<Option<Client>> {
    let sql = format!(
        "SELECT {CLIENT_COLS} FROM clients WHERE business_id = ?1 AND phone = ?2
         ORDER BY created_at ASC LIMIT 1"
    );
    let result = conn.query_row(&sql, params![business_id, phone], |row| {
        Ok(parse_client_row(row))
    });

    match result {
        Ok(client) => Ok(Some(client?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_clients(conn: &Connection, business_id: &str) -> anyhow::Result<Vec<Client>> {
    let sql =
        format!("SELECT {CLIENT_COLS} FROM clients WHERE business_id = ?1 ORDER BY created_at DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![business_id], |row| Ok(parse_client_row(row)))?;

    let mut clients = vec![];
    for row in rows {
        clients.push(row??);
    }
    Ok(clients)
}

// ── Bookings ──

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let appointment_at: String = row.get(4)?;
    let status_str: String = row.get(5)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(Booking {
        id: row.get(0)?,
        business_id: row.get(1)?,
        service_id: row.get(2)?,
        client_id: row.get(3)?,
        appointment_at: parse_dt(&appointment_at)?,
        status: BookingStatus::parse(&status_str)
            .ok_or_else(|| anyhow!("invalid booking status: {status_str}"))?,
        notes: row.get(6)?,
        created_at: parse_dt(&created_at)?,
        updated_at: parse_dt(&updated_at)?,
    })
}

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, business_id, service_id, client_id, appointment_at, status, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            booking.id,
            booking.business_id,
            booking.service_id,
            booking.client_id,
            fmt_dt(&booking.appointment_at),
            booking.status.as_str(),
            booking.notes,
            fmt_dt(&booking.created_at),
            fmt_dt(&booking.updated_at),
        ],
    )?;
    Ok(())
}

pub fn get_booking(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, business_id, service_id, client_id, appointment_at, status, notes, created_at, updated_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Active (non-cancelled) bookings inside a UTC window, used by the
/// availability scan and the pre-insert conflict re-check.
pub fn get_active_bookings_in_range(
    conn: &Connection,
    business_id: &str,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, service_id, client_id, appointment_at, status, notes, created_at, updated_at
         FROM bookings
         WHERE business_id = ?1 AND appointment_at >= ?2 AND appointment_at <= ?3 AND status != 'cancelled'
         ORDER BY appointment_at ASC",
    )?;

    let rows = stmt.query_map(params![business_id, fmt_dt(start), fmt_dt(end)], |row| {
        Ok(parse_booking_row(row))
    })?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

fn parse_booking_detail_row(row: &rusqlite::Row) -> anyhow::Result<BookingDetail> {
    Ok(BookingDetail {
        booking: parse_booking_row(row)?,
        service_name: row.get(9)?,
        service_price_cents: row.get(10)?,
        service_duration_minutes: row.get(11)?,
        client_first_name: row.get(12)?,
        client_last_name: row.get(13)?,
        client_phone: row.get(14)?,
    })
}

/// The join deliberately ignores `services.is_active` so bookings against
/// soft-deleted services keep their original display data.
pub fn get_bookings_for_business(
    conn: &Connection,
    business_id: &str,
) -> anyhow::Result<Vec<BookingDetail>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.business_id, b.service_id, b.client_id, b.appointment_at, b.status, b.notes, b.created_at, b.updated_at,
                s.name, s.price_cents, s.duration_minutes,
                c.first_name, c.last_name, c.phone
         FROM bookings b
         JOIN services s ON s.id = b.service_id
         JOIN clients c ON c.id = b.client_id
         WHERE b.business_id = ?1
         ORDER BY b.appointment_at DESC",
    )?;

    let rows = stmt.query_map(params![business_id], |row| Ok(parse_booking_detail_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

// ── Reviews ──

pub fn create_review(conn: &Connection, review: &Review) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO reviews (id, business_id, client_name, rating, comment, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            review.id,
            review.business_id,
            review.client_name,
            review.rating,
            review.comment,
            fmt_dt(&review.created_at),
        ],
    )?;
    Ok(())
}

pub fn list_reviews(conn: &Connection, business_id: &str) -> anyhow::Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, client_name, rating, comment, created_at
         FROM reviews WHERE business_id = ?1 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![business_id], |row| {
        let created_at: String = row.get(5)?;
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i32>(3)?,
            row.get::<_, Option<String>>(4)?,
            created_at,
        ))
    })?;

    let mut reviews = vec![];
    for row in rows {
        let (id, business_id, client_name, rating, comment, created_at) = row?;
        reviews.push(Review {
            id,
            business_id,
            client_name,
            rating,
            comment,
            created_at: parse_dt(&created_at)?,
        });
    }
    Ok(reviews)
}

pub fn delete_review(conn: &Connection, id: &str, business_id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "DELETE FROM reviews WHERE id = ?1 AND business_id = ?2",
        params![id, business_id],
    )?;
    Ok(count > 0)
}

// ── Team ──

pub fn create_team_member(conn: &Connection, member: &TeamMember) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO team_members (id, business_id, name, role, email, is_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            member.id,
            member.business_id,
            member.name,
            member.role,
            member.email,
            member.is_active as i64,
            fmt_dt(&member.created_at),
        ],
    )?;
    Ok(())
}

pub fn list_team_members(conn: &Connection, business_id: &str) -> anyhow::Result<Vec<TeamMember>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, name, role, email, is_active, created_at
         FROM team_members WHERE business_id = ?1 AND is_active = 1 ORDER BY created_at ASC",
    )?;

    let rows = stmt.query_map(params![business_id], |row| {
        let created_at: String = row.get(6)?;
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, i64>(5)?,
            created_at,
        ))
    })?;

    let mut members = vec![];
    for row in rows {
        let (id, business_id, name, role, email, is_active, created_at) = row?;
        members.push(TeamMember {
            id,
            business_id,
            name,
            role,
            email,
            is_active: is_active != 0,
            created_at: parse_dt(&created_at)?,
        });
    }
    Ok(members)
}

pub fn deactivate_team_member(
    conn: &Connection,
    id: &str,
    business_id: &str,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE team_members SET is_active = 0 WHERE id = ?1 AND business_id = ?2",
        params![id, business_id],
    )?;
    Ok(count > 0)
}

// ── Integrations ──

pub fn connect_integration(
    conn: &Connection,
    business_id: &str,
    provider: &str,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO integrations (id, business_id, provider, connected)
         VALUES (?1, ?2, ?3, 1)
         ON CONFLICT(business_id, provider) DO UPDATE SET
           connected = 1, updated_at = datetime('now')",
        params![uuid::Uuid::new_v4().to_string(), business_id, provider],
    )?;
    Ok(())
}

pub fn disconnect_integration(
    conn: &Connection,
    business_id: &str,
    provider: &str,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE integrations SET connected = 0, updated_at = datetime('now')
         WHERE business_id = ?1 AND provider = ?2",
        params![business_id, provider],
    )?;
    Ok(count > 0)
}

pub fn list_integrations(conn: &Connection, business_id: &str) -> anyhow::Result<Vec<Integration>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, provider, connected, created_at, updated_at
         FROM integrations WHERE business_id = ?1 ORDER BY provider ASC",
    )?;

    let rows = stmt.query_map(params![business_id], |row| {
        let created_at: String = row.get(4)?;
        let updated_at: String = row.get(5)?;
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)?,
            created_at,
            updated_at,
        ))
    })?;

    let mut integrations = vec![];
    for row in rows {
        let (id, business_id, provider, connected, created_at, updated_at) = row?;
        integrations.push(Integration {
            id,
            business_id,
            provider,
            connected: connected != 0,
            created_at: parse_dt(&created_at)?,
            updated_at: parse_dt(&updated_at)?,
        });
    }
    Ok(integrations)
}

// ── Client Customization ──

pub fn get_customization(
    conn: &Connection,
    business_id: &str,
) -> anyhow::Result<Option<ClientCustomization>> {
    let result = conn.query_row(
        "SELECT business_id, primary_color, accent_color, show_services, show_reviews, show_team, welcome_message
         FROM client_customizations WHERE business_id = ?1",
        params![business_id],
        |row| {
            Ok(ClientCustomization {
                business_id: row.get(0)?,
                primary_color: row.get(1)?,
                accent_color: row.get(2)?,
                show_services: row.get::<_, i64>(3)? != 0,
                show_reviews: row.get::<_, i64>(4)? != 0,
                show_team: row.get::<_, i64>(5)? != 0,
                welcome_message: row.get(6)?,
            })
        },
    );

    match result {
        Ok(customization) => Ok(Some(customization)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn upsert_customization(
    conn: &Connection,
    customization: &ClientCustomization,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO client_customizations
           (business_id, primary_color, accent_color, show_services, show_reviews, show_team, welcome_message)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(business_id) DO UPDATE SET
           primary_color = excluded.primary_color,
           accent_color = excluded.accent_color,
           show_services = excluded.show_services,
           show_reviews = excluded.show_reviews,
           show_team = excluded.show_team,
           welcome_message = excluded.welcome_message",
        params![
            customization.business_id,
            customization.primary_color,
            customization.accent_color,
            customization.show_services as i64,
            customization.show_reviews as i64,
            customization.show_team as i64,
            customization.welcome_message,
        ],
    )?;
    Ok(())
}

// ── Notifications ──

pub fn create_notification(
    conn: &Connection,
    business_id: &str,
    kind: &str,
    message: &str,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO notifications (id, business_id, kind, message)
         VALUES (?1, ?2, ?3, ?4)",
        params![uuid::Uuid::new_v4().to_string(), business_id, kind, message],
    )?;
    Ok(())
}

pub fn list_notifications(
    conn: &Connection,
    business_id: &str,
    limit: i64,
) -> anyhow::Result<Vec<Notification>> {
    let mut stmt = conn.prepare(
        "SELECT id, business_id, kind, message, is_read, created_at
         FROM notifications WHERE business_id = ?1 ORDER BY created_at DESC LIMIT ?2",
    )?;

    let rows = stmt.query_map(params![business_id, limit], |row| {
        let created_at: String = row.get(5)?;
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, i64>(4)?,
            created_at,
        ))
    })?;

    let mut notifications = vec![];
    for row in rows {
        let (id, business_id, kind, message, is_read, created_at) = row?;
        notifications.push(Notification {
            id,
            business_id,
            kind,
            message,
            is_read: is_read != 0,
            created_at: parse_dt(&created_at)?,
        });
    }
    Ok(notifications)
}

pub fn mark_notification_read(
    conn: &Connection,
    id: &str,
    business_id: &str,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE notifications SET is_read = 1 WHERE id = ?1 AND business_id = ?2",
        params![id, business_id],
    )?;
    Ok(count > 0)
}
