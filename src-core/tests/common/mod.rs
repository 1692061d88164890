use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use lawnly_core::db::{self, DbPool};

/// Fresh on-disk database with migrations (and the default pricing rows)
/// applied. Keep the TempDir alive for the duration of the test.
pub fn setup_test_db() -> (tempfile::TempDir, Arc<DbPool>) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db::init(dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");
    (dir, pool)
}

pub fn seed_contractor(pool: &DbPool, user_id: &str, payouts_enabled: bool) -> String {
    use lawnly_core::schema::contractors;
    let mut conn = pool.get().unwrap();
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();

    diesel::insert_into(contractors::table)
        .values((
            contractors::id.eq(&id),
            contractors::user_id.eq(user_id),
            contractors::tier.eq("probation"),
            contractors::payment_account_ref.eq(Some(format!("acct_{}", id))),
            contractors::payouts_enabled.eq(payouts_enabled),
            contractors::average_rating.eq("0"),
            contractors::total_ratings_count.eq(0),
            contractors::is_active.eq(true),
            contractors::approval_status.eq("approved"),
            contractors::created_at.eq(now),
            contractors::updated_at.eq(now),
        ))
        .execute(&mut conn)
        .expect("Failed to seed contractor");
    id
}

pub fn seed_address(
    pool: &DbPool,
    user_id: &str,
    square_meters: Option<&str>,
    verification_status: &str,
) -> String {
    use lawnly_core::schema::addresses;
    let mut conn = pool.get().unwrap();
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();

    diesel::insert_into(addresses::table)
        .values((
            addresses::id.eq(&id),
            addresses::user_id.eq(user_id),
            addresses::street_line.eq("12 Meadow Lane"),
            addresses::square_meters.eq(square_meters),
            addresses::slope.eq("mild"),
            addresses::tier_count.eq(1),
            addresses::verification_status.eq(verification_status),
            addresses::created_at.eq(now),
            addresses::updated_at.eq(now),
        ))
        .execute(&mut conn)
        .expect("Failed to seed address");
    id
}

pub fn seed_booking(
    pool: &DbPool,
    user_id: &str,
    contractor_id: Option<&str>,
    address_id: &str,
    status: &str,
    updated_at: NaiveDateTime,
) -> String {
    use lawnly_core::schema::bookings;
    let mut conn = pool.get().unwrap();
    let id = Uuid::new_v4().to_string();

    diesel::insert_into(bookings::table)
        .values((
            bookings::id.eq(&id),
            bookings::user_id.eq(user_id),
            bookings::contractor_id.eq(contractor_id),
            bookings::address_id.eq(address_id),
            bookings::status.eq(status),
            bookings::scheduled_date.eq(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap()),
            bookings::grass_length.eq("medium"),
            bookings::clippings_removal.eq(false),
            bookings::total_price.eq("138.60"),
            bookings::payout_status.eq("pending"),
            bookings::created_at.eq(updated_at),
            bookings::updated_at.eq(updated_at),
        ))
        .execute(&mut conn)
        .expect("Failed to seed booking");
    id
}
