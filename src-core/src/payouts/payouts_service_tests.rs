use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::bookings::{
    Booking, BookingRepositoryTrait, BookingStatus, GrassLength, NewBookingRequest, PayoutClaim,
    PayoutStatus,
};
use crate::contractors::{
    ApprovalStatus, Contractor, ContractorRepositoryTrait, Tier,
};
use crate::errors::{Error, Result};
use crate::payouts::payouts_model::{PaymentAccountEvent, PaymentAccountStatus};
use crate::payouts::payouts_service::PayoutService;
use crate::payouts::payouts_traits::{PaymentProviderTrait, PayoutServiceTrait};
use crate::payouts::PayoutError;

// --- Mock BookingRepository ---
struct MockBookingRepository {
    bookings: Mutex<HashMap<String, Booking>>,
}

impl MockBookingRepository {
    fn new(bookings: Vec<Booking>) -> Self {
        MockBookingRepository {
            bookings: Mutex::new(
                bookings
                    .into_iter()
                    .map(|booking| (booking.id.clone(), booking))
                    .collect(),
            ),
        }
    }

    fn payout_state(&self, booking_id: &str) -> (PayoutStatus, Option<String>) {
        let bookings = self.bookings.lock().unwrap();
        let booking = bookings.get(booking_id).unwrap();
        (booking.payout_status, booking.payout_ref.clone())
    }
}

#[async_trait]
impl BookingRepositoryTrait for MockBookingRepository {
    fn get_booking(&self, booking_id: &str) -> Result<Booking> {
        self.bookings
            .lock()
            .unwrap()
            .get(booking_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Booking {} not found", booking_id)))
    }

    fn get_user_bookings(&self, _user_id: &str) -> Result<Vec<Booking>> {
        unimplemented!("not used in payout tests")
    }

    async fn create_booking(
        &self,
        _user_id: &str,
        _request: &NewBookingRequest,
        _total_price: Decimal,
    ) -> Result<Booking> {
        unimplemented!("not used in payout tests")
    }

    async fn transition_status(
        &self,
        _booking_id: &str,
        _from: BookingStatus,
        _to: BookingStatus,
    ) -> Result<Booking> {
        unimplemented!("not used in payout tests")
    }

    async fn set_contractor(&self, _booking_id: &str, _contractor_id: &str) -> Result<Booking> {
        unimplemented!("not used in payout tests")
    }

    async fn set_payment_intent(
        &self,
        _booking_id: &str,
        _payment_intent_ref: &str,
    ) -> Result<()> {
        unimplemented!("not used in payout tests")
    }

    fn completed_count_for_contractor(&self, _contractor_id: &str) -> Result<i64> {
        unimplemented!("not used in payout tests")
    }

    fn completed_booking_ids_for_contractor(&self, _contractor_id: &str) -> Result<Vec<String>> {
        unimplemented!("not used in payout tests")
    }

    fn platform_completed_count(&self) -> Result<i64> {
        unimplemented!("not used in payout tests")
    }

    fn unassigned_confirmed_before(&self, _cutoff: NaiveDateTime) -> Result<Vec<Booking>> {
        unimplemented!("not used in payout tests")
    }

    fn failed_payout_booking_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|booking| booking.payout_status == PayoutStatus::Failed)
            .map(|booking| booking.id.clone())
            .collect())
    }

    async fn claim_payout(&self, booking_id: &str) -> Result<PayoutClaim> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .get_mut(booking_id)
            .ok_or_else(|| Error::NotFound(format!("Booking {} not found", booking_id)))?;
        match booking.payout_status {
            PayoutStatus::Pending | PayoutStatus::Failed => {
                booking.payout_status = PayoutStatus::Processing;
                Ok(PayoutClaim::Claimed)
            }
            PayoutStatus::Released => Ok(PayoutClaim::AlreadyReleased(booking.payout_ref.clone())),
            PayoutStatus::Processing => Ok(PayoutClaim::InFlight),
        }
    }

    async fn mark_payout_released(&self, booking_id: &str, payout_ref: &str) -> Result<()> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings.get_mut(booking_id).unwrap();
        booking.payout_status = PayoutStatus::Released;
        booking.payout_ref = Some(payout_ref.to_string());
        Ok(())
    }

    async fn mark_payout_failed(&self, booking_id: &str) -> Result<()> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings.get_mut(booking_id).unwrap();
        booking.payout_status = PayoutStatus::Failed;
        Ok(())
    }
}

// --- Mock ContractorRepository ---
struct MockContractorRepository {
    contractors: Mutex<HashMap<String, Contractor>>,
}

impl MockContractorRepository {
    fn new(contractors: Vec<Contractor>) -> Self {
        MockContractorRepository {
            contractors: Mutex::new(
                contractors
                    .into_iter()
                    .map(|contractor| (contractor.id.clone(), contractor))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl ContractorRepositoryTrait for MockContractorRepository {
    fn get_contractor(&self, contractor_id: &str) -> Result<Contractor> {
        self.contractors
            .lock()
            .unwrap()
            .get(contractor_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Contractor {} not found", contractor_id)))
    }

    fn get_by_user_id(&self, _user_id: &str) -> Result<Contractor> {
        unimplemented!("not used in payout tests")
    }

    fn list_promotion_candidates(&self) -> Result<Vec<Contractor>> {
        unimplemented!("not used in payout tests")
    }

    async fn set_tier(&self, _contractor_id: &str, _tier: Tier) -> Result<()> {
        unimplemented!("not used in payout tests")
    }

    async fn set_payment_account(&self, contractor_id: &str, account_ref: &str) -> Result<()> {
        let mut contractors = self.contractors.lock().unwrap();
        let contractor = contractors.get_mut(contractor_id).unwrap();
        contractor.payment_account_ref = Some(account_ref.to_string());
        Ok(())
    }

    async fn set_account_state(&self, account_ref: &str, payouts_enabled: bool) -> Result<usize> {
        let mut contractors = self.contractors.lock().unwrap();
        let mut matched = 0;
        for contractor in contractors.values_mut() {
            if contractor.payment_account_ref.as_deref() == Some(account_ref) {
                contractor.payouts_enabled = payouts_enabled;
                matched += 1;
            }
        }
        Ok(matched)
    }

    async fn update_rating_aggregates(
        &self,
        _contractor_id: &str,
        _average_rating: Decimal,
        _total_ratings_count: i64,
    ) -> Result<()> {
        unimplemented!("not used in payout tests")
    }
}

// --- Mock PaymentProvider ---
struct MockPaymentProvider {
    transfers: AtomicUsize,
    accounts_created: AtomicUsize,
    fail_transfers: AtomicBool,
}

impl MockPaymentProvider {
    fn new() -> Self {
        MockPaymentProvider {
            transfers: AtomicUsize::new(0),
            accounts_created: AtomicUsize::new(0),
            fail_transfers: AtomicBool::new(false),
        }
    }

    fn set_fail_transfers(&self, fail: bool) {
        self.fail_transfers.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentProviderTrait for MockPaymentProvider {
    async fn create_account(
        &self,
        contractor_id: &str,
    ) -> std::result::Result<String, PayoutError> {
        self.accounts_created.fetch_add(1, Ordering::SeqCst);
        Ok(format!("acct_{}", contractor_id))
    }

    async fn account_status(
        &self,
        account_ref: &str,
    ) -> std::result::Result<PaymentAccountStatus, PayoutError> {
        Ok(PaymentAccountStatus {
            account_ref: account_ref.to_string(),
            onboarding_complete: true,
            payouts_enabled: true,
        })
    }

    async fn onboarding_link(
        &self,
        account_ref: &str,
    ) -> std::result::Result<String, PayoutError> {
        Ok(format!("https://onboarding.test/{}", account_ref))
    }

    async fn release_payout(
        &self,
        booking_id: &str,
        _account_ref: &str,
        _amount: Decimal,
    ) -> std::result::Result<String, PayoutError> {
        if self.fail_transfers.load(Ordering::SeqCst) {
            return Err(PayoutError::Provider("simulated outage".to_string()));
        }
        self.transfers.fetch_add(1, Ordering::SeqCst);
        Ok(format!("tr_{}", booking_id))
    }
}

// --- Fixtures ---
fn booking(id: &str, contractor_id: Option<&str>, payout_status: PayoutStatus) -> Booking {
    Booking {
        id: id.to_string(),
        user_id: "user-1".to_string(),
        contractor_id: contractor_id.map(String::from),
        address_id: "addr-1".to_string(),
        status: BookingStatus::CompletedPendingVerification,
        scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
        grass_length: GrassLength::Medium,
        clippings_removal: false,
        total_price: dec!(138.60),
        payment_intent_ref: None,
        payout_status,
        payout_ref: None,
        contractor_rating_response: None,
    }
}

fn contractor(id: &str, account_ref: Option<&str>, payouts_enabled: bool) -> Contractor {
    Contractor {
        id: id.to_string(),
        user_id: format!("user-{}", id),
        tier: Tier::Standard,
        payment_account_ref: account_ref.map(String::from),
        payouts_enabled,
        average_rating: dec!(4.8),
        total_ratings_count: 12,
        is_active: true,
        approval_status: ApprovalStatus::Approved,
    }
}

struct Harness {
    booking_repository: Arc<MockBookingRepository>,
    provider: Arc<MockPaymentProvider>,
    service: PayoutService,
}

fn harness(bookings: Vec<Booking>, contractors: Vec<Contractor>) -> Harness {
    let booking_repository = Arc::new(MockBookingRepository::new(bookings));
    let contractor_repository = Arc::new(MockContractorRepository::new(contractors));
    let provider = Arc::new(MockPaymentProvider::new());
    let service = PayoutService::new(
        booking_repository.clone(),
        contractor_repository.clone(),
        provider.clone(),
    );
    Harness {
        booking_repository,
        provider,
        service,
    }
}

#[tokio::test]
async fn release_moves_funds_and_records_the_reference() {
    let h = harness(
        vec![booking("b1", Some("c1"), PayoutStatus::Pending)],
        vec![contractor("c1", Some("acct_c1"), true)],
    );

    let release = h.service.release("b1").await.unwrap();

    assert!(release.released);
    assert_eq!(release.payout_ref.as_deref(), Some("tr_b1"));
    assert_eq!(h.provider.transfers.load(Ordering::SeqCst), 1);
    let (status, payout_ref) = h.booking_repository.payout_state("b1");
    assert_eq!(status, PayoutStatus::Released);
    assert_eq!(payout_ref.as_deref(), Some("tr_b1"));
}

#[tokio::test]
async fn replayed_release_succeeds_without_a_second_transfer() {
    let h = harness(
        vec![booking("b1", Some("c1"), PayoutStatus::Pending)],
        vec![contractor("c1", Some("acct_c1"), true)],
    );

    let first = h.service.release("b1").await.unwrap();
    let second = h.service.release("b1").await.unwrap();

    assert!(first.released);
    assert!(second.released);
    assert_eq!(second.payout_ref, first.payout_ref);
    assert_eq!(h.provider.transfers.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn provider_failure_leaves_the_payout_retryable() {
    let h = harness(
        vec![booking("b1", Some("c1"), PayoutStatus::Pending)],
        vec![contractor("c1", Some("acct_c1"), true)],
    );
    h.provider.set_fail_transfers(true);

    let result = h.service.release("b1").await;

    assert!(matches!(result, Err(Error::ExternalService(_))));
    assert_eq!(h.booking_repository.payout_state("b1").0, PayoutStatus::Failed);

    // Once the provider recovers, the retry pass drains the failed payout.
    h.provider.set_fail_transfers(false);
    let outcomes = h.service.retry_failed().await.unwrap();

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].released);
    assert_eq!(h.provider.transfers.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.booking_repository.payout_state("b1").0,
        PayoutStatus::Released
    );
}

#[tokio::test]
async fn missing_payment_account_fails_before_the_provider_is_called() {
    let h = harness(
        vec![booking("b1", Some("c1"), PayoutStatus::Pending)],
        vec![contractor("c1", None, false)],
    );

    let result = h.service.release("b1").await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(h.provider.transfers.load(Ordering::SeqCst), 0);
    assert_eq!(h.booking_repository.payout_state("b1").0, PayoutStatus::Failed);
}

#[tokio::test]
async fn disabled_payouts_block_the_release() {
    let h = harness(
        vec![booking("b1", Some("c1"), PayoutStatus::Pending)],
        vec![contractor("c1", Some("acct_c1"), false)],
    );

    let result = h.service.release("b1").await;

    assert!(result.is_err());
    assert_eq!(h.provider.transfers.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn create_account_reuses_an_existing_provider_account() {
    let h = harness(vec![], vec![contractor("c1", Some("acct_c1"), true)]);

    let status = h.service.create_account("c1").await.unwrap();

    assert_eq!(status.account_ref, "acct_c1");
    assert_eq!(h.provider.accounts_created.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn account_event_flips_the_cached_payout_state() {
    let h = harness(
        vec![booking("b1", Some("c1"), PayoutStatus::Pending)],
        vec![contractor("c1", Some("acct_c1"), false)],
    );

    h.service
        .handle_account_event(PaymentAccountEvent {
            account_ref: "acct_c1".to_string(),
            onboarding_complete: true,
            payouts_enabled: true,
        })
        .await
        .unwrap();

    let release = h.service.release("b1").await.unwrap();
    assert!(release.released);
}
