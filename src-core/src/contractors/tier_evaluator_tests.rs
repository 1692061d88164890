use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::bookings::{
    Booking, BookingRepositoryTrait, BookingStatus, NewBookingRequest, PayoutClaim,
};
use crate::contractors::contractors_service::ContractorService;
use crate::contractors::{
    ApprovalStatus, Contractor, ContractorRepositoryTrait, ContractorServiceTrait, Tier,
};
use crate::disputes::{Dispute, DisputeRepositoryTrait, NewDispute};
use crate::errors::{Error, Result};
use crate::notifications::{NewNotification, Notification, NotificationServiceTrait};

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

    fn tier_of(&self, contractor_id: &str) -> Tier {
        self.contractors.lock().unwrap()[contractor_id].tier
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
        unimplemented!("not used in evaluator tests")
    }

    fn list_promotion_candidates(&self) -> Result<Vec<Contractor>> {
        let mut candidates: Vec<Contractor> = self
            .contractors
            .lock()
            .unwrap()
            .values()
            .filter(|contractor| {
                contractor.is_active && contractor.approval_status == ApprovalStatus::Approved
            })
            .cloned()
            .collect();
        candidates.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(candidates)
    }

    async fn set_tier(&self, contractor_id: &str, tier: Tier) -> Result<()> {
        let mut contractors = self.contractors.lock().unwrap();
        contractors.get_mut(contractor_id).unwrap().tier = tier;
        Ok(())
    }

    async fn set_payment_account(&self, _contractor_id: &str, _account_ref: &str) -> Result<()> {
        unimplemented!("not used in evaluator tests")
    }

    async fn set_account_state(&self, _account_ref: &str, _payouts_enabled: bool) -> Result<usize> {
        unimplemented!("not used in evaluator tests")
    }

    async fn update_rating_aggregates(
        &self,
        _contractor_id: &str,
        _average_rating: Decimal,
        _total_ratings_count: i64,
    ) -> Result<()> {
        unimplemented!("not used in evaluator tests")
    }
}

// --- Mock BookingRepository ---
struct MockBookingRepository {
    completed_by_contractor: HashMap<String, Vec<String>>,
    platform_completed: i64,
}

impl MockBookingRepository {
    fn new(completed_counts: &[(&str, i64)], platform_completed: i64) -> Self {
        let completed_by_contractor = completed_counts
            .iter()
            .map(|(contractor_id, count)| {
                let ids = (0..*count)
                    .map(|n| format!("{}-job-{}", contractor_id, n))
                    .collect();
                (contractor_id.to_string(), ids)
            })
            .collect();
        MockBookingRepository {
            completed_by_contractor,
            platform_completed,
        }
    }
}

#[async_trait]
impl BookingRepositoryTrait for MockBookingRepository {
    fn get_booking(&self, _booking_id: &str) -> Result<Booking> {
        unimplemented!("not used in evaluator tests")
    }

    fn get_user_bookings(&self, _user_id: &str) -> Result<Vec<Booking>> {
        unimplemented!("not used in evaluator tests")
    }

    async fn create_booking(
        &self,
        _user_id: &str,
        _request: &NewBookingRequest,
        _total_price: Decimal,
    ) -> Result<Booking> {
        unimplemented!("not used in evaluator tests")
    }

    async fn transition_status(
        &self,
        _booking_id: &str,
        _from: BookingStatus,
        _to: BookingStatus,
    ) -> Result<Booking> {
        unimplemented!("not used in evaluator tests")
    }

    async fn set_contractor(&self, _booking_id: &str, _contractor_id: &str) -> Result<Booking> {
        unimplemented!("not used in evaluator tests")
    }

    async fn set_payment_intent(
        &self,
        _booking_id: &str,
        _payment_intent_ref: &str,
    ) -> Result<()> {
        unimplemented!("not used in evaluator tests")
    }

    fn completed_count_for_contractor(&self, contractor_id: &str) -> Result<i64> {
        Ok(self
            .completed_by_contractor
            .get(contractor_id)
            .map(|ids| ids.len() as i64)
            .unwrap_or(0))
    }

    fn completed_booking_ids_for_contractor(&self, contractor_id: &str) -> Result<Vec<String>> {
        Ok(self
            .completed_by_contractor
            .get(contractor_id)
            .cloned()
            .unwrap_or_default())
    }

    fn platform_completed_count(&self) -> Result<i64> {
        Ok(self.platform_completed)
    }

    fn unassigned_confirmed_before(&self, _cutoff: NaiveDateTime) -> Result<Vec<Booking>> {
        unimplemented!("not used in evaluator tests")
    }

    fn failed_payout_booking_ids(&self) -> Result<Vec<String>> {
        unimplemented!("not used in evaluator tests")
    }

    async fn claim_payout(&self, _booking_id: &str) -> Result<PayoutClaim> {
        unimplemented!("not used in evaluator tests")
    }

    async fn mark_payout_released(&self, _booking_id: &str, _payout_ref: &str) -> Result<()> {
        unimplemented!("not used in evaluator tests")
    }

    async fn mark_payout_failed(&self, _booking_id: &str) -> Result<()> {
        unimplemented!("not used in evaluator tests")
    }
}

// --- Mock DisputeRepository ---
struct MockDisputeRepository {
    disputed_booking_ids: Vec<String>,
}

#[async_trait]
impl DisputeRepositoryTrait for MockDisputeRepository {
    async fn open_dispute(&self, _new_dispute: &NewDispute) -> Result<Dispute> {
        unimplemented!("not used in evaluator tests")
    }

    fn count_for_bookings(&self, booking_ids: &[String]) -> Result<i64> {
        Ok(self
            .disputed_booking_ids
            .iter()
            .filter(|id| booking_ids.contains(id))
            .count() as i64)
    }
}

// --- Mock NotificationService ---
#[derive(Default)]
struct MockNotificationService {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl NotificationServiceTrait for MockNotificationService {
    async fn notify(&self, user_id: &str, kind: &str, message: &str) -> Result<Notification> {
        self.sent
            .lock()
            .unwrap()
            .push((user_id.to_string(), kind.to_string()));
        let new_notification = NewNotification {
            user_id: user_id.to_string(),
            kind: kind.to_string(),
            message: message.to_string(),
        };
        Ok(Notification {
            id: "n-test".to_string(),
            user_id: new_notification.user_id,
            kind: new_notification.kind,
            message: new_notification.message,
            is_read: false,
        })
    }

    fn notify_detached(&self, user_id: &str, kind: &str, _message: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((user_id.to_string(), kind.to_string()));
    }
}

// --- Fixtures ---
fn contractor(id: &str, tier: Tier, average_rating: Decimal, ratings: i32) -> Contractor {
    Contractor {
        id: id.to_string(),
        user_id: format!("user-{}", id),
        tier,
        payment_account_ref: Some(format!("acct_{}", id)),
        payouts_enabled: true,
        average_rating,
        total_ratings_count: ratings,
        is_active: true,
        approval_status: ApprovalStatus::Approved,
    }
}

struct Harness {
    contractor_repository: Arc<MockContractorRepository>,
    notifications: Arc<MockNotificationService>,
    service: ContractorService,
}

fn harness(
    contractors: Vec<Contractor>,
    completed_counts: &[(&str, i64)],
    platform_completed: i64,
    disputed_booking_ids: Vec<String>,
) -> Harness {
    let contractor_repository = Arc::new(MockContractorRepository::new(contractors));
    let booking_repository = Arc::new(MockBookingRepository::new(
        completed_counts,
        platform_completed,
    ));
    let dispute_repository = Arc::new(MockDisputeRepository {
        disputed_booking_ids,
    });
    let notifications = Arc::new(MockNotificationService::default());
    let service = ContractorService::new(
        contractor_repository.clone(),
        booking_repository,
        dispute_repository,
        notifications.clone(),
    );
    Harness {
        contractor_repository,
        notifications,
        service,
    }
}

#[tokio::test]
async fn five_jobs_at_exactly_four_point_five_promote_to_standard() {
    let h = harness(
        vec![contractor("c1", Tier::Probation, dec!(4.5), 5)],
        &[("c1", 5)],
        5,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert_eq!(promotions.len(), 1);
    assert_eq!(promotions[0].from, Tier::Probation);
    assert_eq!(promotions[0].to, Tier::Standard);
    assert_eq!(h.contractor_repository.tier_of("c1"), Tier::Standard);
    assert_eq!(h.notifications.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn four_jobs_stay_on_probation() {
    let h = harness(
        vec![contractor("c1", Tier::Probation, dec!(5.0), 4)],
        &[("c1", 4)],
        4,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert!(promotions.is_empty());
    assert_eq!(h.contractor_repository.tier_of("c1"), Tier::Probation);
}

#[tokio::test]
async fn rating_just_under_the_bar_stays_on_probation() {
    let h = harness(
        vec![contractor("c1", Tier::Probation, dec!(4.49), 8)],
        &[("c1", 8)],
        8,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert!(promotions.is_empty());
}

#[tokio::test]
async fn zero_reviews_never_qualify() {
    let h = harness(
        vec![contractor("c1", Tier::Probation, dec!(0), 0)],
        &[("c1", 20)],
        20,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert!(promotions.is_empty());
}

#[tokio::test]
async fn premium_is_not_evaluated_until_the_platform_gate_opens() {
    let h = harness(
        vec![contractor("c1", Tier::Standard, dec!(4.9), 40)],
        &[("c1", 49)],
        49,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert!(promotions.is_empty());
    assert_eq!(h.contractor_repository.tier_of("c1"), Tier::Standard);
}

#[tokio::test]
async fn premium_requires_a_dispute_rate_strictly_under_three_percent() {
    let promoted = harness(
        vec![contractor("c1", Tier::Standard, dec!(4.8), 60)],
        &[("c1", 100)],
        150,
        vec!["c1-job-0".to_string(), "c1-job-1".to_string()],
    );
    let blocked = harness(
        vec![contractor("c1", Tier::Standard, dec!(4.8), 60)],
        &[("c1", 100)],
        150,
        vec![
            "c1-job-0".to_string(),
            "c1-job-1".to_string(),
            "c1-job-2".to_string(),
        ],
    );

    // 2/100 = 0.02 passes; 3/100 = 0.03 hits the bound and is rejected.
    let promotions = promoted.service.run_tier_promotions().await.unwrap();
    assert_eq!(promotions.len(), 1);
    assert_eq!(promotions[0].to, Tier::Premium);

    let promotions = blocked.service.run_tier_promotions().await.unwrap();
    assert!(promotions.is_empty());
}

#[tokio::test]
async fn a_contractor_advances_at_most_one_tier_per_run() {
    let h = harness(
        vec![contractor("c1", Tier::Probation, dec!(4.9), 70)],
        &[("c1", 80)],
        200,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert_eq!(promotions.len(), 1);
    assert_eq!(promotions[0].to, Tier::Standard);
    assert_eq!(h.contractor_repository.tier_of("c1"), Tier::Standard);
}

#[tokio::test]
async fn rerunning_the_evaluator_is_a_no_op() {
    let h = harness(
        vec![contractor("c1", Tier::Probation, dec!(4.7), 9)],
        &[("c1", 9)],
        9,
        vec![],
    );

    let first = h.service.run_tier_promotions().await.unwrap();
    let second = h.service.run_tier_promotions().await.unwrap();

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert_eq!(h.notifications.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn premium_contractors_are_never_re_promoted() {
    let h = harness(
        vec![contractor("c1", Tier::Premium, dec!(5.0), 100)],
        &[("c1", 200)],
        500,
        vec![],
    );

    let promotions = h.service.run_tier_promotions().await.unwrap();

    assert!(promotions.is_empty());
    assert!(h.notifications.sent.lock().unwrap().is_empty());
}
