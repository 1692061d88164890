use std::sync::Arc;

use super::quote_calculator::QuoteCalculator;
use super::quotes_model::{QuoteInput, QuoteRequest, QuoteResponse};
use super::quotes_traits::QuoteServiceTrait;
use crate::addresses::{AddressRepositoryTrait, VerificationStatus};
use crate::errors::{Error, Result, ValidationError};
use crate::pricing::PricingSettingRepositoryTrait;

pub struct QuoteService {
    address_repository: Arc<dyn AddressRepositoryTrait>,
    pricing_repository: Arc<dyn PricingSettingRepositoryTrait>,
}

impl QuoteService {
    pub fn new(
        address_repository: Arc<dyn AddressRepositoryTrait>,
        pricing_repository: Arc<dyn PricingSettingRepositoryTrait>,
    ) -> Self {
        Self {
            address_repository,
            pricing_repository,
        }
    }
}

impl QuoteServiceTrait for QuoteService {
    fn get_quote(&self, user_id: &str, request: &QuoteRequest) -> Result<QuoteResponse> {
        // Address lookups are scoped to the caller, so someone else's
        // address is indistinguishable from a missing one.
        let address = self
            .address_repository
            .get_user_address(&request.address_id, user_id)?
            .ok_or_else(|| Error::NotFound(format!("Address {} not found", request.address_id)))?;

        if address.verification_status == VerificationStatus::Rejected {
            return Err(ValidationError::InvalidInput(
                "address failed verification".to_string(),
            )
            .into());
        }
        let square_meters = address.square_meters.ok_or_else(|| {
            Error::Validation(ValidationError::MissingField("square_meters".to_string()))
        })?;

        let pricing = self.pricing_repository.load_snapshot()?;
        let input = QuoteInput {
            square_meters,
            slope: address.slope,
            tier_count: address.tier_count,
            grass_length: request.grass_length,
            clippings_removal: request.clippings_removal,
            scheduled_date: request.selected_date,
        };
        let quote = QuoteCalculator::calculate(&input, &pricing);

        Ok(QuoteResponse {
            quote,
            is_preliminary: address.verification_status != VerificationStatus::Verified,
        })
    }
}
