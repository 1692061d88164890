use super::quotes_model::{QuoteRequest, QuoteResponse};
use crate::errors::Result;

/// Trait defining the contract for quote operations.
pub trait QuoteServiceTrait: Send + Sync {
    /// Price a prospective booking for an address the caller owns.
    /// Never mutates state.
    fn get_quote(&self, user_id: &str, request: &QuoteRequest) -> Result<QuoteResponse>;
}
