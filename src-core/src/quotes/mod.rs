pub(crate) mod quote_calculator;
pub(crate) mod quotes_model;
pub(crate) mod quotes_service;
pub(crate) mod quotes_traits;


pub use quote_calculator::QuoteCalculator;
pub use quotes_model::{QuoteBreakdown, QuoteInput, QuoteRequest, QuoteResponse};
pub use quotes_service::QuoteService;
pub use quotes_traits::QuoteServiceTrait;
