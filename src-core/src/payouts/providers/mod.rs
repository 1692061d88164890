pub mod sandbox_provider;
pub mod stripe_provider;

pub use sandbox_provider::SandboxPaymentProvider;
pub use stripe_provider::StripeProvider;
