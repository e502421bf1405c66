//! Payment provider implementations

#[cfg(feature = "stripe")]
pub mod stripe;

#[cfg(feature = "paypal")]
pub mod paypal;

#[cfg(feature = "braintree")]
pub mod braintree;

#[cfg(feature = "stripe")]
pub use stripe::StripeProvider;

#[cfg(feature = "paypal")]
pub use paypal::PayPalProvider;

#[cfg(feature = "braintree")]
pub use braintree::BraintreeProvider;

