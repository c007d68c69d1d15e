pub mod error;
pub mod identity;
pub mod payments;

pub use error::ClientError;
pub use identity::{Account, IdentityProvider, IdentityToolkitClient, NewAccount};
pub use payments::{PaymentGateway, PaymentIntent, StripeClient};
