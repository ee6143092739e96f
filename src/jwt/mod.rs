pub mod claims;
pub mod issuer;
pub mod options;

pub use claims::{ClaimSet, ClaimsBuilder};
pub use issuer::TokenIssuer;
pub use options::SignOptions;
