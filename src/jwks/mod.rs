pub mod defaults;
pub mod key;
pub mod material;
pub mod store;

pub use defaults::{default_key_pair, default_key_set, DEFAULT_KID};
pub use key::{Jwk, Jwks, KeyRecord, KeySet, RsaPrivateParams};
pub use store::KeyStore;
