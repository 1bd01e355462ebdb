//! Authentication primitives for venue APIs.
//!
//! # Features
//!
//! - **Secure Credentials**: API secrets are wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **HMAC Signing**: HMAC-SHA256 and HMAC-SHA512 request signatures.
//! - **Nonces**: [`NonceRegistry`] hands out strictly increasing nonces per venue.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, NonceRegistry, RequestSigner, SignatureDigest};
//!
//! let credentials = ApiCredentials::from_env("POLONIEX")?;
//! let nonces = NonceRegistry::new();
//!
//! let signer = RequestSigner::new(&credentials, SignatureDigest::Sha512);
//! let nonce = nonces.next_nonce(&identity);
//! let signed_query = signer.sign_params(&[("command", "returnBalances")], nonce);
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use nonce::NonceRegistry;
pub use signer::{RequestSigner, SignatureDigest};
