//! Request signing for the Walmart Marketplace client.
//!
//! Every marketplace request carries a set of `WM_*` headers, including a
//! signature over a short canonical string:
//!
//! ```text
//! StringToSign = ConsumerId + "\n" +
//!                FullUrl + "\n" +
//!                HTTP-Verb + "\n" +
//!                Timestamp + "\n"
//! ```
//!
//! The signing algorithm sits behind the [`RequestSigner`] trait.
//! [`HmacSha256Signer`] signs with a shared secret and [`StaticSigner`]
//! returns a fixed signature for tests and the mock environment.
//!
//! # Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use http::Method;
//! use walmart_auth::{HmacSha256Signer, SigningContext, sign_request};
//!
//! let signer = HmacSha256Signer::new("secret");
//! let context = SigningContext::new("consumer-id", "channel-type");
//! let timestamp = Utc.timestamp_millis_opt(1_462_566_788_000).unwrap();
//! let headers = sign_request(
//!     &signer,
//!     &context,
//!     &Method::GET,
//!     "https://marketplace.walmartapis.com/v3/feeds",
//!     timestamp,
//!     uuid::Uuid::nil(),
//! )
//! .unwrap();
//! assert_eq!(headers.get("WM_SEC.TIMESTAMP"), Some("1462566788000"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - string-to-sign construction
//! - [`error`] - signing error types
//! - [`headers`] - the signed `WM_*` header set
//! - [`signer`] - signer trait and implementations

pub mod canonical;
pub mod error;
pub mod headers;
pub mod signer;

pub use canonical::string_to_sign;
pub use error::AuthError;
pub use headers::{SignedHeaders, SigningContext, sign_request, sign_request_now};
pub use signer::{HmacSha256Signer, RequestSigner, StaticSigner};
