#![doc = "lexgate-core: typed wire models and service contracts for the Lexgate platform."]

//! This crate contains everything about the Lexgate API that is not
//! transport: the marshaling layer that moves values across the JSON
//! boundary, the wire models built on it, and the service contracts that
//! clients implement. HTTP, authentication and retry policy live in the
//! `lexgate` crate.
//!
//! # The marshaling layer
//!
//! Every wire model declares a static [`ModelSpec`]: per-field wire name,
//! presence, nullability and value kind. [`decode`] checks a parsed JSON
//! tree against a spec and produces an immutable [`ModelInstance`] or a
//! single path-annotated [`DecodeError`]; [`encode`] walks an instance back
//! into JSON. Both are pure and safe to call concurrently from any number
//! of tasks.
//!
//! Two behaviors are deliberate forward-compatibility policy rather than
//! leniency bugs: unknown object keys are ignored, and enum strings outside
//! the declared member set decode to an unrecognized value that re-encodes
//! verbatim.
//!
//! # Usage
//!
//! ```
//! use lexgate_core::models::payments::HoldParams;
//!
//! let params = HoldParams::new(2500, "EUR", "acct_9f2")
//!     .with_metadata(Default::default());
//! let wire = params.to_wire();
//! assert_eq!(wire["amount"], 2500);
//! let back = HoldParams::from_wire(&wire).unwrap();
//! assert_eq!(back, params);
//! ```

pub mod contract;
pub mod decode;
pub mod encode;
pub mod error;
pub mod instance;
pub mod models;
pub mod schema;
pub mod value;

pub use decode::{decode, MAX_DECODE_DEPTH};
pub use encode::encode;
pub use error::{DecodeError, DecodeErrorKind, SchemaError};
pub use instance::{FieldState, ModelInstance};
pub use schema::{FieldKind, FieldSpec, ModelSpec, Presence, Scalar};
pub use value::FieldValue;
