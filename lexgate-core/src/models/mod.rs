//! Wire models for the platform services.
//!
//! Every type here wraps a [`ModelInstance`](crate::instance::ModelInstance)
//! and declares one static descriptor table. Constructors take the required
//! fields; everything optional is set through `with_*` builders, each of
//! which returns a fresh value and leaves the receiver untouched. `with_*_null`
//! variants exist only on nullable fields and set an explicit JSON null,
//! which is not the same as leaving the field unset.

pub mod agents;
pub mod common;
pub mod ocr;
pub mod payments;
pub mod translation;
pub mod vault;
