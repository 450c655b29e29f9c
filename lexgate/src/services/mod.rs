//! HTTP implementations of the `lexgate-core` service contracts.
//!
//! Every client wraps the shared [`Configuration`](crate::config::Configuration)
//! and issues exactly one HTTP call per trait method: encode the params,
//! send, check the status, parse the body, decode against the response
//! model. Anything smarter (retries, caching, cross-call orchestration)
//! belongs to the caller.

mod agents;
mod ocr;
mod payments;
mod translation;
mod vault;

pub use agents::AgentsClient;
pub use ocr::OcrClient;
pub use payments::PaymentsClient;
pub use translation::TranslationClient;
pub use vault::VaultClient;
