#![doc = "lexgate: HTTP clients and CLI for the Lexgate platform SDK."]

//! This crate is the transport half of the SDK. The typed wire models, the
//! marshaling layer and the service contracts live in `lexgate-core`; here
//! are the `reqwest`-backed clients that implement those contracts, the
//! shared [`config::Configuration`], the YAML config loader and the CLI.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use lexgate::config::Configuration;
//! use lexgate::services::OcrClient;
//! use lexgate_core::contract::DocumentOcr;
//! use lexgate_core::models::ocr::OcrSubmitParams;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let conf = Arc::new(Configuration::from_env()?);
//! let ocr = OcrClient::new(conf);
//! let job = ocr.submit(OcrSubmitParams::new("doc_7").with_callback_url_null()).await?;
//! println!("submitted {}", job.job_id());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod load_config;
pub mod services;

pub use lexgate_core::{contract, models};
