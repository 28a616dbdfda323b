//! Client for the remote inference service.
//!
//! This crate provides:
//! - The [`InferenceService`] trait the pipelines are written against
//! - [`GeminiClient`], a REST implementation backed by the Gemini Files API
//!   and `generateContent`

pub mod client;
pub mod error;
pub mod service;
mod types;

#[cfg(test)]
mod client_tests;

pub use client::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::{GeminiError, GeminiResult};
pub use service::InferenceService;
