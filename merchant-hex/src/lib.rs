//! # Merchant Hex
//!
//! Application service layer and HTTP adapter for the merchant overview.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates repository reads and rate resolution)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - Generated API document
//!
//! The service is generic over `R: MerchantRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::OverviewService;
