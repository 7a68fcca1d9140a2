//! # Merchant Types
//!
//! Domain types, fee-rate resolution and port traits for the merchant
//! overview service. This crate has ZERO external IO dependencies - only
//! data structures, business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (PayType, PayGroup, Merchant, overview report)
//! - `pricing/` - Pay type catalog, tolerant config decoding, rate resolver
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Repository, config and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod pricing;

// Re-export commonly used types
pub use domain::{
    DeviceFilter, DeviceMask, Merchant, MerchantOverview, MerchantPublicInfo, MerchantSession,
    OrderStats, PayGroup, PayType, ResolvedRate,
};
pub use dto::*;
pub use error::{AppError, ConfigError, RepoError};
pub use ports::MerchantRepository;
pub use pricing::{PayTypeCatalog, RateResolver, RawConfig};
