//! Fee-rate resolution core: catalog, config decoding and the resolver.

pub mod catalog;
pub mod fee_config;
pub mod resolver;

pub use catalog::PayTypeCatalog;
pub use fee_config::{ConfigMap, RawConfig};
pub use resolver::{RateResolver, RateSource};
