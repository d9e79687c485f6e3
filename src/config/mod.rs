//! Configuration loading and management for the payroll engine.
//!
//! Tenant payroll rates are loaded from YAML files and handed to the
//! calculation layer as immutable [`PayrollConfiguration`] snapshots.
//!
//! # Example
//!
//! ```no_run
//! use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
//!
//! let loader = ConfigLoader::load("./config").unwrap();
//! let config = loader.configuration("acme").unwrap();
//! println!("Transport allowance: {}", config.transport_allowance);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigurationProvider};
pub use types::{PayrollConfiguration, RawPayrollConfiguration, TenantConfigFile};
