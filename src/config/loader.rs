//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tenant payroll
//! configurations from YAML files, and the [`ConfigurationProvider`] seam the
//! rest of the crate depends on.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollConfiguration, TenantConfigFile};

/// Supplies the configuration snapshot for a tenant.
///
/// Implementations must never fall back to default rates: an unknown tenant
/// is reported as [`EngineError::ConfigurationMissing`].
pub trait ConfigurationProvider {
    /// Returns the configuration for `tenant_id`.
    fn configuration(&self, tenant_id: &str) -> EngineResult<&PayrollConfiguration>;
}

/// Loads and provides access to tenant payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── tenants/
///     ├── acme.yaml
///     └── globex.yaml
/// ```
///
/// Each file holds a `payroll:` section whose `tenant_id` identifies the
/// tenant; the file name is not significant.
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::{ConfigLoader, ConfigurationProvider};
///
/// let loader = ConfigLoader::load("./config")?;
/// let config = loader.configuration("acme")?;
/// println!("Minimum wage: {}", config.minimum_wage);
/// # Ok::<(), nomina_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    tenants: HashMap<String, PayrollConfiguration>,
}

impl ConfigLoader {
    /// Loads every tenant configuration under `<path>/tenants`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The `tenants` directory is missing or holds no YAML files
    /// - Any file contains invalid YAML
    /// - Any file is missing a required rate (`ConfigurationMissing`)
    /// - Any rate is out of range (`InvalidConfiguration`)
    /// - Two files declare the same `tenant_id`
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let tenants_dir = path.as_ref().join("tenants");
        let tenants_dir_str = tenants_dir.display().to_string();

        if !tenants_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: tenants_dir_str,
            });
        }

        let entries = fs::read_dir(&tenants_dir).map_err(|_| EngineError::ConfigNotFound {
            path: tenants_dir_str.clone(),
        })?;

        let mut tenants = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: tenants_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let config = Self::load_tenant(&path)?;
                if tenants.contains_key(&config.tenant_id) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("duplicate tenant_id '{}'", config.tenant_id),
                    });
                }
                debug!(tenant_id = %config.tenant_id, path = %path.display(), "Loaded tenant configuration");
                tenants.insert(config.tenant_id.clone(), config);
            }
        }

        if tenants.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tenant files found)", tenants_dir_str),
            });
        }

        info!(tenants = tenants.len(), "Payroll configuration loaded");
        Ok(Self { tenants })
    }

    /// Builds a loader from configurations already in memory.
    ///
    /// Applies the same checks as [`ConfigLoader::load`]: every
    /// configuration must validate and tenant ids must be unique.
    pub fn from_configurations(
        configs: impl IntoIterator<Item = PayrollConfiguration>,
    ) -> EngineResult<Self> {
        let mut tenants = HashMap::new();
        for config in configs {
            config.validate()?;
            if tenants.contains_key(&config.tenant_id) {
                return Err(EngineError::InvalidConfiguration {
                    field: "tenant_id".to_string(),
                    message: format!("duplicate tenant_id '{}'", config.tenant_id),
                });
            }
            tenants.insert(config.tenant_id.clone(), config);
        }
        Ok(Self { tenants })
    }

    /// Parses one tenant file into a validated configuration.
    fn load_tenant(path: &Path) -> EngineResult<PayrollConfiguration> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let file: TenantConfigFile =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        let config = PayrollConfiguration::try_from(file.payroll)?;
        config.validate()?;

        info!(
            tenant_id = %config.tenant_id,
            tenant_name = file.name.as_deref().unwrap_or(&config.tenant_id),
            "Tenant configuration parsed"
        );
        Ok(config)
    }

    /// Returns the identifiers of all loaded tenants, sorted.
    pub fn tenant_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tenants.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl ConfigurationProvider for ConfigLoader {
    fn configuration(&self, tenant_id: &str) -> EngineResult<&PayrollConfiguration> {
        self.tenants
            .get(tenant_id)
            .ok_or_else(|| EngineError::ConfigurationMissing {
                tenant_id: tenant_id.to_string(),
                field: "configuration".to_string(),
            })
    }
}
