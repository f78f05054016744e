//! Configuration loading and management.

use std::path::{Path, PathBuf};

use attend_core::{DEFAULT_FIRST_EMPLOYEE_ID, Directory, EmployeeId, ValidationError};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::commands::util::reporting_to_id;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Id given to the first employee added.
    pub first_employee_id: u64,
    /// Employees registered at startup, before the menu is shown.
    pub seed_employees: Vec<SeedEmployee>,
}

/// An employee registered at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    /// Manager id; zero or negative means no manager.
    #[serde(default)]
    pub reporting_to: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_employee_id: DEFAULT_FIRST_EMPLOYEE_ID,
            seed_employees: vec![SeedEmployee {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                role: "Manager".to_string(),
                reporting_to: 0,
            }],
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ATTEND_*)
        figment = figment.merge(Env::prefixed("ATTEND_"));

        figment.extract()
    }

    /// Builds the startup directory with the seed employees registered.
    pub fn directory(&self) -> Result<Directory, ValidationError> {
        let mut directory = Directory::with_first_id(EmployeeId::new(self.first_employee_id)?)?;
        for seed in &self.seed_employees {
            directory.add_employee(
                seed.first_name.as_str(),
                seed.last_name.as_str(),
                seed.role.as_str(),
                reporting_to_id(seed.reporting_to),
            );
        }
        Ok(directory)
    }
}

/// Returns the platform-specific config directory for attend.
///
/// On Linux: `~/.config/attend`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("attend"))
}
