//! Driver configuration loading.
//!
//! A YAML file describes the ordered driver list; [`build_drivers`] turns it
//! into constructed, initialized drivers ready for
//! [`ElevationManager::add_drivers`](crate::ElevationManager::add_drivers).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ArchiveSource, ElevationSource, FlatSource, Result};

/// One driver entry in the configuration, in registration order.
///
/// ```yaml
/// drivers:
///   - type: archive
///     paths: [/data/srtm]
///   - type: flat
///     elevation: 0.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DriverSpec {
    /// Constant elevation everywhere.
    Flat {
        /// Elevation in meters.
        elevation: f64,
    },
    /// Tiled raster archive rooted at the given files or directories.
    Archive {
        /// Source files and/or directories to index.
        paths: Vec<PathBuf>,
    },
}

/// The ordered driver list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Drivers in registration (priority) order.
    pub drivers: Vec<DriverSpec>,
}

impl DriverConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

/// Construct and initialize the configured drivers, in order.
///
/// An archive driver that fails initialization is permanently excluded from
/// the returned list; the failure is logged, not propagated, so one bad
/// archive root does not take down the rest of the stack.
pub fn build_drivers(config: &DriverConfig) -> Vec<Arc<dyn ElevationSource>> {
    let mut drivers: Vec<Arc<dyn ElevationSource>> = Vec::new();

    for spec in &config.drivers {
        match spec {
            DriverSpec::Flat { elevation } => {
                drivers.push(Arc::new(FlatSource::new(*elevation)));
            }
            DriverSpec::Archive { paths } => {
                let mut source = ArchiveSource::new(paths.iter().cloned());
                match source.initialize() {
                    Ok(()) => drivers.push(Arc::new(source)),
                    Err(err) => {
                        warn!(%err, "excluding archive driver that failed to initialize");
                    }
                }
            }
        }
    }

    drivers
}
