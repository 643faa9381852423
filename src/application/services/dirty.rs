//! Dirty-bit service
//!
//! Opens a volume, issues one status request and classifies the result.

use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DirtyReport, VolumeDesignator};
use crate::infrastructure::traits::VolumeControl;

/// Service for inspecting the dirty bit of a volume.
pub struct DirtyService {
    volumes: Arc<dyn VolumeControl>,
    device_prefix: String,
}

impl DirtyService {
    /// Create a new dirty-bit service.
    pub fn new(volumes: Arc<dyn VolumeControl>, device_prefix: impl Into<String>) -> Self {
        Self {
            volumes,
            device_prefix: device_prefix.into(),
        }
    }

    /// Query whether `volume` is marked dirty.
    ///
    /// The handle is dropped (and the OS handle closed) before returning,
    /// whether the status request succeeded or not.
    pub fn query(&self, volume: &VolumeDesignator) -> ApplicationResult<DirtyReport> {
        let device = volume.device_path(&self.device_prefix);
        debug!("query: volume={} device={}", volume, device.display());

        let mut handle =
            self.volumes
                .open(&device)
                .map_err(|source| ApplicationError::VolumeOpen {
                    device: device.clone(),
                    source,
                })?;

        let status = handle.query_status();
        drop(handle);

        let status = status.map_err(|source| ApplicationError::VolumeQuery { device, source })?;
        debug!("query: status word={:#010x}", status.0);

        Ok(DirtyReport {
            volume: volume.clone(),
            state: status.dirty_state(),
        })
    }
}
