//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::DirtyService;
use crate::config::Settings;
use crate::infrastructure::traits::{RealVolumeControl, VolumeControl};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Platform volume-control abstraction
    pub volumes: Arc<dyn VolumeControl>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealVolumeControl::default()))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, volumes: Arc<dyn VolumeControl>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, volumes }
    }

    /// Dirty-bit service bound to the configured device prefix.
    pub fn dirty_service(&self) -> DirtyService {
        DirtyService::new(self.volumes.clone(), self.settings.device_prefix())
    }
}
