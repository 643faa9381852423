//! I/O boundary traits for testability
//!
//! These traits abstract the platform volume-control facility, allowing
//! services to be tested with mock implementations.

use std::io;
use std::path::Path;

use crate::domain::VolumeStatus;

/// Opens volumes by platform device path.
pub trait VolumeControl: Send + Sync {
    /// Open the volume for read access, sharing read/write with other processes.
    fn open(&self, device: &Path) -> io::Result<Box<dyn VolumeHandle>>;
}

/// An open volume. Dropping the handle releases it.
pub trait VolumeHandle {
    /// Issue a dirty-bit status request against the open volume.
    fn query_status(&mut self) -> io::Result<VolumeStatus>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real volume control for the current platform.
///
/// Windows asks the filesystem driver via `FSCTL_IS_VOLUME_DIRTY`; elsewhere
/// the ext2/3/4 superblock state is read straight from the device.
#[cfg(windows)]
pub type RealVolumeControl = super::windows::IoctlVolumeControl;
#[cfg(not(windows))]
pub type RealVolumeControl = super::superblock::SuperblockVolumeControl;
