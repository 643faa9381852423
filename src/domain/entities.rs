//! Volume entities: designators, status words and the dirty classification

use std::fmt;
use std::path::PathBuf;

use crate::domain::DomainError;

/// Status word bit set by the filesystem when the volume needs checking.
pub const VOLUME_IS_DIRTY: u32 = 0x0000_0001;

/// Prefix turning a designator into a device path on this platform.
#[cfg(windows)]
pub const DEFAULT_DEVICE_PREFIX: &str = r"\\.\";
#[cfg(not(windows))]
pub const DEFAULT_DEVICE_PREFIX: &str = "/dev/";

/// Designator shown in usage output.
#[cfg(windows)]
pub const EXAMPLE_DESIGNATOR: &str = "c:";
#[cfg(not(windows))]
pub const EXAMPLE_DESIGNATOR: &str = "sda1";

/// A string naming a volume to the platform (drive letter, GUID, device).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeDesignator(String);

impl VolumeDesignator {
    /// Validate a designator as typed by the user.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.trim().is_empty() || raw.contains('\0') {
            return Err(DomainError::InvalidDesignator(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the platform device path for this volume.
    ///
    /// Designators that already look like paths are used as-is on
    /// platforms where the prefix is a directory (`/dev/`).
    pub fn device_path(&self, prefix: &str) -> PathBuf {
        let already_path = !cfg!(windows) && self.0.contains('/');
        if already_path || self.0.starts_with(prefix) {
            PathBuf::from(&self.0)
        } else {
            PathBuf::from(format!("{}{}", prefix, self.0))
        }
    }
}

impl fmt::Display for VolumeDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw status word returned by a volume status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeStatus(pub u32);

impl VolumeStatus {
    pub fn is_dirty(self) -> bool {
        self.0 & VOLUME_IS_DIRTY != 0
    }

    pub fn dirty_state(self) -> DirtyState {
        if self.is_dirty() {
            DirtyState::Dirty
        } else {
            DirtyState::Clean
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirtyState {
    Clean,
    Dirty,
}

impl fmt::Display for DirtyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirtyState::Clean => f.write_str("clean"),
            DirtyState::Dirty => f.write_str("dirty"),
        }
    }
}

/// Result of a dirty-bit query for one volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtyReport {
    pub volume: VolumeDesignator,
    pub state: DirtyState,
}

impl fmt::Display for DirtyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The {} volume is {}", self.volume, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_designator_when_parsing_then_rejects() {
        assert_eq!(
            VolumeDesignator::parse("  "),
            Err(DomainError::InvalidDesignator("  ".into()))
        );
        assert!(VolumeDesignator::parse("c:\0").is_err());
    }

    #[test]
    fn given_drive_letter_when_building_device_path_then_prefixes() {
        let volume = VolumeDesignator::parse("c:").unwrap();
        assert_eq!(volume.device_path(r"\\.\"), PathBuf::from(r"\\.\c:"));
    }

    #[test]
    fn given_prefixed_designator_when_building_device_path_then_keeps_it() {
        let volume = VolumeDesignator::parse("/dev/sda1").unwrap();
        assert_eq!(volume.device_path("/dev/"), PathBuf::from("/dev/sda1"));
    }

    #[cfg(not(windows))]
    #[test]
    fn given_image_path_when_building_device_path_then_uses_path() {
        let volume = VolumeDesignator::parse("images/disk.img").unwrap();
        assert_eq!(
            volume.device_path("/dev/"),
            PathBuf::from("images/disk.img")
        );
    }

    #[test]
    fn given_status_word_when_classifying_then_only_dirty_bit_counts() {
        assert_eq!(VolumeStatus(0).dirty_state(), DirtyState::Clean);
        assert_eq!(VolumeStatus(0x1).dirty_state(), DirtyState::Dirty);
        assert_eq!(VolumeStatus(0x2).dirty_state(), DirtyState::Clean);
        assert_eq!(VolumeStatus(0xffff_ffff).dirty_state(), DirtyState::Dirty);
    }

    #[test]
    fn given_report_when_displayed_then_matches_fsutil_wording() {
        let report = DirtyReport {
            volume: VolumeDesignator::parse("c:").unwrap(),
            state: DirtyState::Dirty,
        };
        assert_eq!(report.to_string(), "The c: volume is dirty");
    }
}
