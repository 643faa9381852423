//! Tests for the superblock-backed volume control against image files

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use fsutil::application::services::DirtyService;
use fsutil::application::ApplicationError;
use fsutil::domain::{DirtyState, VolumeDesignator};
use fsutil::infrastructure::superblock::{
    SuperblockVolumeControl, EXT_ERROR_FS, EXT_MAGIC, EXT_VALID_FS, SUPERBLOCK_OFFSET,
};
use fsutil::infrastructure::traits::VolumeControl;

/// Helper to write a minimal ext image with the given superblock magic and state
fn create_image(dir: &TempDir, name: &str, magic: u16, state: u16) -> PathBuf {
    let mut bytes = vec![0u8; 8192];
    let base = SUPERBLOCK_OFFSET as usize;
    bytes[base + 0x38..base + 0x3A].copy_from_slice(&magic.to_le_bytes());
    bytes[base + 0x3A..base + 0x3C].copy_from_slice(&state.to_le_bytes());
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write image");
    path
}

fn query(device: &Path) -> io::Result<bool> {
    let mut handle = SuperblockVolumeControl.open(device)?;
    Ok(handle.query_status()?.is_dirty())
}

#[test]
fn given_cleanly_unmounted_image_when_querying_then_clean() {
    let temp = TempDir::new().unwrap();
    let image = create_image(&temp, "clean.img", EXT_MAGIC, EXT_VALID_FS);

    assert!(!query(&image).unwrap());
}

#[test]
fn given_image_not_cleanly_unmounted_when_querying_then_dirty() {
    let temp = TempDir::new().unwrap();
    let image = create_image(&temp, "dirty.img", EXT_MAGIC, 0);

    assert!(query(&image).unwrap());
}

#[test]
fn given_image_with_errors_when_querying_then_dirty() {
    let temp = TempDir::new().unwrap();
    let image = create_image(&temp, "errors.img", EXT_MAGIC, EXT_VALID_FS | EXT_ERROR_FS);

    assert!(query(&image).unwrap());
}

#[test]
fn given_missing_device_when_opening_then_not_found() {
    let temp = TempDir::new().unwrap();
    let err = SuperblockVolumeControl
        .open(&temp.path().join("absent.img"))
        .err()
        .expect("open should fail");

    assert_eq!(err.kind(), io::ErrorKind::NotFound);
    assert!(err.raw_os_error().is_some());
}

#[test]
fn given_foreign_filesystem_when_querying_then_service_reports_query_error() {
    let temp = TempDir::new().unwrap();
    create_image(&temp, "fat.img", 0x4d44, EXT_VALID_FS);

    let prefix = format!("{}{}", temp.path().display(), std::path::MAIN_SEPARATOR);
    let service = DirtyService::new(Arc::new(SuperblockVolumeControl), prefix);
    let err = service
        .query(&VolumeDesignator::parse("fat.img").unwrap())
        .unwrap_err();

    assert!(matches!(err, ApplicationError::VolumeQuery { .. }));
    assert_eq!(err.os_code(), None);
}

#[test]
fn given_prefix_dir_when_querying_through_service_then_classifies_image() {
    let temp = TempDir::new().unwrap();
    create_image(&temp, "vol0", EXT_MAGIC, 0);

    let prefix = format!("{}{}", temp.path().display(), std::path::MAIN_SEPARATOR);
    let service = DirtyService::new(Arc::new(SuperblockVolumeControl), prefix);
    let report = service
        .query(&VolumeDesignator::parse("vol0").unwrap())
        .unwrap();

    assert_eq!(report.state, DirtyState::Dirty);
    assert_eq!(report.to_string(), "The vol0 volume is dirty");
}
