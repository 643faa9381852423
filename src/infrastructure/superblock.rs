//! Dirty-bit status from the on-disk ext2/3/4 superblock
//!
//! Platforms without a dirty-volume ioctl record the same information in the
//! superblock `s_state` field, which is read directly from the device.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::trace;

use crate::domain::{VolumeStatus, VOLUME_IS_DIRTY};
use crate::infrastructure::traits::{VolumeControl, VolumeHandle};

pub const SUPERBLOCK_OFFSET: u64 = 1024;
pub const SUPERBLOCK_SIZE: usize = 1024;
pub const EXT_MAGIC: u16 = 0xEF53;

const MAGIC_OFFSET: usize = 0x38;
const STATE_OFFSET: usize = 0x3A;

/// Unmounted cleanly.
pub const EXT_VALID_FS: u16 = 0x0001;
/// Errors detected.
pub const EXT_ERROR_FS: u16 = 0x0002;

/// Read the superblock of `device` and translate its state into a status word.
pub fn read_status<D>(device: &mut D) -> io::Result<VolumeStatus>
where
    D: Read + Seek,
{
    let mut block = [0u8; SUPERBLOCK_SIZE];
    device.seek(SeekFrom::Start(SUPERBLOCK_OFFSET))?;
    device.read_exact(&mut block)?;

    let magic = u16::from_le_bytes([block[MAGIC_OFFSET], block[MAGIC_OFFSET + 1]]);
    if magic != EXT_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("not an ext2/3/4 filesystem (magic {:#06x})", magic),
        ));
    }

    let state = u16::from_le_bytes([block[STATE_OFFSET], block[STATE_OFFSET + 1]]);
    trace!("superblock s_state={:#06x}", state);

    let dirty = state & EXT_VALID_FS == 0 || state & EXT_ERROR_FS != 0;
    Ok(VolumeStatus(if dirty { VOLUME_IS_DIRTY } else { 0 }))
}

#[derive(Debug, Default)]
pub struct SuperblockVolumeControl;

impl VolumeControl for SuperblockVolumeControl {
    fn open(&self, device: &Path) -> io::Result<Box<dyn VolumeHandle>> {
        // Read-only opens on unix never block other readers or writers.
        let file = File::open(device)?;
        Ok(Box::new(SuperblockVolumeHandle { file }))
    }
}

struct SuperblockVolumeHandle {
    file: File,
}

impl VolumeHandle for SuperblockVolumeHandle {
    fn query_status(&mut self) -> io::Result<VolumeStatus> {
        read_status(&mut self.file)
    }
}
