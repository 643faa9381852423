//! Windows volume control via `DeviceIoControl(FSCTL_IS_VOLUME_DIRTY)`

use std::ffi::c_void;
use std::io;
use std::iter::once;
use std::mem::size_of;
use std::os::windows::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use tracing::trace;
use windows_sys::Win32::Foundation::{
    CloseHandle, GENERIC_READ, HANDLE, INVALID_HANDLE_VALUE,
};
use windows_sys::Win32::Storage::FileSystem::{
    CreateFileW, FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, FILE_SHARE_WRITE, OPEN_EXISTING,
};
use windows_sys::Win32::System::Ioctl::FSCTL_IS_VOLUME_DIRTY;
use windows_sys::Win32::System::IO::DeviceIoControl;

use crate::domain::VolumeStatus;
use crate::infrastructure::traits::{VolumeControl, VolumeHandle};

#[derive(Debug, Default)]
pub struct IoctlVolumeControl;

impl VolumeControl for IoctlVolumeControl {
    fn open(&self, device: &Path) -> io::Result<Box<dyn VolumeHandle>> {
        let wide: Vec<u16> = device.as_os_str().encode_wide().chain(once(0)).collect();

        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let handle = unsafe {
            CreateFileW(
                wide.as_ptr(),
                GENERIC_READ,
                FILE_SHARE_READ | FILE_SHARE_WRITE,
                ptr::null(),
                OPEN_EXISTING,
                FILE_ATTRIBUTE_NORMAL,
                0,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(io::Error::last_os_error());
        }
        trace!("opened {} as handle {:#x}", device.display(), handle);
        Ok(Box::new(IoctlVolumeHandle { handle }))
    }
}

struct IoctlVolumeHandle {
    handle: HANDLE,
}

impl VolumeHandle for IoctlVolumeHandle {
    fn query_status(&mut self) -> io::Result<VolumeStatus> {
        let mut status: u32 = 0;
        let mut bytes_returned: u32 = 0;

        // SAFETY: the output buffer is a live u32 of the declared size.
        let ok = unsafe {
            DeviceIoControl(
                self.handle,
                FSCTL_IS_VOLUME_DIRTY,
                ptr::null(),
                0,
                &mut status as *mut u32 as *mut c_void,
                size_of::<u32>() as u32,
                &mut bytes_returned,
                ptr::null_mut(),
            )
        };
        if ok == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(VolumeStatus(status))
    }
}

impl Drop for IoctlVolumeHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from CreateFileW and is closed only here.
        unsafe {
            CloseHandle(self.handle);
        }
        trace!("closed handle {:#x}", self.handle);
    }
}
