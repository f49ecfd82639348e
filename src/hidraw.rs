//! Linux hidraw discovery and feature report transfer.
//!
//! A single keyboard exposes one hidraw node per HID interface, all sharing the same vendor and
//! product ID. The node which accepts backlight commands is found by also matching the interface
//! label in the node's `uevent` file.

use std::fs::{self, File};
use std::io;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::controller::HidController;
use crate::error::{Error, Result};

/// hidraw class directory in sysfs.
pub(crate) const SYSFS_HIDRAW_DIR: &str = "/sys/class/hidraw";

/// Directory containing the hidraw device nodes.
pub(crate) const DEV_DIR: &str = "/dev";

/// Prefix of the `uevent` line carrying the bus, vendor and product ID.
const HID_ID_PREFIX: &str = "HID_ID=";

/// hidraw ioctl magic.
const HIDRAW_MAGIC: u32 = b'H' as u32;

/// `HIDIOCSFEATURE(len)` from `linux/hidraw.h`.
fn hidiocsfeature(len: usize) -> libc::c_ulong {
    // _IOC(_IOC_WRITE | _IOC_READ, 'H', 0x06, len)
    let dir: u32 = 3;
    let size = (len as u32) & 0x3fff;
    let nr: u32 = 0x06;
    ((dir << 30) | (size << 16) | (HIDRAW_MAGIC << 8) | nr) as libc::c_ulong
}

/// Sink for HID feature reports.
pub(crate) trait FeatureReport {
    /// Send a feature report to the device node, returning the number of bytes transferred.
    fn set_feature(&self, node: &Path, report: &[u8]) -> io::Result<usize>;
}

/// Feature reports through the hidraw `HIDIOCSFEATURE` ioctl.
pub(crate) struct Ioctl;

impl FeatureReport for Ioctl {
    fn set_feature(&self, node: &Path, report: &[u8]) -> io::Result<usize> {
        let file = File::options().read(true).write(true).open(node)?;

        let mut buf = report.to_vec();
        let ret = unsafe {
            libc::ioctl(file.as_raw_fd(), hidiocsfeature(buf.len()) as _, buf.as_mut_ptr())
        };

        if ret < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(ret as usize)
        }
    }
}

/// hidraw node found during a single discovery pass.
#[derive(Debug)]
pub(crate) struct CandidateDevice {
    /// Node name, like `hidraw2`.
    pub(crate) name: String,
    /// Contents of the node's `device/uevent` file.
    pub(crate) uevent: String,
}

impl CandidateDevice {
    /// Check whether the `HID_ID` line matches the controller's bus, vendor and product.
    pub(crate) fn matches_identity(&self, controller: &dyn HidController) -> bool {
        self.uevent.lines().filter_map(parse_hid_id).any(|(bus, vendor, product)| {
            bus == u32::from(controller.bus_type())
                && vendor == u32::from(controller.vendor_id())
                && product == u32::from(controller.product_id())
        })
    }

    /// Check whether any line mentions the controller's interface label.
    pub(crate) fn matches_interface(&self, controller: &dyn HidController) -> bool {
        self.uevent.lines().any(|line| line.contains(controller.interface()))
    }
}

/// Parse `HID_ID=BBBB:VVVVVVVV:PPPPPPPP`.
fn parse_hid_id(line: &str) -> Option<(u32, u32, u32)> {
    let mut ids = line.strip_prefix(HID_ID_PREFIX)?.trim().split(':');
    let bus = u32::from_str_radix(ids.next()?, 16).ok()?;
    let vendor = u32::from_str_radix(ids.next()?, 16).ok()?;
    let product = u32::from_str_radix(ids.next()?, 16).ok()?;
    Some((bus, vendor, product))
}

/// hidraw device registry.
pub(crate) struct Hidraw<F = Ioctl> {
    sysfs_dir: PathBuf,
    dev_dir: PathBuf,
    transport: F,
}

impl Default for Hidraw<Ioctl> {
    fn default() -> Self {
        Self::with_transport(SYSFS_HIDRAW_DIR, DEV_DIR, Ioctl)
    }
}

impl<F: FeatureReport> Hidraw<F> {
    pub(crate) fn with_transport(
        sysfs_dir: impl Into<PathBuf>,
        dev_dir: impl Into<PathBuf>,
        transport: F,
    ) -> Self {
        Self { sysfs_dir: sysfs_dir.into(), dev_dir: dev_dir.into(), transport }
    }

    /// All hidraw nodes with a readable `uevent`, sorted by name.
    pub(crate) fn candidates(&self) -> Result<Vec<CandidateDevice>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.sysfs_dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') {
                names.push(name);
            }
        }
        names.sort();

        let candidates = names
            .into_iter()
            .filter_map(|name| {
                let uevent_path = self.sysfs_dir.join(&name).join("device").join("uevent");
                match fs::read_to_string(&uevent_path) {
                    Ok(uevent) => Some(CandidateDevice { name, uevent }),
                    Err(err) => {
                        debug!("Skipping {}: {}", uevent_path.display(), err);
                        None
                    },
                }
            })
            .collect();

        Ok(candidates)
    }

    /// Send a feature report to the first matching node which accepts it.
    ///
    /// Returns the path of the node which accepted the report.
    pub(crate) fn send(&self, controller: &dyn HidController, report: &[u8]) -> Result<PathBuf> {
        debug!("Feature report: {:02x?}", report);

        let mut attempts = 0;
        for candidate in self.candidates()? {
            if !candidate.matches_identity(controller) {
                debug!("Skipping {}: identity mismatch", candidate.name);
                continue;
            }

            if !candidate.matches_interface(controller) {
                debug!("Skipping {}: not interface {}", candidate.name, controller.interface());
                continue;
            }

            attempts += 1;
            let node = self.dev_dir.join(&candidate.name);
            match self.transport.set_feature(&node, report) {
                Ok(len) if len == report.len() => {
                    info!("Feature report accepted by {}", node.display());
                    return Ok(node);
                },
                Ok(len) => debug!("Short transfer to {}: {} bytes", node.display(), len),
                Err(err) => debug!("Transfer to {} failed: {}", node.display(), err),
            }
        }

        if attempts == 0 {
            Err(Error::NoDevice)
        } else {
            Err(Error::Rejected { attempts })
        }
    }
}
