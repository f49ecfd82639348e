//! Gigabyte Aorus 15P keyboard backlight control.

use bytes::{BufMut, Bytes, BytesMut};

use crate::controller::HidController;
use crate::setting::{Brightness, DeviceSetting};

/// Feature report size, including the report ID.
pub(crate) const PACKET_SIZE: usize = 9;

/// Color ID the firmware expects when the backlight is turned off.
const COLOR_OFF: u8 = 0x05;

/// Checksum seed.
const CHECKSUM_SEED: u8 = 0xff;

pub(crate) struct Aorus15P;

impl HidController for Aorus15P {
    fn vendor_id(&self) -> u16 {
        0x1044
    }

    fn product_id(&self) -> u16 {
        0x7a3b
    }

    fn interface(&self) -> &str {
        "input3"
    }

    fn config_bytes(&self, setting: &DeviceSetting) -> Bytes {
        let mut buf = BytesMut::with_capacity(PACKET_SIZE);

        // Report ID.
        buf.put_u8(0x00);

        // Set backlight command.
        buf.put_u8(0x08);

        buf.put_slice(&[0x00, 0x01, 0x01]);

        buf.put_u8(brightness_byte(setting.brightness));
        buf.put_u8(color_byte(setting));

        buf.put_u8(0x01);

        buf.put_u8(checksum(&buf));

        buf.freeze()
    }
}

/// Convert brightness from percent to the firmware range 0..=50.
fn brightness_byte(brightness: Brightness) -> u8 {
    brightness.percent() / 2
}

/// Zero brightness must be sent as the dedicated off color.
fn color_byte(setting: &DeviceSetting) -> u8 {
    if setting.brightness.percent() > 0 {
        setting.color.id()
    } else {
        COLOR_OFF
    }
}

fn checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte));
    CHECKSUM_SEED.wrapping_sub(sum)
}
