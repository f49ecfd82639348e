//! Keyboard backlight controller abstraction.

use bytes::Bytes;

use crate::setting::DeviceSetting;

/// USB bus type as reported in `HID_ID`.
pub(crate) const BUS_USB: u16 = 0x0003;

/// HID backlight controller.
pub(crate) trait HidController {
    /// HID bus type.
    fn bus_type(&self) -> u16 {
        BUS_USB
    }

    /// HID vendor ID.
    fn vendor_id(&self) -> u16;

    /// HID product ID.
    fn product_id(&self) -> u16;

    /// Label identifying the HID interface which accepts backlight commands.
    ///
    /// Every interface of the device reports the same vendor and product ID.
    fn interface(&self) -> &str;

    /// Convert a setting to the feature report sent to the controller.
    fn config_bytes(&self, setting: &DeviceSetting) -> Bytes;
}
