use serde::{Deserialize, Serialize};

/// Raw hardware attributes of a device.
///
/// Every field is optional: collectors leave a field empty when the value is
/// unavailable or the query failed. The two list fields are hashed in order,
/// so collectors must produce them in a stable order (MAC addresses are
/// sorted ascending).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareProfile {
    /// Device codename (`Build.DEVICE`)
    pub device: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub manufacturer: Option<String>,
    /// Product name (`Build.PRODUCT`)
    pub product: Option<String>,
    /// Display build id (`Build.DISPLAY`)
    pub display: Option<String>,
    pub board: Option<String>,
    /// Hardware codename (`Build.HARDWARE`)
    pub hardware: Option<String>,
    pub supported_abis: Option<Vec<String>>,
    pub mac_addresses: Option<Vec<String>>,
    pub imei: Option<String>,
    pub meid: Option<String>,
    pub serial: Option<String>,
}

impl HardwareProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    pub fn with_hardware(mut self, hardware: impl Into<String>) -> Self {
        self.hardware = Some(hardware.into());
        self
    }

    pub fn with_supported_abis<I, S>(mut self, abis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_abis = Some(abis.into_iter().map(Into::into).collect());
        self
    }

    /// Set the MAC address list as given. Callers are responsible for ordering.
    pub fn with_mac_addresses<I, S>(mut self, macs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mac_addresses = Some(macs.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_imei(mut self, imei: impl Into<String>) -> Self {
        self.imei = Some(imei.into());
        self
    }

    pub fn with_meid(mut self, meid: impl Into<String>) -> Self {
        self.meid = Some(meid.into());
        self
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial = Some(serial.into());
        self
    }
}
