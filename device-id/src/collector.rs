use crate::build_prop::BuildProps;
use crate::fingerprint::DeviceFingerprint;
use crate::hardware::HardwareProfile;
use crate::host::HostBuildInfo;
use crate::network::{InterfaceFilter, InterfaceSource, SystemInterfaces, collect_mac_addresses};
use crate::software::SoftwareInfo;
use crate::telephony::{self, SimCardInfo, TelephonyProvider};
use serde::{Deserialize, Serialize};

/// Source of OS build metadata
pub trait BuildInfoSource {
    /// Build fields of the hardware profile. MACs and telephony ids are filled
    /// in by the collector.
    fn hardware_profile(&self) -> HardwareProfile;
    fn software_info(&self) -> SoftwareInfo;
}

impl BuildInfoSource for BuildProps {
    fn hardware_profile(&self) -> HardwareProfile {
        BuildProps::hardware_profile(self)
    }

    fn software_info(&self) -> SoftwareInfo {
        BuildProps::software_info(self)
    }
}

impl BuildInfoSource for HostBuildInfo {
    fn hardware_profile(&self) -> HardwareProfile {
        HostBuildInfo::hardware_profile(self)
    }

    fn software_info(&self) -> SoftwareInfo {
        HostBuildInfo::software_info(self)
    }
}

/// Snapshot of a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub hardware: HardwareProfile,
    pub operating_system: SoftwareInfo,
    pub sim: Option<SimCardInfo>,
    pub udid: DeviceFingerprint,
}

/// Gathers a [`HardwareProfile`] from build metadata, network interfaces and
/// telephony.
pub struct DeviceCollector<B, I = SystemInterfaces> {
    build: B,
    interfaces: I,
    telephony: Option<Box<dyn TelephonyProvider + Send + Sync>>,
    filter: InterfaceFilter,
}

impl<B: BuildInfoSource> DeviceCollector<B, SystemInterfaces> {
    pub fn new(build: B) -> Self {
        Self::with_interfaces(build, SystemInterfaces)
    }
}

impl<B: BuildInfoSource, I: InterfaceSource> DeviceCollector<B, I> {
    pub fn with_interfaces(build: B, interfaces: I) -> Self {
        Self {
            build,
            interfaces,
            telephony: None,
            filter: InterfaceFilter::NonVirtual,
        }
    }

    pub fn with_telephony(
        mut self,
        telephony: impl TelephonyProvider + Send + Sync + 'static,
    ) -> Self {
        self.telephony = Some(Box::new(telephony));
        self
    }

    /// Restrict the MAC addresses that enter the profile.
    ///
    /// Changing the filter changes the UDID of devices with filtered interfaces.
    pub fn with_interface_filter(mut self, filter: InterfaceFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn hardware_profile(&self) -> HardwareProfile {
        let mut profile = self.build.hardware_profile();
        profile.mac_addresses = collect_mac_addresses(&self.interfaces, self.filter);
        if let Some(tm) = self.telephony.as_deref() {
            profile.imei = telephony::imei(tm);
            profile.meid = telephony::meid(tm);
        }
        profile
    }

    pub fn udid(&self) -> DeviceFingerprint {
        DeviceFingerprint::from_profile(&self.hardware_profile())
    }

    pub fn device(&self) -> Device {
        let hardware = self.hardware_profile();
        let udid = DeviceFingerprint::from_profile(&hardware);
        tracing::debug!(udid = %udid, "Collected device info");
        Device {
            hardware,
            operating_system: self.build.software_info(),
            sim: self.telephony.as_deref().map(SimCardInfo::collect),
            udid,
        }
    }
}
