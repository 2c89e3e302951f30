use crate::hardware::HardwareProfile;
use crate::software::{Platform, SoftwareInfo};
use std::fs;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

const MACHINE_ID_FILE: &str = "/etc/machine-id";
const DMI_DIR: &str = "/sys/class/dmi/id";

/// Build information of a non-Android host, read through `sysinfo`.
///
/// Only hardware attributes enter the profile, so renaming the machine or
/// upgrading the OS keeps its UDID:
///
/// | profile field | host source |
/// |---------------|-------------|
/// | device | DMI product name (Linux) |
/// | model | CPU brand |
/// | brand | CPU vendor id |
/// | manufacturer | DMI system vendor (Linux) |
/// | product | DMI product family (Linux) |
/// | board | DMI board name (Linux) |
/// | hardware, supported ABIs | CPU architecture reported at runtime |
/// | serial | `/etc/machine-id` |
///
/// The machine id is written once at install time; reinstalling the OS
/// changes the low half of the UDID only.
#[derive(Debug, Clone, Default)]
pub struct HostBuildInfo {
    product_name: Option<String>,
    sys_vendor: Option<String>,
    product_family: Option<String>,
    board: Option<String>,
    cpu_brand: Option<String>,
    cpu_vendor: Option<String>,
    cpu_arch: Option<String>,
    os_name: Option<String>,
    os_version: Option<String>,
    kernel_version: Option<String>,
    distribution: Option<String>,
    machine_id: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_trimmed(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => non_empty(Some(content)),
        Err(e) => {
            tracing::debug!("Failed to read {}: {}", path, e);
            None
        }
    }
}

fn read_dmi(field: &str) -> Option<String> {
    read_trimmed(&format!("{}/{}", DMI_DIR, field))
}

impl HostBuildInfo {
    /// Query the running host.
    pub fn detect() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
        );

        // Use first CPU as representative
        let (cpu_brand, cpu_vendor) = match sys.cpus().first() {
            Some(cpu) => (
                non_empty(Some(cpu.brand().to_string())),
                non_empty(Some(cpu.vendor_id().to_string())),
            ),
            None => (None, None),
        };

        Self {
            product_name: read_dmi("product_name"),
            sys_vendor: read_dmi("sys_vendor"),
            product_family: read_dmi("product_family"),
            board: read_dmi("board_name"),
            cpu_brand,
            cpu_vendor,
            cpu_arch: non_empty(Some(System::cpu_arch())),
            os_name: non_empty(System::name()),
            os_version: non_empty(System::os_version()),
            kernel_version: non_empty(System::kernel_version()),
            distribution: non_empty(Some(System::distribution_id())),
            machine_id: read_trimmed(MACHINE_ID_FILE),
        }
    }

    pub fn hardware_profile(&self) -> HardwareProfile {
        HardwareProfile {
            device: self.product_name.clone(),
            model: self.cpu_brand.clone(),
            brand: self.cpu_vendor.clone(),
            manufacturer: self.sys_vendor.clone(),
            product: self.product_family.clone(),
            display: None,
            board: self.board.clone(),
            hardware: self.cpu_arch.clone(),
            supported_abis: self.cpu_arch.clone().map(|arch| vec![arch]),
            serial: self.machine_id.clone(),
            ..Default::default()
        }
    }

    pub fn software_info(&self) -> SoftwareInfo {
        let platform = Platform::current();
        let manufacturer = match platform {
            Platform::Windows => "Microsoft",
            Platform::MacOs => "Apple",
            Platform::Android => "Google",
            _ => self.distribution.as_deref().unwrap_or("Unknown"),
        };
        SoftwareInfo::new(
            platform,
            self.os_name.as_deref().unwrap_or("Unknown"),
            self.os_version.clone(),
            manufacturer,
        )
        .with_build(self.kernel_version.clone())
    }
}
