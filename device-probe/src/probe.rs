use crate::config::{Config, OutputFormat};
use anyhow::Context;
use device_id::{
    BuildInfoSource, BuildProps, Device, DeviceCollector, HostBuildInfo, InterfaceSource,
    SystemInterfaces,
};

/// Collect a device snapshot from the running system.
///
/// Build properties are read from the configured files when any exist,
/// otherwise the host is described through `sysinfo`.
pub fn collect(config: &Config) -> anyhow::Result<Device> {
    collect_with(config, SystemInterfaces)
}

pub fn collect_with<I: InterfaceSource>(
    config: &Config,
    interfaces: I,
) -> anyhow::Result<Device> {
    let paths = config.existing_build_props();
    if paths.is_empty() {
        tracing::info!("No build properties found, describing the host");
        return Ok(collect_from(HostBuildInfo::detect(), interfaces, config));
    }

    tracing::info!("Loading build properties from {:?}", paths);
    let build = BuildProps::load_all(&paths, &config.prop_encoding)
        .with_context(|| format!("Failed to load build properties from {:?}", paths))?;
    Ok(collect_from(build, interfaces, config))
}

fn collect_from<B: BuildInfoSource, I: InterfaceSource>(
    build: B,
    interfaces: I,
    config: &Config,
) -> Device {
    DeviceCollector::with_interfaces(build, interfaces)
        .with_interface_filter(config.interface_filter)
        .device()
}

/// Render the snapshot in the configured output format
pub fn render(device: &Device, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(device).context("Failed to serialize device info")
        }
        OutputFormat::Udid => Ok(device.udid.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use device_id::{InterfaceInfo, Result};

    struct NoInterfaces;

    impl InterfaceSource for NoInterfaces {
        fn interfaces(&self) -> Result<Vec<InterfaceInfo>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_render_udid_only() {
        let config = Config {
            build_prop_paths: Vec::new(),
            ..Config::default()
        };
        let device = collect_with(&config, NoInterfaces).unwrap();
        let out = render(&device, OutputFormat::Udid).unwrap();
        assert_eq!(out.len(), 36);
        assert_eq!(out, device.udid.to_string());
    }

    #[test]
    fn test_render_json() {
        let config = Config {
            build_prop_paths: Vec::new(),
            ..Config::default()
        };
        let device = collect_with(&config, NoInterfaces).unwrap();
        let out = render(&device, OutputFormat::Json).unwrap();
        let parsed: Device = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, device);
    }
}
