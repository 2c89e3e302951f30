use device_id::{Device, HostBuildInfo, InterfaceInfo, InterfaceSource, Result};
use device_probe::{Config, OutputFormat, probe};
use std::fs;
use tempfile::TempDir;

struct EmulatorInterfaces;

impl InterfaceSource for EmulatorInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>> {
        Ok(vec![
            InterfaceInfo {
                name: "lo".into(),
                mac: None,
                is_virtual: false,
            },
            InterfaceInfo {
                name: "wlan0".into(),
                mac: Some(vec![0x02, 0, 0, 0, 0, 0]),
                is_virtual: false,
            },
        ])
    }
}

fn write_props(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("build.prop");
    fs::write(
        &path,
        "ro.build.display.id=SE1A.220203.002.A1\n\
         ro.build.version.release=12\n\
         ro.product.device=sdk_gphone64\n\
         ro.product.model=sdk_gphone64_arm64\n\
         ro.product.brand=google\n\
         ro.product.manufacturer=Google\n\
         ro.product.name=sdk_gphone64_arm64\n\
         ro.product.board=goldfish_arm64\n\
         ro.hardware=ranchu\n\
         ro.product.cpu.abilist=arm64-v8a,armeabi-v7a\n\
         ro.serialno=EMULATOR31X\n",
    )
    .unwrap();
    path
}

#[test]
fn test_probe_emulator_build_props() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        build_prop_paths: vec![write_props(&dir)],
        ..Config::default()
    };

    let device = probe::collect_with(&config, EmulatorInterfaces).unwrap();
    // Only the placeholder MAC is reported, so the list is empty
    assert_eq!(device.hardware.mac_addresses, Some(vec![]));
    assert_eq!(
        probe::render(&device, OutputFormat::Udid).unwrap(),
        "82e54b45-687e-01ac-0a37-53ad581066b2"
    );

    let json = probe::render(&device, OutputFormat::Json).unwrap();
    let parsed: Device = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.operating_system.description, "Google Android 12");
}

#[test]
fn test_missing_props_fall_back_to_host() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        build_prop_paths: vec![dir.path().join("absent.prop")],
        ..Config::default()
    };

    let device = probe::collect_with(&config, EmulatorInterfaces).unwrap();
    let host = HostBuildInfo::detect().hardware_profile();
    assert_eq!(device.hardware.hardware, host.hardware);
    assert_eq!(device.hardware.serial, host.serial);
}

#[test]
fn test_unknown_encoding_is_reported() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        build_prop_paths: vec![write_props(&dir)],
        prop_encoding: "klingon".into(),
        ..Config::default()
    };

    let err = probe::collect_with(&config, EmulatorInterfaces).unwrap_err();
    assert!(format!("{:#}", err).contains("klingon"));
}
