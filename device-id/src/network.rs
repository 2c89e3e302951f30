use crate::error::{DeviceError, Result};
use regex::Regex;
use std::net::{Ipv4Addr, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::LazyLock;
use std::time::Duration;
use sysinfo::{MacAddr, Networks};

/// Placeholder address reported by Android to apps without hardware id access
pub const FAKE_MAC_ADDRESS: &str = "02:00:00:00:00:00";

static ETHERNET_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(?i)(eth|en)\d*$").ok());
static WIFI_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^(?i)wlan\d*$").ok());

/// A network interface as seen by the collector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    /// Hardware address, `None` when it cannot be read
    pub mac: Option<Vec<u8>>,
    pub is_virtual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterfaceFilter {
    /// Every non-virtual interface
    #[default]
    NonVirtual,
    /// Non-virtual interfaces named `^(?i)(eth|en)\d*$`
    Ethernet,
    /// Non-virtual interfaces named `^(?i)wlan\d*$`
    Wifi,
}

impl InterfaceFilter {
    pub fn accept(&self, interface: &InterfaceInfo) -> bool {
        if interface.is_virtual {
            return false;
        }
        match self.name_pattern() {
            None => true,
            Some(pattern) => pattern
                .as_ref()
                .is_some_and(|re| re.is_match(&interface.name)),
        }
    }

    /// Interface name pattern, `None` when every name is accepted
    fn name_pattern(&self) -> Option<&'static Option<Regex>> {
        match self {
            InterfaceFilter::NonVirtual => None,
            InterfaceFilter::Ethernet => Some(&*ETHERNET_NAME),
            InterfaceFilter::Wifi => Some(&*WIFI_NAME),
        }
    }
}

/// Format a hardware address as upper-case, colon separated hex.
pub fn format_mac_address(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// MAC addresses of the interfaces accepted by `filter`, sorted ascending.
///
/// Interfaces whose hardware address cannot be read, or that report
/// [`FAKE_MAC_ADDRESS`], are skipped.
pub fn mac_addresses(interfaces: &[InterfaceInfo], filter: InterfaceFilter) -> Vec<String> {
    let mut result = Vec::new();
    for interface in interfaces.iter().filter(|i| filter.accept(i)) {
        let Some(bytes) = interface.mac.as_deref() else {
            tracing::warn!(
                "Can't get the hardware MAC address of the network interface: {}",
                interface.name
            );
            continue;
        };
        let mac = format_mac_address(bytes);
        if mac == FAKE_MAC_ADDRESS {
            tracing::warn!(
                "The hardware MAC address of the network interface {} is fake: {}",
                interface.name,
                mac
            );
            continue;
        }
        result.push(mac);
    }
    result.sort();
    result
}

/// Source of network interfaces
pub trait InterfaceSource {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>>;
}

/// Interfaces of the running system, enumerated through `sysinfo`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> Result<Vec<InterfaceInfo>> {
        let networks = Networks::new_with_refreshed_list();
        let mut interfaces: Vec<InterfaceInfo> = networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceInfo {
                name: name.clone(),
                mac: readable_mac(data.mac_address()),
                is_virtual: is_virtual_interface(name),
            })
            .collect();
        if interfaces.is_empty() {
            return Err(DeviceError::Interfaces(
                "no network interfaces reported".into(),
            ));
        }
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }
}

/// Loopback and tunnels report an all-zero address, which reads as unreadable.
fn readable_mac(mac: MacAddr) -> Option<Vec<u8>> {
    (!mac.is_unspecified()).then(|| mac.0.to_vec())
}

#[cfg(target_os = "linux")]
fn is_virtual_interface(name: &str) -> bool {
    std::path::Path::new("/sys/devices/virtual/net").join(name).exists() || name.contains(':')
}

#[cfg(not(target_os = "linux"))]
fn is_virtual_interface(name: &str) -> bool {
    name.contains(':')
}

/// Sorted MAC addresses from `source`, or `None` when enumeration fails.
pub fn collect_mac_addresses<S: InterfaceSource + ?Sized>(
    source: &S,
    filter: InterfaceFilter,
) -> Option<Vec<String>> {
    match source.interfaces() {
        Ok(interfaces) => Some(mac_addresses(&interfaces, filter)),
        Err(e) => {
            tracing::error!("Failed to get the {:?} MAC addresses: {}", filter, e);
            None
        }
    }
}

/// Format an IPv4 address packed little-endian into an integer, as Android
/// `WifiInfo.getIpAddress()` returns it.
pub fn format_ipv4(ip: u32) -> String {
    Ipv4Addr::from(ip.to_le_bytes()).to_string()
}

/// Check whether `host:port` accepts a TCP connection within `timeout`.
pub fn ping_host(host: &str, port: u16, timeout: Duration) -> bool {
    tracing::info!("Connecting to {}:{}...", host, port);
    let addrs: Vec<SocketAddr> = match (host, port).to_socket_addrs() {
        Ok(addrs) => addrs.collect(),
        Err(e) => {
            tracing::error!("Connect to {}:{} failed: {}", host, port, e);
            return false;
        }
    };

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(_) => {
                tracing::info!("Connect to {}:{} success.", host, port);
                return true;
            }
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(e) => tracing::error!("Connect to {}:{} failed: {}", host, port, e),
        None => tracing::error!("Connect to {}:{} failed: no address resolved", host, port),
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn iface(name: &str, mac: Option<[u8; 6]>, is_virtual: bool) -> InterfaceInfo {
        InterfaceInfo {
            name: name.to_string(),
            mac: mac.map(|m| m.to_vec()),
            is_virtual,
        }
    }

    fn sample() -> Vec<InterfaceInfo> {
        vec![
            iface("wlan0", Some([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x02]), false),
            iface("eth0", Some([0x10, 0x20, 0x30, 0x40, 0x50, 0x60]), false),
            iface("lo", None, false),
            iface("dummy0", Some([0x02, 0, 0, 0, 0, 0]), false),
            iface("veth1", Some([0x0e, 0x0e, 0x0e, 0x0e, 0x0e, 0x0e]), true),
            iface("WLAN1", Some([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]), false),
        ]
    }

    #[test]
    fn test_format_mac_address() {
        assert_eq!(
            format_mac_address(&[0x0a, 0x1b, 0xff, 0x00, 0x09, 0x80]),
            "0A:1B:FF:00:09:80"
        );
        assert_eq!(format_mac_address(&[]), "");
    }

    #[test]
    fn test_non_virtual_sorted_and_filtered() {
        let macs = mac_addresses(&sample(), InterfaceFilter::NonVirtual);
        assert_eq!(
            macs,
            vec![
                "00:11:22:33:44:55".to_string(),
                "10:20:30:40:50:60".to_string(),
                "AA:BB:CC:00:00:02".to_string(),
            ]
        );
    }

    #[test]
    fn test_order_of_enumeration_is_irrelevant() {
        let mut reversed = sample();
        reversed.reverse();
        assert_eq!(
            mac_addresses(&reversed, InterfaceFilter::NonVirtual),
            mac_addresses(&sample(), InterfaceFilter::NonVirtual)
        );
    }

    #[test]
    fn test_name_filters() {
        assert_eq!(
            mac_addresses(&sample(), InterfaceFilter::Wifi),
            vec!["00:11:22:33:44:55".to_string(), "AA:BB:CC:00:00:02".to_string()]
        );
        assert_eq!(
            mac_addresses(&sample(), InterfaceFilter::Ethernet),
            vec!["10:20:30:40:50:60".to_string()]
        );

        let named = |name: &str| iface(name, Some([0x10, 0, 0, 0, 0, 1]), false);
        assert!(InterfaceFilter::Ethernet.accept(&named("en")));
        assert!(InterfaceFilter::Ethernet.accept(&named("ETH12")));
        assert!(!InterfaceFilter::Ethernet.accept(&named("eno1")));
        assert!(!InterfaceFilter::Ethernet.accept(&named("ethx")));
        assert!(InterfaceFilter::Wifi.accept(&named("Wlan3")));
        assert!(!InterfaceFilter::Wifi.accept(&named("wlan0x")));
        assert!(!InterfaceFilter::Wifi.accept(&iface("wlan0", None, true)));
    }

    #[test]
    fn test_alias_interfaces_are_virtual() {
        assert!(is_virtual_interface("eth0:1"));
        assert!(is_virtual_interface("wlan0:ap"));
        assert!(!is_virtual_interface("nosuch0"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_loopback_is_virtual_on_linux() {
        if std::path::Path::new("/sys/devices/virtual/net/lo").exists() {
            assert!(is_virtual_interface("lo"));
        }
    }

    #[test]
    fn test_all_zero_mac_is_unreadable() {
        assert_eq!(readable_mac(MacAddr::UNSPECIFIED), None);
        assert_eq!(
            readable_mac(MacAddr([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01])),
            Some(vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01])
        );
    }

    #[test]
    fn test_only_fake_address_yields_empty_list() {
        let interfaces = vec![iface("wlan0", Some([0x02, 0, 0, 0, 0, 0]), false)];
        assert!(mac_addresses(&interfaces, InterfaceFilter::NonVirtual).is_empty());
    }

    struct Failing;

    impl InterfaceSource for Failing {
        fn interfaces(&self) -> Result<Vec<InterfaceInfo>> {
            Err(DeviceError::Interfaces("permission denied".into()))
        }
    }

    #[test]
    fn test_enumeration_failure_reads_as_none() {
        assert_eq!(collect_mac_addresses(&Failing, InterfaceFilter::NonVirtual), None);
    }

    #[test]
    fn test_format_ipv4() {
        assert_eq!(format_ipv4(0x0100_A8C0), "192.168.0.1");
        assert_eq!(format_ipv4(0), "0.0.0.0");
        assert_eq!(format_ipv4(u32::MAX), "255.255.255.255");
    }

    #[test]
    fn test_ping_host() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(ping_host("127.0.0.1", port, Duration::from_secs(1)));

        drop(listener);
        assert!(!ping_host("127.0.0.1", port, Duration::from_millis(200)));
    }
}
