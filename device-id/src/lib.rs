//! Pseudo-unique device identifiers derived from hardware attributes.
//!
//! A [`HardwareProfile`] is folded through a 64-bit multiply-add combinator
//! ([`hash64`]) into a [`DeviceFingerprint`], rendered as a UUID-formatted
//! string. The collectors gather the profile from Android build properties or
//! the running host, network interfaces and telephony.

pub mod build_prop;
mod collector;
mod error;
mod fingerprint;
mod hardware;
pub mod hash64;
mod host;
pub mod network;
mod software;
pub mod telephony;

pub use build_prop::{BuildProps, Properties, load_string, load_string_with_encoding};
pub use collector::{BuildInfoSource, Device, DeviceCollector};
pub use error::{DeviceError, Result};
pub use fingerprint::{DeviceFingerprint, UDID_MULTIPLIER, UDID_SEED, udid};
pub use hardware::HardwareProfile;
pub use host::HostBuildInfo;
pub use network::{InterfaceFilter, InterfaceInfo, InterfaceSource, SystemInterfaces};
pub use software::{Platform, SoftwareInfo};
pub use telephony::{DataNetworkType, NoTelephony, SimCardInfo, SimCardStatus, TelephonyProvider};
