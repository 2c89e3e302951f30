use crate::error::{DeviceError, Result};
use crate::hardware::HardwareProfile;
use crate::hash64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Initial accumulator value
pub const UDID_SEED: u64 = 17;
/// Multiplier applied to every field
pub const UDID_MULTIPLIER: u64 = 3;

/// Pseudo-unique device identifier derived from a [`HardwareProfile`].
///
/// The 128 bits are carried in a [`Uuid`] purely for its text format. No
/// version or variant bits are set, so the value is not an RFC 4122 UUID and
/// must not be normalised into one: doing so would change every identifier
/// already issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceFingerprint(Uuid);

impl DeviceFingerprint {
    /// Derive the fingerprint of a hardware profile.
    ///
    /// The field order below is part of the identifier format. Reordering,
    /// adding or removing a field changes every fingerprint.
    pub fn from_profile(profile: &HardwareProfile) -> Self {
        let m = UDID_MULTIPLIER;
        let mut hash = UDID_SEED;
        hash = hash64::combine(hash, m, profile.device.as_deref());
        hash = hash64::combine(hash, m, profile.model.as_deref());
        hash = hash64::combine(hash, m, profile.brand.as_deref());
        hash = hash64::combine(hash, m, profile.manufacturer.as_deref());
        hash = hash64::combine(hash, m, profile.product.as_deref());
        hash = hash64::combine(hash, m, profile.display.as_deref());
        hash = hash64::combine(hash, m, profile.board.as_deref());
        hash = hash64::combine(hash, m, profile.hardware.as_deref());
        hash = hash64::combine_all(hash, m, profile.supported_abis.as_deref());
        hash = hash64::combine_all(hash, m, profile.mac_addresses.as_deref());
        hash = hash64::combine(hash, m, profile.imei.as_deref());
        hash = hash64::combine(hash, m, profile.meid.as_deref());

        let serial = hash64::hash(profile.serial.as_deref());
        Self::from_halves(hash, serial)
    }

    pub fn from_halves(high: u64, low: u64) -> Self {
        Self(Uuid::from_u64_pair(high, low))
    }

    /// Hardware hash half (everything except the serial number)
    pub fn high(&self) -> u64 {
        self.0.as_u64_pair().0
    }

    /// Serial number hash half
    pub fn low(&self) -> u64 {
        self.0.as_u64_pair().1
    }

    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Derive the UDID string of a hardware profile.
pub fn udid(profile: &HardwareProfile) -> String {
    DeviceFingerprint::from_profile(profile).to_string()
}

impl fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for DeviceFingerprint {
    type Err = DeviceError;

    /// Parse the canonical hyphenated form only.
    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 36 {
            return Err(DeviceError::InvalidFingerprint(s.to_string()));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| DeviceError::InvalidFingerprint(s.to_string()))
    }
}

impl Serialize for DeviceFingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceFingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_canonical(s: &str) -> bool {
        let groups: Vec<&str> = s.split('-').collect();
        groups.len() == 5
            && groups
                .iter()
                .zip([8, 4, 4, 4, 12])
                .all(|(g, len)| g.len() == len)
            && s.chars()
                .filter(|c| *c != '-')
                .all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[test]
    fn test_empty_profile_is_well_formed() {
        let fp = DeviceFingerprint::from_profile(&HardwareProfile::default());
        // 17 * 3^12 with every field hashing to zero
        assert_eq!(fp.high(), 9_034_497);
        assert_eq!(fp.low(), 0);
        assert_eq!(fp.to_string(), "00000000-0089-db01-0000-000000000000");
        assert!(is_canonical(&fp.to_string()));
    }

    #[test]
    fn test_halves_round_trip() {
        let fp = DeviceFingerprint::from_halves(0x0123_4567_89ab_cdef, 0xfedc_ba98_7654_3210);
        assert_eq!(fp.to_string(), "01234567-89ab-cdef-fedc-ba9876543210");
        assert_eq!(fp.high(), 0x0123_4567_89ab_cdef);
        assert_eq!(fp.low(), 0xfedc_ba98_7654_3210);
        assert_eq!(fp.as_u128(), 0x0123_4567_89ab_cdef_fedc_ba98_7654_3210);
    }

    #[test]
    fn test_no_version_bits_forced() {
        // A v4 formatter would rewrite nibble 13 to '4' and nibble 17 to 8..b
        let fp = DeviceFingerprint::from_halves(0, 0);
        assert_eq!(fp.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!("0123456789abcdeffedcba9876543210".parse::<DeviceFingerprint>().is_err());
        assert!("not-a-fingerprint".parse::<DeviceFingerprint>().is_err());

        let fp: DeviceFingerprint = "01234567-89ab-cdef-fedc-ba9876543210".parse().unwrap();
        assert_eq!(fp.low(), 0xfedc_ba98_7654_3210);
    }

    #[test]
    fn test_serializes_as_string() {
        let fp = DeviceFingerprint::from_halves(1, 2);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, "\"00000000-0000-0001-0000-000000000002\"");
        let back: DeviceFingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fp);
    }
}
