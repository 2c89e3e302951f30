//! SIM card and telephony identifiers.
//!
//! A [`TelephonyProvider`] wraps the platform telephony service. Its queries
//! return `Ok(None)` when a value is absent and `Err` when the query itself
//! failed (missing permission, radio off, ...). The free functions here log
//! failures and flatten both cases to `None`, which is what the UDID
//! derivation expects.

use crate::error::Result;
use serde::{Deserialize, Serialize};

pub trait TelephonyProvider {
    fn imei(&self) -> Result<Option<String>>;
    fn meid(&self) -> Result<Option<String>>;
    /// SIM serial number
    fn iccid(&self) -> Result<Option<String>>;
    /// Subscriber id
    fn imsi(&self) -> Result<Option<String>>;
    fn operator_name(&self) -> Result<Option<String>>;
    /// MCC+MNC of the SIM provider, e.g. "46000"
    fn sim_operator(&self) -> Result<Option<String>>;
    fn country_iso(&self) -> Result<Option<String>>;
    fn line1_number(&self) -> Result<Option<String>>;
    /// Raw `SIM_STATE_*` code
    fn sim_state(&self) -> Result<i32>;
    /// Raw `NETWORK_TYPE_*` code
    fn data_network_type(&self) -> Result<i32>;
}

/// Provider for devices without telephony hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTelephony;

impl TelephonyProvider for NoTelephony {
    fn imei(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn meid(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn iccid(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn imsi(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn operator_name(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn sim_operator(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn country_iso(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn line1_number(&self) -> Result<Option<String>> {
        Ok(None)
    }
    fn sim_state(&self) -> Result<i32> {
        Ok(SimCardStatus::Absent.code())
    }
    fn data_network_type(&self) -> Result<i32> {
        Ok(DataNetworkType::Unknown.code())
    }
}

fn logged<T>(what: &str, result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to get the {}: {}", what, e);
            None
        }
    }
}

pub fn imei<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    logged("IMEI of the SIM card slot", tm.imei())
}

pub fn meid<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    logged("MEID of the SIM card slot", tm.meid())
}

pub fn iccid<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    logged("ICCID of the SIM card", tm.iccid())
}

pub fn imsi<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    logged("IMSI of the SIM card", tm.imsi())
}

/// Operator display name, falling back to the name derived from the MCC+MNC.
pub fn operator<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    match logged("operator name of the SIM card", tm.operator_name()) {
        Some(name) if !name.is_empty() => Some(name),
        _ => logged("operator of the SIM card", tm.sim_operator())
            .map(|code| operator_name_by_mnc(&code).to_string()),
    }
}

/// Well-known carrier names of mainland China MCC+MNC codes; other codes are
/// returned unchanged.
pub fn operator_name_by_mnc(code: &str) -> &str {
    match code {
        "46000" | "46002" | "46007" => "中国移动",
        "46001" => "中国联通",
        "46003" => "中国电信",
        other => other,
    }
}

pub fn country_code<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    logged("country of the SIM card", tm.country_iso())
        .filter(|code| !code.is_empty())
        .map(|code| code.to_uppercase())
}

pub fn phone_number<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<String> {
    logged("phone number of the SIM card", tm.line1_number()).filter(|n| !n.is_empty())
}

pub fn status<T: TelephonyProvider + ?Sized>(tm: &T) -> SimCardStatus {
    match tm.sim_state() {
        Ok(code) => SimCardStatus::from_code(code),
        Err(e) => {
            tracing::error!("Failed to get the state of the SIM card: {}", e);
            SimCardStatus::Unknown
        }
    }
}

pub fn is_ready<T: TelephonyProvider + ?Sized>(tm: &T) -> bool {
    status(tm) == SimCardStatus::Ready
}

pub fn network_type<T: TelephonyProvider + ?Sized>(tm: &T) -> Option<DataNetworkType> {
    match tm.data_network_type() {
        Ok(code) => Some(DataNetworkType::from_code(code)),
        Err(e) => {
            tracing::error!("Failed to get the data network type of the SIM card: {}", e);
            None
        }
    }
}

/// Android `TelephonyManager.SIM_STATE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimCardStatus {
    Unknown,
    Absent,
    PinRequired,
    PukRequired,
    NetworkLocked,
    Ready,
    NotReady,
    PermDisabled,
    CardIoError,
    CardRestricted,
}

impl SimCardStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => SimCardStatus::Absent,
            2 => SimCardStatus::PinRequired,
            3 => SimCardStatus::PukRequired,
            4 => SimCardStatus::NetworkLocked,
            5 => SimCardStatus::Ready,
            6 => SimCardStatus::NotReady,
            7 => SimCardStatus::PermDisabled,
            8 => SimCardStatus::CardIoError,
            9 => SimCardStatus::CardRestricted,
            _ => SimCardStatus::Unknown,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            SimCardStatus::Unknown => 0,
            SimCardStatus::Absent => 1,
            SimCardStatus::PinRequired => 2,
            SimCardStatus::PukRequired => 3,
            SimCardStatus::NetworkLocked => 4,
            SimCardStatus::Ready => 5,
            SimCardStatus::NotReady => 6,
            SimCardStatus::PermDisabled => 7,
            SimCardStatus::CardIoError => 8,
            SimCardStatus::CardRestricted => 9,
        }
    }
}

/// Android `TelephonyManager.NETWORK_TYPE_*`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataNetworkType {
    Unknown,
    Gprs,
    Edge,
    Umts,
    Cdma,
    #[serde(rename = "EVDO_0")]
    Evdo0,
    #[serde(rename = "EVDO_A")]
    EvdoA,
    #[serde(rename = "ONE_X_RTT")]
    OneXRtt,
    Hsdpa,
    Hsupa,
    Hspa,
    Iden,
    #[serde(rename = "EVDO_B")]
    EvdoB,
    Lte,
    Ehrpd,
    Hspap,
    Gsm,
    TdScdma,
    Iwlan,
}

impl DataNetworkType {
    const BY_CODE: [DataNetworkType; 19] = [
        DataNetworkType::Unknown,
        DataNetworkType::Gprs,
        DataNetworkType::Edge,
        DataNetworkType::Umts,
        DataNetworkType::Cdma,
        DataNetworkType::Evdo0,
        DataNetworkType::EvdoA,
        DataNetworkType::OneXRtt,
        DataNetworkType::Hsdpa,
        DataNetworkType::Hsupa,
        DataNetworkType::Hspa,
        DataNetworkType::Iden,
        DataNetworkType::EvdoB,
        DataNetworkType::Lte,
        DataNetworkType::Ehrpd,
        DataNetworkType::Hspap,
        DataNetworkType::Gsm,
        DataNetworkType::TdScdma,
        DataNetworkType::Iwlan,
    ];

    pub fn from_code(code: i32) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::BY_CODE.get(i).copied())
            .unwrap_or(DataNetworkType::Unknown)
    }

    pub fn code(&self) -> i32 {
        Self::BY_CODE
            .iter()
            .position(|t| t == self)
            .map(|i| i as i32)
            .unwrap_or(0)
    }
}

/// SIM card details that are not part of the UDID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimCardInfo {
    pub iccid: Option<String>,
    pub imsi: Option<String>,
    pub operator: Option<String>,
    pub country: Option<String>,
    pub status: SimCardStatus,
    pub network_type: Option<DataNetworkType>,
    pub phone_number: Option<String>,
}

impl SimCardInfo {
    pub fn collect<T: TelephonyProvider + ?Sized>(tm: &T) -> Self {
        Self {
            iccid: iccid(tm),
            imsi: imsi(tm),
            operator: operator(tm),
            country: country_code(tm),
            status: status(tm),
            network_type: network_type(tm),
            phone_number: phone_number(tm),
        }
    }
}
