use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Android,
    Linux,
    Windows,
    MacOs,
    Other,
}

impl Platform {
    /// Platform of the running host
    pub fn current() -> Self {
        match std::env::consts::OS {
            "android" => Platform::Android,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Other,
        }
    }
}

/// Operating system information.
///
/// Never part of the UDID, so OS upgrades do not change the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareInfo {
    pub platform: Platform,
    pub name: String,
    /// Release version, e.g. "14"
    pub version: Option<String>,
    /// Incremental build number
    pub build: Option<String>,
    /// Security patch level
    pub patch: Option<String>,
    pub code_name: Option<String>,
    pub manufacturer: String,
    pub description: String,
}

impl SoftwareInfo {
    pub fn new(
        platform: Platform,
        name: &str,
        version: Option<String>,
        manufacturer: &str,
    ) -> Self {
        let description = match &version {
            Some(v) => format!("{} {} {}", manufacturer, name, v),
            None => format!("{} {}", manufacturer, name),
        };
        Self {
            platform,
            name: name.to_string(),
            version,
            build: None,
            patch: None,
            code_name: None,
            manufacturer: manufacturer.to_string(),
            description,
        }
    }

    pub fn with_build(mut self, build: Option<String>) -> Self {
        self.build = build;
        self
    }

    pub fn with_patch(mut self, patch: Option<String>) -> Self {
        self.patch = patch;
        self
    }

    pub fn with_code_name(mut self, code_name: Option<String>) -> Self {
        self.code_name = code_name;
        self
    }
}
