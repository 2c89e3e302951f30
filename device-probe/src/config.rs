use device_id::InterfaceFilter;
use std::path::PathBuf;
use std::time::Duration;

/// What the probe prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full device snapshot as pretty JSON
    Json,
    /// UDID only
    Udid,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "udid" => Some(OutputFormat::Udid),
            _ => None,
        }
    }
}

/// Probe configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BUILD_PROP_PATH | /system/build.prop | Comma separated property files, later files override earlier ones |
/// | PROP_ENCODING | utf-8 | Character encoding of the property files |
/// | INTERFACE_FILTER | all | MAC addresses to include: all, ethernet, wifi |
/// | OUTPUT_FORMAT | json | json or udid |
/// | LOG_LEVEL | info | tracing filter directive |
/// | LOG_DIR | - | Daily rolling log files are written here when set |
/// | PING_HOST | - | Host to probe for reachability |
/// | PING_PORT | 443 | Port to probe |
/// | PING_TIMEOUT_MS | 3000 | Connect timeout (milliseconds) |
///
/// When none of the property files exist the host is described through
/// `sysinfo` instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub build_prop_paths: Vec<PathBuf>,
    pub prop_encoding: String,
    pub interface_filter: InterfaceFilter,
    pub output_format: OutputFormat,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub ping_host: Option<String>,
    pub ping_port: u16,
    pub ping_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let build_prop_paths = lookup("BUILD_PROP_PATH")
            .unwrap_or_else(|| device_id::build_prop::SYSTEM_BUILD_PROP.into())
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();

        let interface_filter = match lookup("INTERFACE_FILTER")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("ethernet") => InterfaceFilter::Ethernet,
            Some("wifi") => InterfaceFilter::Wifi,
            _ => InterfaceFilter::NonVirtual,
        };

        Self {
            build_prop_paths,
            prop_encoding: lookup("PROP_ENCODING").unwrap_or_else(|| "utf-8".into()),
            interface_filter,
            output_format: lookup("OUTPUT_FORMAT")
                .and_then(|v| OutputFormat::parse(&v))
                .unwrap_or(OutputFormat::Json),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: lookup("LOG_DIR").filter(|d| !d.trim().is_empty()),
            ping_host: lookup("PING_HOST").filter(|h| !h.trim().is_empty()),
            ping_port: lookup("PING_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(443),
            ping_timeout_ms: lookup("PING_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }

    /// Property files that exist on this system
    pub fn existing_build_props(&self) -> Vec<PathBuf> {
        self.build_prop_paths
            .iter()
            .filter(|p| p.is_file())
            .cloned()
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.build_prop_paths, vec![PathBuf::from("/system/build.prop")]);
        assert_eq!(config.prop_encoding, "utf-8");
        assert_eq!(config.interface_filter, InterfaceFilter::NonVirtual);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert!(config.ping_host.is_none());
        assert_eq!(config.ping_port, 443);
        assert_eq!(config.ping_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("BUILD_PROP_PATH", "/system/build.prop, /vendor/build.prop,"),
            ("PROP_ENCODING", "gbk"),
            ("INTERFACE_FILTER", "WiFi"),
            ("OUTPUT_FORMAT", "UDID"),
            ("PING_HOST", "example.com"),
            ("PING_PORT", "not-a-port"),
            ("PING_TIMEOUT_MS", "250"),
        ]);
        let config = Config::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(
            config.build_prop_paths,
            vec![
                PathBuf::from("/system/build.prop"),
                PathBuf::from("/vendor/build.prop")
            ]
        );
        assert_eq!(config.prop_encoding, "gbk");
        assert_eq!(config.interface_filter, InterfaceFilter::Wifi);
        assert_eq!(config.output_format, OutputFormat::Udid);
        assert_eq!(config.ping_host.as_deref(), Some("example.com"));
        assert_eq!(config.ping_port, 443, "Invalid port falls back to default");
        assert_eq!(config.ping_timeout(), Duration::from_millis(250));
    }
}
