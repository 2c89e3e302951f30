//! Android system property files (`build.prop`, `default.prop`, asset
//! `.properties` files).
//!
//! The files use the Java properties format. [`Properties`] implements the
//! subset that real property files use: `=`, `:` or whitespace separators,
//! `#`/`!` comments, backslash line continuation and the standard escapes.
//! [`BuildProps`] maps the well-known `ro.*` keys onto the `android.os.Build`
//! fields a [`HardwareProfile`] is made of.

use crate::error::{DeviceError, Result};
use crate::hardware::HardwareProfile;
use crate::software::{Platform, SoftwareInfo};
use encoding_rs::Encoding;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default location of the system build properties on a device
pub const SYSTEM_BUILD_PROP: &str = "/system/build.prop";

/// Read a whole file and decode it with the given encoding label
/// (`"utf-8"`, `"gbk"`, `"shift_jis"`, ...).
///
/// A byte order mark, when present, overrides the label.
pub fn load_string_with_encoding<P: AsRef<Path>>(path: P, label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| DeviceError::UnknownEncoding(label.to_string()))?;
    let bytes = fs::read(path.as_ref())?;
    let (text, actual, had_errors) = encoding.decode(&bytes);
    if had_errors {
        tracing::warn!(
            "Malformed {} sequences in {}, replaced with U+FFFD",
            actual.name(),
            path.as_ref().display()
        );
    }
    Ok(text.into_owned())
}

/// Read a whole UTF-8 file.
pub fn load_string<P: AsRef<Path>>(path: P) -> Result<String> {
    load_string_with_encoding(path, "utf-8")
}

/// Parsed key/value pairs of a properties file. Later keys override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            entries.insert(unescape(key), unescape(value));
        }
        Self { entries }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::parse(&load_string(path)?))
    }

    pub fn load_with_encoding<P: AsRef<Path>>(path: P, label: &str) -> Result<Self> {
        Ok(Self::parse(&load_string_with_encoding(path, label)?))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value of `key`, treating a blank value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Join continuation lines and drop blank and comment lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let trimmed = raw.trim_start();
        let line = match current.take() {
            Some(mut pending) => {
                pending.push_str(trimmed);
                pending
            }
            None => {
                if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                    continue;
                }
                trimmed.to_string()
            }
        };

        // An odd number of trailing backslashes continues the line
        let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
        if trailing % 2 == 1 {
            let mut line = line;
            line.pop();
            current = Some(line);
        } else {
            lines.push(line);
        }
    }

    if let Some(pending) = current {
        lines.push(pending);
    }
    lines
}

/// Split a logical line at the first unescaped `=`, `:` or whitespace.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\x0c']);
    }
    (key, rest)
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    // Malformed escape, keep it verbatim
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Typed view of Android build properties.
#[derive(Debug, Clone, Default)]
pub struct BuildProps {
    props: Properties,
}

impl BuildProps {
    pub fn new(props: Properties) -> Self {
        Self { props }
    }

    pub fn parse(text: &str) -> Self {
        Self::new(Properties::parse(text))
    }

    /// Load and merge several property files. Later files override earlier ones.
    pub fn load_all<P: AsRef<Path>>(paths: &[P], encoding: &str) -> Result<Self> {
        let mut merged = BTreeMap::new();
        for path in paths {
            let props = Properties::load_with_encoding(path, encoding)?;
            merged.extend(props.entries);
        }
        Ok(Self::new(Properties { entries: merged }))
    }

    pub fn properties(&self) -> &Properties {
        &self.props
    }

    fn first(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .find_map(|k| self.props.get_non_empty(k))
            .map(str::to_string)
    }

    pub fn device(&self) -> Option<String> {
        self.first(&["ro.product.device"])
    }

    pub fn model(&self) -> Option<String> {
        self.first(&["ro.product.model"])
    }

    pub fn brand(&self) -> Option<String> {
        self.first(&["ro.product.brand"])
    }

    pub fn manufacturer(&self) -> Option<String> {
        self.first(&["ro.product.manufacturer"])
    }

    pub fn product(&self) -> Option<String> {
        self.first(&["ro.product.name"])
    }

    pub fn display(&self) -> Option<String> {
        self.first(&["ro.build.display.id"])
    }

    pub fn board(&self) -> Option<String> {
        self.first(&["ro.product.board"])
    }

    pub fn hardware(&self) -> Option<String> {
        self.first(&["ro.hardware", "ro.boot.hardware"])
    }

    /// `ro.product.cpu.abilist`, split on commas in declaration order
    pub fn supported_abis(&self) -> Option<Vec<String>> {
        let list = self.props.get_non_empty("ro.product.cpu.abilist")?;
        let abis: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|abi| !abi.is_empty())
            .map(str::to_string)
            .collect();
        (!abis.is_empty()).then_some(abis)
    }

    pub fn serial(&self) -> Option<String> {
        self.first(&["ro.serialno", "ro.boot.serialno"])
    }

    /// Hardware fields available from build properties alone.
    ///
    /// MAC addresses and telephony identifiers are left empty.
    pub fn hardware_profile(&self) -> HardwareProfile {
        HardwareProfile {
            device: self.device(),
            model: self.model(),
            brand: self.brand(),
            manufacturer: self.manufacturer(),
            product: self.product(),
            display: self.display(),
            board: self.board(),
            hardware: self.hardware(),
            supported_abis: self.supported_abis(),
            serial: self.serial(),
            ..Default::default()
        }
    }

    pub fn software_info(&self) -> SoftwareInfo {
        SoftwareInfo::new(
            Platform::Android,
            "Android",
            self.first(&["ro.build.version.release"]),
            "Google",
        )
        .with_build(self.first(&["ro.build.version.incremental"]))
        .with_patch(self.first(&["ro.build.version.security_patch"]))
        .with_code_name(self.first(&["ro.build.version.codename"]))
    }
}
