//! Version parsing for platform detection.
//!
//! Versions are kept as a single float combining major and minor
//! (`"7.1"` -> `7.1`). Only two components are ever looked at, so
//! `"4.4.2"` becomes `4.4` and a two-digit minor such as `"4.10"` reads
//! back as `4.1`.

use std::sync::LazyLock;

use regex::Regex;

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid regex")
});

static ANDROID_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Android ([0-9]+).([0-9]+)?").expect("valid regex"));

static IOS_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"OS ([0-9]+)_([0-9]+)?").expect("valid regex"));

/// Parse the longest numeric prefix of `s` as a float.
///
/// Trailing garbage is ignored (`"4.2 beta"` -> `4.2`); a string without
/// a leading number yields `None`.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(s)
        .and_then(|m| m.as_str().trim_start().parse().ok())
}

/// Version from a bridge-reported dotted string, or `None` if it does not
/// start with a number.
pub fn parse_descriptor_version(raw: &str) -> Option<f64> {
    let mut parts = raw.split('.');
    let major = parts.next().unwrap_or_default();
    let minor = parts.next().unwrap_or("0");
    parse_float_prefix(&format!("{}.{}", major, minor))
}

/// Version matched out of the raw signature for a known platform name.
///
/// Returns `None` for unknown platforms and signatures without a match.
pub fn parse_signature_version(platform: &str, user_agent: &str) -> Option<f64> {
    let pattern = match platform {
        "android" => &*ANDROID_VERSION,
        "ios" => &*IOS_VERSION,
        _ => return None,
    };

    let caps = pattern.captures(user_agent)?;
    let major = caps.get(1)?.as_str();
    match caps.get(2) {
        Some(minor) => parse_float_prefix(&format!("{}.{}", major, minor.as_str())),
        None => parse_float_prefix(major),
    }
}

/// The `<major>` and `<major>_<minor>` suffixes for a non-zero version.
pub fn version_suffixes(version: f64) -> (String, String) {
    let rendered = version.to_string();
    let full = if rendered.find('.').is_some_and(|i| i > 0) {
        rendered.replacen('.', "_", 1)
    } else {
        format!("{}_0", rendered)
    };
    let major = full.split('_').next().unwrap_or_default().to_string();
    (major, full)
}
