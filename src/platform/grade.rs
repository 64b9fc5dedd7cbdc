use std::fmt;

use serde::Serialize;

/// Coarse capability tier of the device.
///
/// `A` is full capability; `B` and `C` flag older engines that consumers
/// may want to treat with reduced effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    #[default]
    A,
    B,
    C,
}

impl Grade {
    /// Grade for a resolved platform name and numeric version.
    ///
    /// Only Android below 4.4 is downgraded: `B` from 4.0, `C` below that.
    pub fn for_platform(name: &str, version: f64) -> Self {
        if name != "android" || version >= 4.4 {
            Grade::A
        } else if version < 4.0 {
            Grade::C
        } else {
            Grade::B
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "a",
            Grade::B => "b",
            Grade::C => "c",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
