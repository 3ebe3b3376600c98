//! Parameter metadata for host automation and display.
//!
//! Each parameter is described by a [`ParamDescriptor`] containing metadata for
//! display, validation, and plugin host communication. Parameters also carry:
//!
//! - [`ParamId`]: stable numeric ID for automation recording and state persistence
//! - [`ParamFlags`]: capability flags for plugin hosts (automatable, stepped, etc.)
//! - `string_id`: human-readable stable ID used as the key in saved state and presets
//! - `group`: parameter grouping for host tree display
//!
//! # Example
//!
//! ```rust
//! use sala_core::{ParamDescriptor, ParamId};
//!
//! let desc = ParamDescriptor::unit_float("Size", "Size", 0.5).with_id(ParamId(1500), "size");
//! assert_eq!(desc.clamp(2.0), 1.0);
//! assert_eq!(desc.format_value(0.25), "25%");
//! assert_eq!(desc.parse_value("40%"), Some(0.4));
//! ```

use alloc::format;
use alloc::string::String;

/// Stable parameter identifier that survives reordering.
///
/// Maps directly to CLAP `clap_id`. Once assigned, a `ParamId` must never
/// change for a given parameter.
///
/// # Convention
///
/// The reverb occupies 1500 upward: size 1500, damp 1501, width 1502,
/// mix 1503, freeze 1504.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParamId(pub u32);

/// Parameter capability flags for plugin host communication.
///
/// Bitflag type that maps to CLAP `clap_param_info_flags`. Use
/// [`union`](Self::union) to combine.
///
/// # Example
///
/// ```rust
/// use sala_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::HIDDEN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (toggles, enums).
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter should be hidden from generic host UI.
    pub const HIDDEN: Self = Self(1 << 2);
    /// Parameter is read-only (metering, display only).
    pub const READ_ONLY: Self = Self(1 << 3);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamUnit {
    /// A 0–1 fraction shown as a percentage.
    Percent,
    /// On/off toggle stored as 0.0 or 1.0.
    Boolean,
    /// No unit, shown with two decimals.
    None,
}

impl ParamUnit {
    /// Display suffix for this unit.
    ///
    /// ```rust
    /// use sala_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Percent.suffix(), "%");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Percent => "%",
            ParamUnit::Boolean | ParamUnit::None => "",
        }
    }
}

/// Metadata describing one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display.
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Default value when the processor is created.
    pub default: f32,
    /// Recommended step increment for encoder-based control.
    pub step: f32,
    /// Stable numeric ID for host automation and state.
    pub id: ParamId,
    /// Stable string ID, the key used in saved state and presets.
    pub string_id: &'static str,
    /// Capability flags for plugin host communication.
    pub flags: ParamFlags,
    /// Parameter group for host tree display. Empty means top-level.
    pub group: &'static str,
}

impl ParamDescriptor {
    /// A continuous 0–1 parameter shown as a percentage.
    pub const fn unit_float(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// An on/off toggle.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Boolean,
            min: 0.0,
            max: 1.0,
            default: if default { 1.0 } else { 0.0 },
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            group: "",
        }
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Clamps a value to this parameter's valid range. NaN maps to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Human-readable text for a plain value.
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Percent => format!("{:.0}%", value * 100.0),
            ParamUnit::Boolean => String::from(if value >= 0.5 { "On" } else { "Off" }),
            ParamUnit::None => format!("{value:.2}"),
        }
    }

    /// Parse text typed by a user back into a clamped plain value.
    ///
    /// Accepts what [`format_value`](Self::format_value) produces, plus bare
    /// numbers in plain units.
    pub fn parse_value(&self, text: &str) -> Option<f32> {
        let text = text.trim();
        let value = match self.unit {
            ParamUnit::Percent => match text.strip_suffix('%') {
                Some(percent) => percent.trim().parse::<f32>().ok()? / 100.0,
                None => text.parse::<f32>().ok()?,
            },
            ParamUnit::Boolean => {
                if text.eq_ignore_ascii_case("on") || text.eq_ignore_ascii_case("true") {
                    1.0
                } else if text.eq_ignore_ascii_case("off") || text.eq_ignore_ascii_case("false") {
                    0.0
                } else {
                    let raw = text.parse::<f32>().ok()?;
                    if raw >= 0.5 { 1.0 } else { 0.0 }
                }
            }
            ParamUnit::None => text.parse::<f32>().ok()?,
        };
        if value.is_nan() {
            return None;
        }
        Some(self.clamp(value))
    }
}
