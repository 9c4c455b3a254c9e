//! Kind-specific constants.
//!
//! Ship classes differ only in these values; behavior is shared.

use crate::enums::ObjectKind;

/// Immutable per-kind parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    /// Engine thrust (acceleration magnitude at full throttle).
    pub thrust: f64,
    /// Single-character display glyph.
    pub glyph: char,
    /// Display color name.
    pub color: &'static str,
    pub type_name: &'static str,
}

/// Get the profile for a given kind.
pub fn get_profile(kind: ObjectKind) -> KindProfile {
    match kind {
        ObjectKind::Celestial => KindProfile {
            thrust: 0.0,
            glyph: '*',
            color: "white",
            type_name: "celestial",
        },
        ObjectKind::Tug => KindProfile {
            thrust: 0.01,
            glyph: '¬',
            color: "yellow",
            type_name: "tug",
        },
        ObjectKind::Fighter => KindProfile {
            thrust: 3.0,
            glyph: '‡',
            color: "red",
            type_name: "fighter",
        },
        ObjectKind::Escort => KindProfile {
            thrust: 1.0,
            glyph: '≡',
            color: "green",
            type_name: "escort",
        },
        ObjectKind::Port => KindProfile {
            thrust: 0.0,
            glyph: 'þ',
            color: "blue",
            type_name: "port",
        },
    }
}
