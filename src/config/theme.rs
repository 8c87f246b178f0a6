use crate::foundation::color::HexColor;
use serde::{Deserialize, Serialize};

/// Named color scheme of a poster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    /// White paper, black ink.
    Light,
    /// Black sky.
    #[default]
    Dark,
    /// Deep navy.
    Navy,
    /// Dark purple.
    Purple,
    /// Dark teal.
    Teal,
    /// Dark rose.
    Rose,
    /// Dark amber.
    Amber,
}

/// Colors and display label of one [`ColorTheme`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    /// Background fill.
    pub bg: HexColor,
    /// Foreground (text, stars, frame).
    pub fg: HexColor,
    /// Accent (constellation lines and names).
    pub accent: HexColor,
    /// Human-readable name.
    pub label: &'static str,
}

const LIGHT: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0xff, 0xff, 0xff),
    fg: HexColor::rgb(0x00, 0x00, 0x00),
    accent: HexColor::rgb(0x1f, 0x77, 0xb4),
    label: "Light",
};
const DARK: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0x00, 0x00, 0x00),
    fg: HexColor::rgb(0xff, 0xff, 0xff),
    accent: HexColor::rgb(0xff, 0xc8, 0x57),
    label: "Dark",
};
const NAVY: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0x0b, 0x13, 0x2b),
    fg: HexColor::rgb(0xff, 0xff, 0xff),
    accent: HexColor::rgb(0xff, 0xc8, 0x57),
    label: "Navy",
};
const PURPLE: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0x1a, 0x00, 0x33),
    fg: HexColor::rgb(0xff, 0xff, 0xff),
    accent: HexColor::rgb(0x9d, 0x4e, 0xdd),
    label: "Purple",
};
const TEAL: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0x00, 0x1a, 0x1a),
    fg: HexColor::rgb(0xff, 0xff, 0xff),
    accent: HexColor::rgb(0x4e, 0xcc, 0xa3),
    label: "Teal",
};
const ROSE: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0x1a, 0x0a, 0x0f),
    fg: HexColor::rgb(0xff, 0xff, 0xff),
    accent: HexColor::rgb(0xff, 0x6b, 0x9d),
    label: "Rose",
};
const AMBER: ThemePalette = ThemePalette {
    bg: HexColor::rgb(0x1a, 0x13, 0x00),
    fg: HexColor::rgb(0xff, 0xff, 0xff),
    accent: HexColor::rgb(0xff, 0xd6, 0x0a),
    label: "Amber",
};

impl ColorTheme {
    /// All themes in display order.
    pub const ALL: [ColorTheme; 7] = [
        ColorTheme::Light,
        ColorTheme::Dark,
        ColorTheme::Navy,
        ColorTheme::Purple,
        ColorTheme::Teal,
        ColorTheme::Rose,
        ColorTheme::Amber,
    ];

    /// Static palette lookup.
    pub fn palette(self) -> &'static ThemePalette {
        match self {
            ColorTheme::Light => &LIGHT,
            ColorTheme::Dark => &DARK,
            ColorTheme::Navy => &NAVY,
            ColorTheme::Purple => &PURPLE,
            ColorTheme::Teal => &TEAL,
            ColorTheme::Rose => &ROSE,
            ColorTheme::Amber => &AMBER,
        }
    }

    /// Wire name used in JSON and share URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorTheme::Light => "light",
            ColorTheme::Dark => "dark",
            ColorTheme::Navy => "navy",
            ColorTheme::Purple => "purple",
            ColorTheme::Teal => "teal",
            ColorTheme::Rose => "rose",
            ColorTheme::Amber => "amber",
        }
    }

    /// Inverse of [`ColorTheme::as_str`]; unknown names yield `None`.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Clipping silhouette applied to the composed poster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMask {
    /// No clipping.
    #[default]
    Plain,
    /// Centered disc.
    Circle,
    /// Centered heart outline.
    Heart,
}

impl ShapeMask {
    /// All shapes in display order.
    pub const ALL: [ShapeMask; 3] = [ShapeMask::Plain, ShapeMask::Circle, ShapeMask::Heart];

    /// Wire name used in JSON and share URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeMask::Plain => "plain",
            ShapeMask::Circle => "circle",
            ShapeMask::Heart => "heart",
        }
    }

    /// Inverse of [`ShapeMask::as_str`]; unknown names yield `None`.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Picker glyph.
    pub fn icon(self) -> &'static str {
        match self {
            ShapeMask::Plain => "▢",
            ShapeMask::Circle => "●",
            ShapeMask::Heart => "♥",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/theme.rs"]
mod tests;
