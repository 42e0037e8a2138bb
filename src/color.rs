//! Color engine: CSS color parsing and conversion
//!
//! Supports the following input formats, tried in this order:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` (alpha is ignored)
//! - Functional: `rgb(r, g, b)` and `hsl(h, s%, l%)`, commas optional
//! - Named: `red`, `navy`, `gray`, etc. (see [`NAMED_COLORS`])
//!
//! Every input is parsed exactly once into a [`Color`]; all notations in a
//! [`ColorReport`] are derived from that single value.

use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::Serialize;
use thiserror::Error;

/// ITU-R BT.709 luminance coefficients
pub const RED_LUMINANCE: f64 = 0.2126;
pub const GREEN_LUMINANCE: f64 = 0.7152;
pub const BLUE_LUMINANCE: f64 = 0.0722;

/// Colors with luminance strictly above this are light.
pub const LIGHT_THRESHOLD: f64 = 0.5;

/// D65 reference white (XYZ, Y = 1)
const D65: [f64; 3] = [0.95047, 1.00000, 1.08883];

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// None of the recognized syntaxes matched. Carries the input as given.
    #[error("unable to parse color '{0}'")]
    Unparseable(String),
}

impl ColorError {
    /// The original input text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            ColorError::Unparseable(input) => input,
        }
    }
}

/// Named colors accepted by the parser, with their hex values.
pub const NAMED_COLORS: &[(&str, &str)] = &[
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("white", "#ffffff"),
    ("black", "#000000"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("gray", "#808080"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
    ("lime", "#00ff00"),
    ("navy", "#000080"),
];

/// The syntax a color string was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSyntax {
    Hex,
    Rgb,
    Hsl,
    Named,
}

type Matcher = fn(&str) -> Option<Color>;

/// Matchers in priority order. The first one that accepts the input wins.
const MATCHERS: [(ColorSyntax, Matcher); 4] = [
    (ColorSyntax::Hex, match_hex),
    (ColorSyntax::Rgb, match_rgb),
    (ColorSyntax::Hsl, match_hsl),
    (ColorSyntax::Named, match_named),
];

/// Separator between functional arguments: a comma with optional spaces, or whitespace.
const SEP: &str = r"(?:\s*,\s*|\s+)";
const NUMBER: &str = r"[+-]?(?:\d+(?:\.\d*)?|\.\d+)";

static RGB_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let int = r"([+-]?\d+)";
    Regex::new(&format!(r"(?i)^rgb\(\s*{int}{SEP}{int}{SEP}{int}\s*\)$"))
        .expect("rgb pattern is valid")
});

static HSL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let num = format!("({NUMBER})");
    Regex::new(&format!(r"(?i)^hsl\(\s*{num}{SEP}{num}%{SEP}{num}%\s*\)$"))
        .expect("hsl pattern is valid")
});

/// Canonical color: gamma-encoded sRGB channels, nominally in [0, 1].
///
/// Channels may sit slightly outside [0, 1] after arithmetic; every derived
/// notation clamps before use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb255(r: u8, g: u8, b: u8) -> Self {
        Self::new(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
    }

    /// Build a color from hue in degrees (any real, wrapped) and
    /// saturation/lightness as fractions (clamped to [0, 1]).
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let h = wrap_hue(h);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r, g, b) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::new(r + m, g + m, b + m)
    }

    fn clamped(&self) -> [f64; 3] {
        [self.r.clamp(0.0, 1.0), self.g.clamp(0.0, 1.0), self.b.clamp(0.0, 1.0)]
    }

    /// 8-bit channels, rounded to nearest.
    pub fn rgb255(&self) -> [u8; 3] {
        self.clamped().map(|c| (c * 255.0).round() as u8)
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb255();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Hue in degrees [0, 360), saturation and lightness in [0, 1].
    pub fn hsl(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.clamped();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return (0.0, 0.0, l);
        }
        let s = if l < 0.5 { d / (max + min) } else { d / (2.0 - max - min) };
        (hue([r, g, b], max, d), s, l)
    }

    /// Hue in degrees [0, 360), saturation and value in [0, 1].
    pub fn hsv(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.clamped();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        let s = if max == 0.0 { 0.0 } else { d / max };
        let h = if d == 0.0 { 0.0 } else { hue([r, g, b], max, d) };
        (h, s, max)
    }

    /// CMYK fractions, computed from the 8-bit channels.
    ///
    /// Pure black yields `(0, 0, 0, 1)`.
    pub fn cmyk(&self) -> (f64, f64, f64, f64) {
        let [r, g, b] = self.rgb255().map(|c| f64::from(c) / 255.0);
        let k = 1.0 - r.max(g).max(b);
        if k >= 1.0 {
            return (0.0, 0.0, 0.0, 1.0);
        }
        let c = (1.0 - r - k) / (1.0 - k);
        let m = (1.0 - g - k) / (1.0 - k);
        let y = (1.0 - b - k) / (1.0 - k);
        (c, m, y, k)
    }

    /// Linear-light RGB via the sRGB transfer function.
    pub fn linear_rgb(&self) -> [f64; 3] {
        self.clamped().map(linearize)
    }

    /// CIE XYZ (D65, white has Y = 1).
    pub fn xyz(&self) -> [f64; 3] {
        let [r, g, b] = self.linear_rgb();
        [
            0.412_390_799_265_959_5 * r + 0.357_584_339_383_878 * g + 0.180_480_788_401_834_3 * b,
            0.212_639_005_871_510_36 * r + 0.715_168_678_767_756 * g + 0.072_192_315_360_733_71 * b,
            0.019_330_818_715_591_85 * r + 0.119_194_779_794_625_99 * g + 0.950_532_152_249_660_6 * b,
        ]
    }

    /// CIE L*a*b* against D65, on the unit scale (L in [0, 1]).
    pub fn lab(&self) -> [f64; 3] {
        let [x, y, z] = self.xyz();
        let fx = lab_f(x / D65[0]);
        let fy = lab_f(y / D65[1]);
        let fz = lab_f(z / D65[2]);
        [1.16 * fy - 0.16, 5.0 * (fx - fy), 2.0 * (fy - fz)]
    }

    /// BT.709-weighted luminance of the gamma-encoded 8-bit channels, in [0, 1].
    ///
    /// This is not linear-light relative luminance; output compatibility
    /// depends on the gamma-encoded form.
    pub fn luminance(&self) -> f64 {
        let [r, g, b] = self.rgb255().map(f64::from);
        ((RED_LUMINANCE * r + GREEN_LUMINANCE * g + BLUE_LUMINANCE * b) / 255.0).clamp(0.0, 1.0)
    }

    pub fn is_light(&self) -> bool {
        self.luminance() > LIGHT_THRESHOLD
    }
}

fn wrap_hue(h: f64) -> f64 {
    let h = h.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

fn hue([r, g, b]: [f64; 3], max: f64, d: f64) -> f64 {
    let sector = if max == r {
        (g - b) / d
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    wrap_hue(sector * 60.0)
}

fn linearize(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    const EPSILON: f64 = 216.0 / 24389.0; // (6/29)^3
    if t > EPSILON {
        t.cbrt()
    } else {
        t / 3.0 * (29.0 / 6.0) * (29.0 / 6.0) + 4.0 / 29.0
    }
}

/// Every notation of a color, as returned by the `color_convert` tool.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct ColorReport {
    /// Hexadecimal representation
    pub hex: String,
    /// RGB representation
    pub rgb: String,
    /// HSL representation
    pub hsl: String,
    /// HSV representation
    pub hsv: String,
    /// CMYK representation
    pub cmyk: String,
    /// LAB representation
    pub lab: String,
    /// XYZ representation
    pub xyz: String,
    /// Linear RGB representation
    pub linear_rgb: String,
    /// Relative luminance (0-1)
    pub luminance: f64,
    /// Whether the color is light (luminance > 0.5)
    pub is_light: bool,
    /// Whether the color is dark (luminance <= 0.5)
    pub is_dark: bool,
    /// Original input color value
    pub original: String,
}

impl ColorReport {
    /// Derive every notation from `color`.
    pub fn from_color(color: &Color, original: &str) -> Self {
        let [r, g, b] = color.rgb255();
        let (h, s, l) = color.hsl();
        let (hv, sv, v) = color.hsv();
        let (c, m, y, k) = color.cmyk();
        let [lab_l, lab_a, lab_b] = color.lab();
        let [x, yv, z] = color.xyz();
        let [lr, lg, lb] = color.linear_rgb();
        let luminance = color.luminance();
        let is_light = luminance > LIGHT_THRESHOLD;

        Self {
            hex: color.hex(),
            rgb: format!("rgb({}, {}, {})", r, g, b),
            hsl: format!("hsl({:.1}, {:.1}%, {:.1}%)", h, s * 100.0, l * 100.0),
            hsv: format!("hsv({:.1}, {:.1}%, {:.1}%)", hv, sv * 100.0, v * 100.0),
            cmyk: format!(
                "cmyk({:.1}%, {:.1}%, {:.1}%, {:.1}%)",
                c * 100.0,
                m * 100.0,
                y * 100.0,
                k * 100.0
            ),
            lab: format!("lab({:.2}, {:.2}, {:.2})", lab_l, lab_a, lab_b),
            xyz: format!("xyz({:.3}, {:.3}, {:.3})", x, yv, z),
            linear_rgb: format!("linear-rgb({:.3}, {:.3}, {:.3})", lr, lg, lb),
            luminance,
            is_light,
            is_dark: !is_light,
            original: original.to_string(),
        }
    }
}

/// Parse `input` and derive every notation.
///
/// # Examples
///
/// ```
/// use mcp_devtools::color::convert;
///
/// let report = convert("rgb(255, 87, 51)").unwrap();
/// assert_eq!(report.hex, "#ff5733");
/// assert!(!report.is_light);
/// ```
pub fn convert(input: &str) -> Result<ColorReport, ColorError> {
    let color = parse_color(input)?;
    Ok(ColorReport::from_color(&color, input))
}

/// Parse a CSS-like color string into a [`Color`].
///
/// Surrounding whitespace is ignored. The error carries `s` unmodified.
///
/// # Examples
///
/// ```
/// use mcp_devtools::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap().rgb255(), [255, 0, 0]);
/// assert_eq!(parse_color(" rgb(0,255,0) ").unwrap().rgb255(), [0, 255, 0]);
/// assert_eq!(parse_color("Navy").unwrap().hex(), "#000080");
/// assert!(parse_color("not-a-color").is_err());
/// ```
pub fn parse_color(s: &str) -> Result<Color, ColorError> {
    parse_color_syntax(s).map(|(_, color)| color)
}

/// Like [`parse_color`], also reporting which syntax matched.
pub fn parse_color_syntax(s: &str) -> Result<(ColorSyntax, Color), ColorError> {
    let trimmed = s.trim();
    MATCHERS
        .iter()
        .find_map(|(syntax, matcher)| matcher(trimmed).map(|color| (*syntax, color)))
        .ok_or_else(|| ColorError::Unparseable(s.to_string()))
}

/// `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
fn match_hex(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex.as_bytes();
    let [r, g, b] = match bytes.len() {
        3 | 4 => [bytes[0], bytes[1], bytes[2]].map(|d| hex_digit(d) * 17),
        6 | 8 => [0, 2, 4].map(|i| hex_digit(bytes[i]) * 16 + hex_digit(bytes[i + 1])),
        _ => return None,
    };
    Some(Color::from_rgb255(r, g, b))
}

/// Value of an ASCII hex digit. Callers have already validated the byte.
fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// `rgb(r, g, b)`; out-of-range integers are clamped to [0, 255].
fn match_rgb(s: &str) -> Option<Color> {
    let caps = RGB_PATTERN.captures(s)?;
    let channel = |i: usize| -> u8 {
        let text = &caps[i];
        // Only overflow can fail here; the pattern guarantees digits.
        let value = text.parse::<i64>().unwrap_or(if text.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
        value.clamp(0, 255) as u8
    };
    Some(Color::from_rgb255(channel(1), channel(2), channel(3)))
}

/// `hsl(h, s%, l%)`; components too long to be finite are rejected.
fn match_hsl(s: &str) -> Option<Color> {
    let caps = HSL_PATTERN.captures(s)?;
    let number = |i: usize| caps[i].parse::<f64>().ok().filter(|v| v.is_finite());
    Some(Color::from_hsl(number(1)?, number(2)? / 100.0, number(3)? / 100.0))
}

fn match_named(s: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(s))
        .and_then(|(_, hex)| match_hex(hex))
}
