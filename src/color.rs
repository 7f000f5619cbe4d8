//! Hex color parsing and interpolation
//!
//! Particle colors cross the API as CSS-style strings. Gradients interpolate
//! each RGBA channel independently and come back out as an `rgba(...)`
//! string. Malformed input degrades instead of failing: an unparsable start
//! color is returned verbatim, untouched.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// An RGBA color: 8-bit RGB channels, alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa`. Anything else is `None`.
pub fn parse_hex(s: &str) -> Option<Rgba> {
    let hex = s.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // Expand nibbles: #f80 -> #ff8800
            Some(Rgba {
                r: r * 17,
                g: g * 17,
                b: b * 17,
                a: 1.0,
            })
        }
        6 | 8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = if hex.len() == 8 {
                u8::from_str_radix(&hex[6..8], 16).ok()? as f32 / 255.0
            } else {
                1.0
            };
            Some(Rgba { r, g, b, a })
        }
        _ => None,
    }
}

/// Format as `rgba(r, g, b, a)` with integer RGB and alpha in [0, 1]
pub fn to_rgba_string(c: Rgba) -> String {
    // Round alpha to 3 decimals so float noise never leaks into the string
    let alpha = (c.a * 1000.0).round() / 1000.0;
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, alpha)
}

#[inline]
fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
}

/// Linearly interpolate two hex colors per channel at `t` in [0, 1].
///
/// If `start` does not parse it is returned verbatim; if `end` does not
/// parse there is nothing to interpolate toward, so `start` is returned
/// verbatim as well.
pub fn lerp_hex(start: &str, end: &str, t: f32) -> String {
    let (Some(a), Some(b)) = (parse_hex(start), parse_hex(end)) else {
        return start.to_string();
    };
    to_rgba_string(Rgba {
        r: lerp_channel(a.r, b.r, t),
        g: lerp_channel(a.g, b.g, t),
        b: lerp_channel(a.b, b.b, t),
        a: a.a + (b.a - a.a) * t,
    })
}

/// How a particle's color evolves over its normalized age `t` in [0, 1]
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// A fixed color string, passed through as-is
    Solid(String),
    /// Interpolate `start` -> `end` per channel over the particle's lifetime
    Gradient { start: String, end: String },
    /// Arbitrary color function of normalized age (runtime-only, not data)
    #[serde(skip)]
    Computed(Rc<dyn Fn(f32) -> String>),
}

impl ColorSpec {
    /// Shorthand for a solid color
    pub fn solid(color: impl Into<String>) -> Self {
        ColorSpec::Solid(color.into())
    }

    /// Shorthand for a two-color gradient
    pub fn gradient(start: impl Into<String>, end: impl Into<String>) -> Self {
        ColorSpec::Gradient {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Resolve the color at normalized age `t`
    pub fn resolve(&self, t: f32) -> String {
        match self {
            ColorSpec::Solid(c) => c.clone(),
            ColorSpec::Gradient { start, end } => lerp_hex(start, end, t),
            ColorSpec::Computed(f) => f(t),
        }
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Solid("#ffffff".to_string())
    }
}

impl fmt::Debug for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorSpec::Solid(c) => f.debug_tuple("Solid").field(c).finish(),
            ColorSpec::Gradient { start, end } => f
                .debug_struct("Gradient")
                .field("start", start)
                .field("end", end)
                .finish(),
            ColorSpec::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            parse_hex("#f80"),
            Some(Rgba {
                r: 255,
                g: 136,
                b: 0,
                a: 1.0
            })
        );
        assert_eq!(
            parse_hex("#22ccff"),
            Some(Rgba {
                r: 0x22,
                g: 0xcc,
                b: 0xff,
                a: 1.0
            })
        );
        assert_eq!(
            parse_hex("#22ccff80"),
            Some(Rgba {
                r: 0x22,
                g: 0xcc,
                b: 0xff,
                a: 0x80 as f32 / 255.0
            })
        );
        assert_eq!(parse_hex("tomato"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_lerp_midpoint() {
        assert_eq!(lerp_hex("#000000", "#ffffff", 0.5), "rgba(128, 128, 128, 1)");
        assert_eq!(lerp_hex("#000000", "#ffffff", 0.0), "rgba(0, 0, 0, 1)");
        assert_eq!(lerp_hex("#000000", "#ffffff", 1.0), "rgba(255, 255, 255, 1)");
    }

    #[test]
    fn test_lerp_alpha() {
        // Alpha fades in float space: 0 -> 1 at the midpoint is exactly 0.5
        assert_eq!(lerp_hex("#ff000000", "#ff0000ff", 0.5), "rgba(255, 0, 0, 0.5)");
        assert_eq!(lerp_hex("#ff0000ff", "#ff000000", 1.0), "rgba(255, 0, 0, 0)");
    }

    #[test]
    fn test_unparsable_start_verbatim() {
        assert_eq!(lerp_hex("tomato", "#ffffff", 0.5), "tomato");
        // Unparsable end also falls back to the start string
        assert_eq!(lerp_hex("#ff0000", "nope", 0.5), "#ff0000");
    }

    #[test]
    fn test_spec_resolve() {
        assert_eq!(ColorSpec::solid("#abc").resolve(0.7), "#abc");
        assert_eq!(
            ColorSpec::gradient("#000000", "#ffffff").resolve(0.5),
            "rgba(128, 128, 128, 1)"
        );
        let computed = ColorSpec::Computed(Rc::new(|t| format!("t={t}")));
        assert_eq!(computed.resolve(0.25), "t=0.25");
    }

    #[test]
    fn test_spec_serde() {
        let solid: ColorSpec = serde_json::from_str(r##""#ff8800""##).unwrap();
        assert_eq!(solid.resolve(0.0), "#ff8800");
        let grad: ColorSpec =
            serde_json::from_str(r##"{"start":"#000000","end":"#ffffff"}"##).unwrap();
        assert_eq!(grad.resolve(1.0), "rgba(255, 255, 255, 1)");
    }

    proptest! {
        #[test]
        fn prop_lerp_channels_stay_in_range(t in 0.0f32..=1.0) {
            let s = lerp_hex("#204060", "#e0a020", t);
            prop_assert!(s.starts_with("rgba("));
            let inner = s.trim_start_matches("rgba(").trim_end_matches(')');
            let parts: Vec<&str> = inner.split(", ").collect();
            prop_assert_eq!(parts.len(), 4);
            for p in &parts[..3] {
                let v: i32 = p.parse().unwrap();
                prop_assert!((0..=255).contains(&v));
            }
        }
    }
}
