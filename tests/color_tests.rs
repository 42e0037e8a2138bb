//! Color engine tests
//!
//! Reference conversions for every accepted syntax, derived-notation
//! formatting, and parse failures.

use mcp_devtools::color::{convert, parse_color, parse_color_syntax, ColorSyntax, NAMED_COLORS};

fn approx(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} within {}, got {}",
        expected,
        tolerance,
        actual
    );
}

#[test]
fn test_hex_reference_color() {
    let report = convert("#ff5733").unwrap();
    assert_eq!(report.hex, "#ff5733");
    assert_eq!(report.rgb, "rgb(255, 87, 51)");
    assert_eq!(report.hsl, "hsl(10.6, 100.0%, 60.0%)");
    assert_eq!(report.hsv, "hsv(10.6, 80.0%, 100.0%)");
    assert_eq!(report.cmyk, "cmyk(0.0%, 65.9%, 80.0%, 0.0%)");
    assert_eq!(report.lab, "lab(0.60, 0.62, 0.54)");
    assert_eq!(report.xyz, "xyz(0.452, 0.283, 0.062)");
    assert_eq!(report.linear_rgb, "linear-rgb(1.000, 0.095, 0.033)");
    assert_eq!(report.original, "#ff5733");
    approx(report.luminance, (0.2126 * 255.0 + 0.7152 * 87.0 + 0.0722 * 51.0) / 255.0, 1e-9);
    assert!(!report.is_light);
    assert!(report.is_dark);
}

#[test]
fn test_rgb_functional_notation() {
    let report = convert("rgb(255, 87, 51)").unwrap();
    assert_eq!(report.hex, "#ff5733");
    assert_eq!(report.original, "rgb(255, 87, 51)");

    assert_eq!(parse_color("rgb(255 87 51)").unwrap().hex(), "#ff5733");
    assert_eq!(parse_color("RGB(255,87,51)").unwrap().hex(), "#ff5733");
}

#[test]
fn test_rgb_out_of_range_is_clamped() {
    assert_eq!(parse_color("rgb(300, -5, 128)").unwrap().rgb255(), [255, 0, 128]);
}

#[test]
fn test_hsl_functional_notation() {
    let [r, g, b] = parse_color("hsl(9, 100%, 60%)").unwrap().rgb255();
    assert_eq!(r, 255);
    assert!((81..=83).contains(&g), "green channel was {}", g);
    assert_eq!(b, 51);

    // Hue wraps around the circle
    assert_eq!(
        parse_color("hsl(369, 100%, 60%)").unwrap().hex(),
        parse_color("hsl(9, 100%, 60%)").unwrap().hex()
    );
}

#[test]
fn test_named_red() {
    let report = convert("red").unwrap();
    assert_eq!(report.hex, "#ff0000");
    assert_eq!(report.hsl, "hsl(0.0, 100.0%, 50.0%)");
    assert_eq!(report.rgb, "rgb(255, 0, 0)");
}

#[test]
fn test_white_and_black_extremes() {
    let white = convert("white").unwrap();
    approx(white.luminance, 1.0, 1e-9);
    assert!(white.is_light);
    assert_eq!(white.cmyk, "cmyk(0.0%, 0.0%, 0.0%, 0.0%)");

    let black = convert("black").unwrap();
    assert_eq!(black.luminance, 0.0);
    assert!(black.is_dark);
    assert_eq!(black.cmyk, "cmyk(0.0%, 0.0%, 0.0%, 100.0%)");
    assert_eq!(black.xyz, "xyz(0.000, 0.000, 0.000)");
}

#[test]
fn test_every_named_color_resolves_to_its_table_value() {
    for (name, hex) in NAMED_COLORS {
        let (syntax, color) = parse_color_syntax(name).unwrap();
        assert_eq!(syntax, ColorSyntax::Named, "{}", name);
        assert_eq!(color.hex(), *hex, "{}", name);
        assert_eq!(parse_color(&name.to_uppercase()).unwrap().hex(), *hex);
    }
}

#[test]
fn test_hex_output_reparses_to_itself() {
    for input in ["#ff5733", "#F0A", "hsl(200, 40%, 30%)", "rgb(1, 2, 3)", "pink"] {
        let hex = convert(input).unwrap().hex;
        let again = convert(&hex).unwrap();
        assert_eq!(again.hex, hex, "{}", input);
        assert_eq!(parse_color_syntax(&hex).unwrap().0, ColorSyntax::Hex);
    }
}

#[test]
fn test_light_and_dark_are_exclusive() {
    for input in ["#000000", "#7f7f7f", "#808080", "#ffffff", "yellow", "navy", "#ff5733"] {
        let report = convert(input).unwrap();
        assert_ne!(report.is_light, report.is_dark, "{}", input);
        assert_eq!(report.is_light, report.luminance > 0.5, "{}", input);
    }
}

#[test]
fn test_short_and_alpha_hex_forms() {
    assert_eq!(parse_color("#abc").unwrap().hex(), "#aabbcc");
    assert_eq!(parse_color("#abcd").unwrap().hex(), "#aabbcc");
    assert_eq!(parse_color("#11223344").unwrap().hex(), "#112233");
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("#ggg").is_err());
}

#[test]
fn test_unparseable_inputs() {
    let err = convert("not-a-color").unwrap_err();
    assert_eq!(err.to_string(), "unable to parse color 'not-a-color'");
    assert_eq!(err.input(), "not-a-color");

    assert!(convert("").is_err());
    assert!(convert("rgb(1, 2)").is_err());
    assert!(convert("hsl(10, 50, 50)").is_err());

    let overflowing_hue = format!("hsl({}, 100%, 50%)", "9".repeat(400));
    assert_eq!(convert(&overflowing_hue).unwrap_err().input(), overflowing_hue);
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let report = convert("  blue  ").unwrap();
    assert_eq!(report.hex, "#0000ff");
    assert_eq!(report.original, "  blue  ");
}
