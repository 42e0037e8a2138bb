//! Color command implementation

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::color::{convert, ColorReport};

/// Execute the color command
pub fn run_color(value: &str, json: bool) -> ExitCode {
    let report = match convert(value) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", format_report_text(&report));
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn format_report_text(report: &ColorReport) -> String {
    let rows = [
        ("Hex", report.hex.clone()),
        ("RGB", report.rgb.clone()),
        ("HSL", report.hsl.clone()),
        ("HSV", report.hsv.clone()),
        ("CMYK", report.cmyk.clone()),
        ("LAB", report.lab.clone()),
        ("XYZ", report.xyz.clone()),
        ("Linear RGB", report.linear_rgb.clone()),
        ("Luminance", format!("{:.3}", report.luminance)),
        ("Tone", if report.is_light { "light" } else { "dark" }.to_string()),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{:<11} {}\n", format!("{}:", label), value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_report() {
        let text = format_report_text(&convert("red").unwrap());
        assert!(text.starts_with("Hex:        #ff0000\n"));
        assert!(text.contains("RGB:        rgb(255, 0, 0)\n"));
        assert!(text.ends_with("Tone:       dark\n"));
    }
}
