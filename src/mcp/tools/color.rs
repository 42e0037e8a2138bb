//! MCP color_convert tool: parse a CSS color and report every notation.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::color::{convert, ColorReport};
use crate::error::ToolError;

pub const NAME: &str = "color_convert";

/// Input parameters for the color_convert tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ColorInput {
    #[schemars(
        description = "CSS color value (e.g., '#ff5733', 'rgb(255, 87, 51)', 'hsl(9, 100%, 60%)', 'red')"
    )]
    pub color: String,
}

/// Execute the color_convert tool logic.
pub fn run_color_convert(input: ColorInput) -> Result<ColorReport, ToolError> {
    Ok(convert(&input.color)?)
}
