//! Format-option validation and style application.
//!
//! `FormatOptions` is parsed from the raw JSON map a caller sends, with a
//! closed key set. Validation happens before any file is opened, so a bad
//! option never leaves a half-written workbook behind.

use std::str::FromStr;

use serde_json::Value;
use umya_spreadsheet::structs::HorizontalAlignmentValues;
use umya_spreadsheet::{PatternValues, Style};

use crate::error::{ExcelError, ExcelResult};

const BORDER_STYLES: &[&str] = &[
    "thin",
    "medium",
    "thick",
    "dashed",
    "dotted",
    "double",
    "hair",
    "mediumDashed",
    "dashDot",
    "mediumDashDot",
    "dashDotDot",
    "mediumDashDotDot",
    "slantDashDot",
];

const HORIZONTAL_ALIGNMENTS: &[&str] = &[
    "left",
    "center",
    "right",
    "justify",
    "fill",
    "general",
    "centerContinuous",
    "distributed",
];

/// Validated formatting request. Every field is optional; at least one must
/// be present.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_size: Option<f64>,
    pub font_name: Option<String>,
    pub font_color: Option<String>,
    pub background_color: Option<String>,
    pub number_format: Option<String>,
    pub border_style: Option<String>,
    pub horizontal_alignment: Option<String>,
    pub wrap_text: Option<bool>,
}

impl FormatOptions {
    /// Parse and validate the raw option map. Unknown keys and bad values
    /// fail with `InvalidFormatOption` naming the key.
    pub fn from_map(map: &serde_json::Map<String, Value>) -> ExcelResult<(Self, Vec<String>)> {
        if map.is_empty() {
            return Err(ExcelError::invalid_format_option(
                "format_options",
                "at least one option is required",
            ));
        }

        let mut options = Self::default();
        let mut applied = Vec::with_capacity(map.len());

        for (key, value) in map {
            match key.as_str() {
                "bold" => options.bold = Some(require_bool(key, value)?),
                "italic" => options.italic = Some(require_bool(key, value)?),
                "underline" => options.underline = Some(require_bool(key, value)?),
                "wrap_text" => options.wrap_text = Some(require_bool(key, value)?),
                "font_size" => {
                    let size = value.as_f64().ok_or_else(|| {
                        ExcelError::invalid_format_option(key, "expected a number")
                    })?;
                    if !(1.0..=409.0).contains(&size) {
                        return Err(ExcelError::invalid_format_option(
                            key,
                            "expected a size between 1 and 409",
                        ));
                    }
                    options.font_size = Some(size);
                }
                "font_name" => {
                    let name = require_string(key, value)?;
                    if name.trim().is_empty() {
                        return Err(ExcelError::invalid_format_option(key, "empty font name"));
                    }
                    options.font_name = Some(name.to_string());
                }
                "font_color" => {
                    options.font_color = Some(normalize_color(key, require_string(key, value)?)?);
                }
                "background_color" => {
                    options.background_color =
                        Some(normalize_color(key, require_string(key, value)?)?);
                }
                "number_format" => {
                    let code = require_string(key, value)?;
                    if code.trim().is_empty() {
                        return Err(ExcelError::invalid_format_option(key, "empty format code"));
                    }
                    options.number_format = Some(code.to_string());
                }
                "border_style" => {
                    let style = require_string(key, value)?;
                    let canonical = BORDER_STYLES
                        .iter()
                        .find(|s| s.eq_ignore_ascii_case(style))
                        .ok_or_else(|| {
                            ExcelError::invalid_format_option(
                                key,
                                format!("unknown border style '{style}'"),
                            )
                        })?;
                    options.border_style = Some((*canonical).to_string());
                }
                "horizontal_alignment" => {
                    let alignment = require_string(key, value)?;
                    let canonical = HORIZONTAL_ALIGNMENTS
                        .iter()
                        .find(|a| a.eq_ignore_ascii_case(alignment))
                        .ok_or_else(|| {
                            ExcelError::invalid_format_option(
                                key,
                                format!("unknown alignment '{alignment}'"),
                            )
                        })?;
                    options.horizontal_alignment = Some((*canonical).to_string());
                }
                other => {
                    return Err(ExcelError::invalid_format_option(
                        other,
                        "unrecognized option",
                    ));
                }
            }
            applied.push(key.clone());
        }

        Ok((options, applied))
    }

    /// Apply the options to a style. Only set fields are touched.
    pub fn apply_to(&self, style: &mut Style) {
        if self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.font_size.is_some()
            || self.font_name.is_some()
            || self.font_color.is_some()
        {
            let font = style.get_font_mut();
            if let Some(bold) = self.bold {
                font.set_bold(bold);
            }
            if let Some(italic) = self.italic {
                font.set_italic(italic);
            }
            if let Some(underline) = self.underline {
                let kind = if underline { "single" } else { "none" };
                font.set_underline(kind.to_string());
            }
            if let Some(size) = self.font_size {
                font.set_size(size);
            }
            if let Some(name) = &self.font_name {
                font.set_name(name.clone());
            }
            if let Some(color) = &self.font_color {
                font.get_color_mut().set_argb(color.clone());
            }
        }

        if let Some(color) = &self.background_color {
            let pattern = style.get_fill_mut().get_pattern_fill_mut();
            if let Ok(solid) = PatternValues::from_str("solid") {
                pattern.set_pattern_type(solid);
            }
            pattern.get_foreground_color_mut().set_argb(color.clone());
        }

        if let Some(border) = &self.border_style {
            let borders = style.get_borders_mut();
            borders.get_left_border_mut().set_border_style(border.clone());
            borders.get_right_border_mut().set_border_style(border.clone());
            borders.get_top_border_mut().set_border_style(border.clone());
            borders
                .get_bottom_border_mut()
                .set_border_style(border.clone());
        }

        if let Some(code) = &self.number_format {
            style.get_number_format_mut().set_format_code(code.clone());
        }

        if self.horizontal_alignment.is_some() || self.wrap_text.is_some() {
            let alignment = style.get_alignment_mut();
            if let Some(h) = &self.horizontal_alignment
                && let Ok(value) = HorizontalAlignmentValues::from_str(h)
            {
                alignment.set_horizontal(value);
            }
            if let Some(wrap) = self.wrap_text {
                alignment.set_wrap_text(wrap);
            }
        }
    }
}

fn require_bool(key: &str, value: &Value) -> ExcelResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ExcelError::invalid_format_option(key, "expected true or false"))
}

fn require_string<'a>(key: &str, value: &'a Value) -> ExcelResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ExcelError::invalid_format_option(key, "expected a string"))
}

/// Normalize a color to 8-digit ARGB. Accepts `FFFF0000`, `FF0000`,
/// `#FF0000`, and a few common names.
fn normalize_color(key: &str, raw: &str) -> ExcelResult<String> {
    let named = match raw.to_ascii_lowercase().as_str() {
        "black" => Some("FF000000"),
        "white" => Some("FFFFFFFF"),
        "red" => Some("FFFF0000"),
        "green" => Some("FF00FF00"),
        "blue" => Some("FF0000FF"),
        "yellow" => Some("FFFFFF00"),
        "orange" => Some("FFFFA500"),
        "gray" | "grey" => Some("FF808080"),
        _ => None,
    };
    if let Some(argb) = named {
        return Ok(argb.to_string());
    }

    let hex = raw.strip_prefix('#').unwrap_or(raw);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExcelError::invalid_format_option(
            key,
            format!("'{raw}' is not a hex color or known color name"),
        ));
    }
    match hex.len() {
        6 => Ok(format!("FF{}", hex.to_ascii_uppercase())),
        8 => Ok(hex.to_ascii_uppercase()),
        _ => Err(ExcelError::invalid_format_option(
            key,
            "expected 6 (RGB) or 8 (ARGB) hex digits",
        )),
    }
}
