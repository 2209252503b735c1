use assert_matches::assert_matches;
use serde_json::json;

use excel_mcp_server::ExcelError;
use excel_mcp_server::styles::FormatOptions;

fn map(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().expect("object literal")
}

#[test]
fn accepts_the_full_option_set() {
    let options = map(json!({
        "bold": true,
        "italic": false,
        "underline": true,
        "font_size": 14,
        "font_name": "Calibri",
        "font_color": "#FF0000",
        "background_color": "yellow",
        "number_format": "0.00%",
        "border_style": "thin",
        "horizontal_alignment": "center",
        "wrap_text": true,
    }));
    let (parsed, applied) = FormatOptions::from_map(&options).unwrap();
    assert_eq!(applied.len(), 11);
    assert_eq!(parsed.bold, Some(true));
    assert_eq!(parsed.font_size, Some(14.0));
    assert_eq!(parsed.font_color.as_deref(), Some("FFFF0000"));
    assert_eq!(parsed.background_color.as_deref(), Some("FFFFFF00"));
    assert_eq!(parsed.border_style.as_deref(), Some("thin"));
    assert_eq!(parsed.horizontal_alignment.as_deref(), Some("center"));
}

#[test]
fn unknown_key_is_rejected_by_name() {
    let err = FormatOptions::from_map(&map(json!({"bogus_option": 1}))).unwrap_err();
    assert_matches!(err, ExcelError::InvalidFormatOption { ref key, .. } if key == "bogus_option");
    assert!(err.to_string().contains("bogus_option"));
}

#[test]
fn wrong_value_types_are_rejected() {
    assert_matches!(
        FormatOptions::from_map(&map(json!({"bold": "yes"}))).unwrap_err(),
        ExcelError::InvalidFormatOption { ref key, .. } if key == "bold"
    );
    assert_matches!(
        FormatOptions::from_map(&map(json!({"font_size": "large"}))).unwrap_err(),
        ExcelError::InvalidFormatOption { ref key, .. } if key == "font_size"
    );
    assert_matches!(
        FormatOptions::from_map(&map(json!({"font_size": 0}))).unwrap_err(),
        ExcelError::InvalidFormatOption { ref key, .. } if key == "font_size"
    );
}

#[test]
fn colors_normalize_to_argb() {
    let cases = [
        (json!({"font_color": "FF00FF00"}), "FF00FF00"),
        (json!({"font_color": "00ff00"}), "FF00FF00"),
        (json!({"font_color": "#00FF00"}), "FF00FF00"),
        (json!({"font_color": "red"}), "FFFF0000"),
    ];
    for (input, expected) in cases {
        let (parsed, _) = FormatOptions::from_map(&map(input)).unwrap();
        assert_eq!(parsed.font_color.as_deref(), Some(expected));
    }
}

#[test]
fn bad_colors_are_rejected() {
    for color in ["not-a-color", "FF00", "#12345", "turquoise-ish"] {
        let err = FormatOptions::from_map(&map(json!({"font_color": color}))).unwrap_err();
        assert_matches!(err, ExcelError::InvalidFormatOption { ref key, .. } if key == "font_color");
    }
}

#[test]
fn border_style_and_alignment_are_case_insensitive() {
    let (parsed, _) =
        FormatOptions::from_map(&map(json!({"border_style": "THIN", "horizontal_alignment": "Center"})))
            .unwrap();
    assert_eq!(parsed.border_style.as_deref(), Some("thin"));
    assert_eq!(parsed.horizontal_alignment.as_deref(), Some("center"));
}

#[test]
fn empty_option_map_is_rejected() {
    assert_matches!(
        FormatOptions::from_map(&serde_json::Map::new()).unwrap_err(),
        ExcelError::InvalidFormatOption { .. }
    );
}

#[test]
fn applying_options_sets_style_fields() {
    let (parsed, _) = FormatOptions::from_map(&map(json!({
        "bold": true,
        "font_size": 14,
        "background_color": "yellow",
        "number_format": "0.00",
    })))
    .unwrap();

    let mut style = umya_spreadsheet::Style::default();
    parsed.apply_to(&mut style);

    let font = style.get_font().expect("font set");
    assert!(*font.get_bold());
    assert_eq!(*font.get_size(), 14.0);
    let number_format = style.get_number_format().expect("number format set");
    assert_eq!(number_format.get_format_code(), "0.00");
}
