//! Property tests for color parsing and the line parser.

use ircpalette_theme::{parse_line, parse_lines, Color, Directive, LineError, Theme};
use proptest::prelude::*;

proptest! {
    #[test]
    fn six_digit_hex_matches_rgb8(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
        let upper = Color::parse(&format!("#{r:02X}{g:02X}{b:02X}")).unwrap();
        let lower = Color::parse(&format!("#{r:02x}{g:02x}{b:02x}")).unwrap();
        prop_assert_eq!(upper, Color::rgb8(r, g, b));
        prop_assert_eq!(lower, upper);
        prop_assert_eq!(upper.to_hex(), format!("#{r:02x}{g:02x}{b:02x}"));
    }

    #[test]
    fn twelve_digit_hex_is_exact(r in any::<u16>(), g in any::<u16>(), b in any::<u16>()) {
        let color = Color::parse(&format!("#{r:04x}{g:04x}{b:04x}")).unwrap();
        prop_assert_eq!(color, Color::new(r, g, b));
    }

    #[test]
    fn parse_line_never_panics(line in "\\PC{0,64}") {
        let _ = parse_line(&line);
    }

    #[test]
    fn only_lines_without_separator_fail(line in "[a-z_0-9#= ]{0,32}") {
        let result = parse_line(&line);
        if line.is_empty() || line.starts_with('#') || line.contains('=') {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(LineError::MissingSeparator));
        }
    }

    #[test]
    fn in_range_text_colors_are_applied(index in 0usize..32, rgb in 0u32..=0xFF_FFFF) {
        let line = format!("text_color_{index}=#{rgb:06X}");
        let mut theme = Theme::dark_default();
        let report = parse_lines(&mut theme, [line.as_str()]);
        prop_assert_eq!(report.applied, 1);
        prop_assert_eq!(theme.text_colors[index], Color::from_rgb24(rgb));
    }

    #[test]
    fn out_of_range_text_colors_change_nothing(index in 32i64..10_000) {
        let line = format!("text_color_{index}=#FFFFFF");
        let directive = parse_line(&line).unwrap();
        let mut theme = Theme::dark_default();
        prop_assert!(!directive.apply(&mut theme));
        prop_assert!(matches!(directive, Directive::Skip(_)));
        prop_assert_eq!(theme, Theme::dark_default());
    }
}
