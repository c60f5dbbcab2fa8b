//! Command-line radius handling.
//!
//! The flag name is matched case-insensitively and its value is parsed
//! with the invariant `.` decimal separator. A value that does not parse
//! is skipped, so a later occurrence of the flag can still win.

use std::ffi::OsString;

/// Canonical spelling of the radius flag.
pub const RADIUS_FLAG: &str = "--radius";

/// Rewrites any casing of `--radius` (e.g. `--RADIUS`) to [`RADIUS_FLAG`]
/// so the argument parser sees one spelling. Other tokens pass through.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some(s) if s.eq_ignore_ascii_case(RADIUS_FLAG) => OsString::from(RADIUS_FLAG),
            Some(s) if has_inline_radius(s) => {
                OsString::from(format!("{RADIUS_FLAG}{}", &s[RADIUS_FLAG.len()..]))
            }
            _ => arg,
        })
        .collect()
}

/// `--RADIUS=8` style token.
fn has_inline_radius(arg: &str) -> bool {
    arg.get(..RADIUS_FLAG.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(RADIUS_FLAG))
        && arg[RADIUS_FLAG.len()..].starts_with('=')
}

/// Collects every `--radius` value from already normalized arguments, in
/// command-line order and wherever the flag sits relative to a
/// subcommand. A trailing flag with no following token yields nothing.
pub fn radius_values(args: &[OsString]) -> Vec<String> {
    let mut values = Vec::new();
    let mut tokens = args.iter();
    while let Some(arg) = tokens.next() {
        let Some(s) = arg.to_str() else {
            continue;
        };
        if s == RADIUS_FLAG {
            if let Some(value) = tokens.next() {
                values.push(value.to_string_lossy().into_owned());
            }
        } else if let Some(value) = s.strip_prefix(RADIUS_FLAG).and_then(|v| v.strip_prefix('=')) {
            values.push(value.to_string());
        }
    }
    values
}

/// Parses one radius value.
///
/// Surrounding whitespace is ignored. Non-finite values (`NaN`, `inf`)
/// are rejected along with anything that is not a plain number.
pub fn parse_radius(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite())
}

/// Picks the radius from every `--radius` value in command-line order:
/// the first one that parses wins, otherwise `fallback`.
pub fn resolve_radius<S: AsRef<str>>(values: &[S], fallback: f64) -> f64 {
    values
        .iter()
        .find_map(|v| parse_radius(v.as_ref()))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RADIUS;

    #[test]
    fn absent_flag_yields_default() {
        let values: [&str; 0] = [];

        assert_eq!(resolve_radius(&values, DEFAULT_RADIUS), 16.0);
    }

    #[test]
    fn unparsable_value_falls_back_to_default() {
        assert_eq!(resolve_radius(&["abc"], DEFAULT_RADIUS), 16.0);
    }

    #[test]
    fn first_parsable_occurrence_wins() {
        // Arrange
        let values = ["abc", "8", "32"];

        // Act
        let radius = resolve_radius(&values, DEFAULT_RADIUS);

        // Assert
        assert_eq!(radius, 8.0);
    }

    #[test]
    fn zero_and_negative_values_are_accepted() {
        assert_eq!(resolve_radius(&["0"], DEFAULT_RADIUS), 0.0);
        assert_eq!(resolve_radius(&["-4.5"], DEFAULT_RADIUS), -4.5);
    }

    #[test]
    fn parsing_is_culture_invariant() {
        assert_eq!(parse_radius(" 12.5 "), Some(12.5));
        assert_eq!(parse_radius("1e1"), Some(10.0));
        assert_eq!(parse_radius("12,5"), None);
        assert_eq!(parse_radius(""), None);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert_eq!(parse_radius("NaN"), None);
        assert_eq!(parse_radius("inf"), None);
        assert_eq!(parse_radius("-infinity"), None);
    }

    #[test]
    fn flag_name_is_case_insensitive() {
        // Act
        let args = normalize_args(["roundify", "--RADIUS", "20", "--Radius", "x", "--radiusx"]);

        // Assert
        assert_eq!(
            args,
            os(&["roundify", "--radius", "20", "--radius", "x", "--radiusx"])
        );
    }

    #[test]
    fn inline_value_form_is_normalized_too() {
        let args = normalize_args(["roundify", "--RADIUS=12", "--radius-ish=3"]);

        assert_eq!(args, os(&["roundify", "--radius=12", "--radius-ish=3"]));
    }

    #[test]
    fn other_tokens_pass_through_untouched() {
        let args = normalize_args(["roundify", "debug", "masks", "--help"]);

        assert_eq!(args, os(&["roundify", "debug", "masks", "--help"]));
    }

    #[test]
    fn values_are_collected_across_subcommands_in_order() {
        // Arrange
        let args = normalize_args(["roundify", "--radius", "4", "debug", "masks", "--RADIUS", "8"]);

        // Act
        let values = radius_values(&args);

        // Assert
        assert_eq!(values, vec!["4", "8"]);
        assert_eq!(resolve_radius(&values, DEFAULT_RADIUS), 4.0);
    }

    #[test]
    fn inline_and_dangling_flags_are_handled() {
        let args = normalize_args(["roundify", "--Radius=abc", "--radius=12", "--radius"]);

        assert_eq!(radius_values(&args), vec!["abc", "12"]);
    }

    fn os(tokens: &[&str]) -> Vec<OsString> {
        tokens.iter().map(OsString::from).collect()
    }
}
