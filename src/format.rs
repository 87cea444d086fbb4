//! Result rendering for the right-hand panel.
//!
//! [`format_result`] is total: malformed JSON falls back to the text report,
//! and any other failure is embedded in the output as a diagnostic line
//! rather than returned.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{analyze, line_count, word_count};

static TAG_GAP: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r">\s+<"));
static WHITESPACE_RUN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\s+"));

/// The representation shown in the result panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Statistics report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// Whitespace-normalized HTML.
    Html,
}

impl ResultFormat {
    pub const ALL: [Self; 3] = [Self::Text, Self::Json, Self::Html];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown result format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for ResultFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            other => Err(UnknownFormat(other.to_string())),
        }
    }
}

/// Internal formatting failures. Never escapes [`format_result`].
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Pattern(#[from] regex::Error),
}

/// Render `input` in the requested format.
///
/// Blank input renders as the empty string in every format.
pub fn format_result(input: &str, format: ResultFormat) -> String {
    if input.trim().is_empty() {
        return String::new();
    }
    match try_format(input, format) {
        Ok(output) => output,
        Err(err) => format!("Processing Error: {err}"),
    }
}

/// Like [`format_result`], but takes the format by name. Unrecognized names
/// render the text report.
pub fn format_raw(input: &str, format: &str) -> String {
    format_result(input, format.parse().unwrap_or_default())
}

fn try_format(input: &str, format: ResultFormat) -> Result<String, FormatError> {
    match format {
        ResultFormat::Json => match serde_json::from_str::<Value>(input) {
            Ok(mut value) => {
                integral_floats_to_ints(&mut value);
                Ok(serde_json::to_string_pretty(&value)?)
            }
            Err(_) => Ok(analyze(input).to_string()),
        },
        ResultFormat::Html => Ok(normalize_html(input)
            .unwrap_or_else(|err| format!("HTML Format Error: {err}"))),
        ResultFormat::Text => Ok(analyze(input).to_string()),
    }
}

// Largest magnitude at which every integer is exact in an f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Rewrite floats with no fractional part as integers, so `1.0` and `1e2`
/// print as `1` and `100`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_floats_to_ints(value: &mut Value) {
    match value {
        Value::Number(number) => {
            if let Some(float) = number.as_f64().filter(|_| number.is_f64())
                && float.fract() == 0.0
                && float.abs() <= MAX_SAFE_INTEGER
            {
                *value = if float < 0.0 {
                    Value::from(float as i64)
                } else {
                    Value::from(float as u64)
                };
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_floats_to_ints),
        Value::Object(map) => map.values_mut().for_each(integral_floats_to_ints),
        Value::Null | Value::Bool(_) | Value::String(_) => {}
    }
}

/// Drop whitespace between tags, collapse other whitespace runs, trim.
pub fn normalize_html(html: &str) -> Result<String, FormatError> {
    let tag_gap = TAG_GAP.as_ref().map_err(Clone::clone)?;
    let whitespace = WHITESPACE_RUN.as_ref().map_err(Clone::clone)?;

    let joined = tag_gap.replace_all(html, "><");
    let collapsed = whitespace.replace_all(&joined, " ");
    Ok(collapsed.trim().to_string())
}

/// Whether a rendered result carries a diagnostic.
pub fn is_error_result(output: &str) -> bool {
    output.contains("Error:") || output.contains("error:")
}

/// Metadata about a rendered result (not the input it came from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultStats {
    pub word_count: usize,
    pub char_count: usize,
    pub line_count: usize,
    pub processed_at: DateTime<Utc>,
}

impl ResultStats {
    /// Stats for `output`, or `None` when there is nothing rendered.
    pub fn for_output(output: &str, processed_at: DateTime<Utc>) -> Option<Self> {
        if output.is_empty() {
            return None;
        }
        Some(Self {
            word_count: word_count(output),
            char_count: output.chars().count(),
            line_count: line_count(output),
            processed_at,
        })
    }
}

/// A rendered result together with its derived metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedResult {
    pub output: String,
    pub stats: Option<ResultStats>,
    pub is_error: bool,
}

impl FormattedResult {
    pub fn compute(input: &str, format: ResultFormat, now: DateTime<Utc>) -> Self {
        let output = format_result(input, format);
        let stats = ResultStats::for_output(&output, now);
        let is_error = is_error_result(&output);
        Self {
            output,
            stats,
            is_error,
        }
    }

    /// "Updated ..." label relative to `now`.
    pub fn updated_label(&self, now: DateTime<Utc>) -> String {
        relative_label(self.stats.map(|s| s.processed_at), now)
    }
}

/// Coarse age of `timestamp` relative to `now`.
pub fn relative_label(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return "--".to_string();
    };
    let elapsed_ms = (now - timestamp).num_milliseconds();
    if elapsed_ms < 60_000 {
        "just now".to_string()
    } else if elapsed_ms < 3_600_000 {
        format!("{}m ago", elapsed_ms / 60_000)
    } else if elapsed_ms < 86_400_000 {
        format!("{}h ago", elapsed_ms / 3_600_000)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_blank_input_renders_empty_in_every_format() {
        for format in ResultFormat::ALL {
            assert_eq!(format_result("", format), "");
            assert_eq!(format_result(" \n\t ", format), "");
        }
    }

    #[test]
    fn test_text_report_lines() {
        let out = format_result("Hello world. Foo bar!", ResultFormat::Text);
        assert!(out.contains("Word Count: 4"));
        assert!(out.contains("Sentence Count: 2"));
        assert!(out.contains("Average Words per Sentence: 2.0"));
        assert_eq!(out.lines().count(), 7);
    }

    #[test]
    fn test_json_is_pretty_printed_with_two_spaces() {
        assert_eq!(
            format_result("{\"a\":1}", ResultFormat::Json),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_json_prints_integral_floats_as_integers() {
        let out = format_result(r#"{"a":1.0,"b":1e2,"c":[-3.0,2.5],"d":-0.0}"#, ResultFormat::Json);
        assert_eq!(
            out,
            "{\n  \"a\": 1,\n  \"b\": 100,\n  \"c\": [\n    -3,\n    2.5\n  ],\n  \"d\": 0\n}"
        );
    }

    #[test]
    fn test_json_preserves_key_order() {
        let out = format_result(r#"{"zeta":1,"alpha":[true,null]}"#, ResultFormat::Json);
        assert!(out.find("zeta").unwrap() < out.find("alpha").unwrap());
    }

    #[test]
    fn test_invalid_json_falls_back_to_text_report() {
        assert_eq!(
            format_result("not json", ResultFormat::Json),
            format_result("not json", ResultFormat::Text)
        );
    }

    #[test]
    fn test_json_round_trip_is_structurally_equal() {
        let input = r#"{"list":[1,2,{"k":"v"}],"nested":{"x":-0.5,"y":"z"}}"#;
        let out = format_result(input, ResultFormat::Json);
        let before: serde_json::Value = serde_json::from_str(input).unwrap();
        let after: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_html_collapses_whitespace_between_tags() {
        let html = "  <div>\n    <p>Hello   world</p>\n  </div>  ";
        assert_eq!(
            format_result(html, ResultFormat::Html),
            "<div><p>Hello world</p></div>"
        );
    }

    #[test]
    fn test_html_keeps_text_spacing_inside_tags() {
        assert_eq!(normalize_html("<b> bold </b>").unwrap(), "<b> bold </b>");
    }

    #[test]
    fn test_unknown_format_name_renders_text_report() {
        assert_eq!(
            format_raw("One two.", "yaml"),
            format_result("One two.", ResultFormat::Text)
        );
        assert_eq!(format_raw("{\"a\":1}", "json"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("html".parse::<ResultFormat>(), Ok(ResultFormat::Html));
        assert!("HTML".parse::<ResultFormat>().is_err());
        assert_eq!(ResultFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_error_detection_is_case_sensitive_per_variant() {
        assert!(is_error_result("Processing Error: boom"));
        assert!(is_error_result("parse error: boom"));
        assert!(!is_error_result("ERROR: boom"));
        assert!(!is_error_result("Word Count: 2"));
    }

    #[test]
    fn test_result_stats_describe_output() {
        let now = at(0);
        let result = FormattedResult::compute("{\"a\":1}", ResultFormat::Json, now);
        let stats = result.stats.unwrap();
        assert_eq!(stats.line_count, 3);
        assert_eq!(stats.char_count, result.output.chars().count());
        assert_eq!(stats.processed_at, now);
        assert!(!result.is_error);

        let empty = FormattedResult::compute("  ", ResultFormat::Text, now);
        assert!(empty.stats.is_none());
        assert_eq!(empty.updated_label(now), "--");
    }

    #[test]
    fn test_relative_label_buckets() {
        let then = at(0);
        assert_eq!(relative_label(Some(then), then + Duration::seconds(59)), "just now");
        assert_eq!(relative_label(Some(then), then + Duration::minutes(5)), "5m ago");
        assert_eq!(relative_label(Some(then), then + Duration::hours(3)), "3h ago");
        assert_eq!(
            relative_label(Some(then), then + Duration::days(2)),
            then.format("%Y-%m-%d").to_string()
        );
        assert_eq!(relative_label(None, then), "--");
    }

    proptest! {
        #[test]
        fn prop_format_is_idempotent(input in ".{0,200}", idx in 0usize..3) {
            let format = ResultFormat::ALL[idx];
            prop_assert_eq!(format_result(&input, format), format_result(&input, format));
        }

        #[test]
        fn prop_html_output_has_no_whitespace_runs(input in "[<>a-z \n\t]{0,80}") {
            let out = format_result(&input, ResultFormat::Html);
            prop_assert!(!out.contains("  "));
            prop_assert!(!out.contains('\n'));
            prop_assert_eq!(out.trim(), out.as_str());
        }
    }
}
