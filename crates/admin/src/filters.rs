//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Maps a badge tone (`success`, `info`, `warning`, `critical`) to its CSS
/// classes. Unknown tones get the neutral badge.
///
/// Usage in templates: `{{ row.status_tone|tone_class }}`
#[askama::filter_fn]
pub fn tone_class(tone: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(tone_css(&tone.to_string()))
}

fn tone_css(tone: &str) -> &'static str {
    match tone {
        "success" => "bg-green-100 text-green-700",
        "info" => "bg-blue-100 text-blue-700",
        "warning" => "bg-yellow-100 text-yellow-700",
        "critical" => "bg-red-100 text-red-700",
        _ => "bg-gray-100 text-gray-700",
    }
}
