//! Human-readable signature insight text.

use stakeout_core::constants::DAY_NAMES;
use stakeout_core::types::collections::SmallVec8;

use super::types::Strictness;

/// Inputs the insight composer reads off a finished signature.
pub(crate) struct InsightContext<'a> {
    pub peak_hours: &'a [u8],
    pub peak_days: &'a [u8],
    pub hour_concentration: f64,
    pub primary_method: &'a str,
    pub strictness: Strictness,
    pub avg_speed_over: f64,
    pub is_significant: bool,
    pub hour_pvalue: f64,
}

/// Compose the signature insight from its applicable clauses.
///
/// Clause order: temporal concentration, detection method, strictness,
/// significance. Joined with ". " plus a final period; a signature with no
/// applicable clause gets a fixed no-pattern sentence.
pub(crate) fn generate_insight(ctx: &InsightContext<'_>) -> String {
    let mut parts: SmallVec8<String> = SmallVec8::new();

    if ctx.hour_concentration > 0.5 {
        let pct = (ctx.hour_concentration * 100.0) as i64;
        let hour_range = format_hour_range(&ctx.peak_hours[..ctx.peak_hours.len().min(2)]);
        let days: Vec<&str> = ctx
            .peak_days
            .iter()
            .take(2)
            .map(|&d| &DAY_NAMES[d as usize][..3])
            .collect();
        parts.push(format!(
            "{pct}% of stops occur {hour_range} on {}",
            days.join("/")
        ));
    }

    if !ctx.primary_method.is_empty() && ctx.primary_method != "unknown" {
        parts.push(format!("{} detection zone", title_case(ctx.primary_method)));
    }

    match ctx.strictness {
        Strictness::Strict => parts.push(format!(
            "Strict enforcement (avg {:.0} over)",
            ctx.avg_speed_over
        )),
        Strictness::Lenient => parts.push(format!(
            "Lenient enforcement (avg {:.0} over)",
            ctx.avg_speed_over
        )),
        Strictness::Moderate => {}
    }

    if ctx.is_significant && ctx.hour_pvalue < 0.01 {
        parts.push("Pattern highly significant (p < 0.01)".to_string());
    } else if ctx.is_significant {
        parts.push("Pattern statistically significant".to_string());
    }

    if parts.is_empty() {
        "No significant patterns detected.".to_string()
    } else {
        format!("{}.", parts.join(". "))
    }
}

/// Format a list of hours as a half-open readable range.
pub(crate) fn format_hour_range(hours: &[u8]) -> String {
    if hours.is_empty() {
        return String::new();
    }
    let mut sorted: SmallVec8<u8> = hours.iter().copied().collect();
    sorted.sort_unstable();
    if sorted.len() == 1 {
        format!("{}:00", sorted[0])
    } else {
        format!("{}:00-{}:00", sorted[0], sorted[sorted.len() - 1] + 1)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
