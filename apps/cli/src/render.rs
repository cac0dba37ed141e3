use std::fmt::Write;

use chrono::{DateTime, Local};
use colored::{ColoredString, Colorize};
use watch_app::UsageReport;
use watch_core::UsagePolicy;

const MODEL_COLUMN_WIDTH: usize = 17;

pub fn format_tokens(value: u64) -> String {
    if value >= 1_000_000 {
        return format!("{:.1}M", value as f64 / 1_000_000.0);
    }
    if value >= 1_000 {
        return format!("{:.1}k", value as f64 / 1_000.0);
    }
    value.to_string()
}

fn truncate_model(model: &str) -> String {
    if model.chars().count() > MODEL_COLUMN_WIDTH {
        let head: String = model.chars().take(MODEL_COLUMN_WIDTH).collect();
        format!("{}...", head)
    } else {
        model.to_string()
    }
}

/// `2025-06-01T10:00:00.000Z` becomes `2025-06-01 10:00:00`.
fn short_timestamp(timestamp: &str) -> String {
    timestamp.chars().take(19).collect::<String>().replace('T', " ")
}

fn quota_color(text: String, percent: f64) -> ColoredString {
    if percent < 80.0 {
        text.green().bold()
    } else if percent < 90.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn remaining_color(text: String, remaining: f64) -> ColoredString {
    if remaining > 20.0 {
        text.green().bold()
    } else {
        text.red().bold()
    }
}

pub fn render_report(
    report: &UsageReport,
    policy: &UsagePolicy,
    version: &str,
    now: DateTime<Local>,
) -> String {
    let mut out = String::new();
    let today = &report.stats_today;

    let _ = writeln!(
        out,
        "{}",
        format!("GeminiWatch v{} - Monitoring Report", version)
            .cyan()
            .bold()
    );
    let _ = writeln!(out, "Time: {}", now.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", "-".repeat(50));

    let _ = writeln!(out, "{}", "Today's Usage:".yellow().bold());
    let _ = writeln!(
        out,
        "  Input:         {} (Billable: {}, Cached: {})",
        format_tokens(today.input_tokens),
        format_tokens(report.billable_input),
        format_tokens(today.cached_tokens)
    );
    let _ = writeln!(out, "  Output:        {}", format_tokens(today.output_tokens));
    let _ = writeln!(out, "  Thoughts:      {}", format_tokens(today.thought_tokens));
    let _ = writeln!(out, "  Est. Cost:     ${:.4}", report.cost.total_cost_usd);
    let _ = writeln!(
        out,
        "  Token Quota:   {} (of {})",
        quota_color(
            format!("{:.1}%", report.token_quota_percent),
            report.token_quota_percent
        ),
        format_tokens(policy.daily_token_quota)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Model Request Usage (Today):".yellow().bold());
    let _ = writeln!(out, "{:<25} {:<10} {:<15}", "Model", "Reqs", "Usage Left");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for quota in &report.model_quotas {
        let _ = writeln!(
            out,
            "{:<25} {:<10} {}",
            quota.model,
            quota.requests,
            remaining_color(
                format!("{:.1}%", quota.remaining_percent),
                quota.remaining_percent
            )
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Total Usage:".yellow().bold());
    let _ = writeln!(out, "  Total Requests: {}", report.total_requests);
    let _ = writeln!(
        out,
        "  Lifetime Tokens: {}",
        format_tokens(report.lifetime_tokens())
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Recent Activity:".yellow().bold());
    let _ = writeln!(out, "{:<20} {:<20} {:<20}", "Time", "Model", "In/Out/Cache");
    let _ = writeln!(out, "{}", "-".repeat(65));
    for row in &report.recent {
        let record = &row.record;
        let tokens = format!(
            "{}/{}/{}",
            format_tokens(record.usage.input_tokens),
            format_tokens(record.usage.output_tokens),
            format_tokens(record.usage.cached_tokens)
        );
        let _ = writeln!(
            out,
            "{:<20} {:<20} {:<20}",
            short_timestamp(&record.timestamp),
            truncate_model(&record.model),
            tokens
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use watch_core::{ModelCounts, Stats, StoredRecord, TokenSums, UsageRecord, UsageTotals};

    use super::*;

    #[test]
    fn format_tokens_uses_k_and_m_suffixes() {
        assert_eq!(format_tokens(999), "999");
        assert_eq!(format_tokens(1_000), "1.0k");
        assert_eq!(format_tokens(12_345), "12.3k");
        assert_eq!(format_tokens(10_000_000), "10.0M");
    }

    #[test]
    fn long_model_names_are_truncated() {
        assert_eq!(truncate_model("gemini-2.5-pro"), "gemini-2.5-pro");
        assert_eq!(
            truncate_model("gemini-2.5-flash-preview-05-20"),
            "gemini-2.5-flash-..."
        );
    }

    #[test]
    fn short_timestamp_drops_fraction_and_zone() {
        assert_eq!(
            short_timestamp("2025-06-01T10:00:00.123Z"),
            "2025-06-01 10:00:00"
        );
    }

    #[test]
    fn report_lists_sections_and_recent_rows() {
        let stats = Stats {
            today: TokenSums {
                input_tokens: 1_500,
                output_tokens: 200,
                cached_tokens: 500,
                thought_tokens: 10,
            },
            lifetime: TokenSums::default(),
            total_requests: 3,
        };
        let mut counts = ModelCounts::new();
        counts.insert("gemini-2.5-pro".to_string(), 3);
        let recent = vec![StoredRecord {
            id: 1,
            record: UsageRecord {
                session_id: "s".to_string(),
                message_id: "m".to_string(),
                timestamp: "2025-06-01T10:00:00Z".to_string(),
                model: "gemini-2.5-pro".to_string(),
                usage: UsageTotals {
                    input_tokens: 1_500,
                    output_tokens: 200,
                    cached_tokens: 500,
                    thought_tokens: 10,
                    total_tokens: 1_710,
                },
            },
        }];
        let policy = UsagePolicy::default();
        let report = UsageReport::build(stats, counts, recent, &policy);
        let now = Local
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("local time");

        let text = render_report(&report, &policy, "1.1.0", now);

        assert!(text.contains("GeminiWatch v1.1.0 - Monitoring Report"));
        assert!(text.contains("Billable: 1.0k, Cached: 500"));
        assert!(text.contains("Total Requests: 3"));
        assert!(text.contains("2025-06-01 10:00:00"));
        assert!(text.contains("1.5k/200/500"));
    }
}
