// 📝 Report Formatting - Shared text helpers
// Dollar/count formatting and section rules used by every calculator report

// ============================================================================
// CURRENCY & NUMBER FORMATTING
// ============================================================================

/// Format a dollar amount with thousands separators, rounded to whole dollars
///
/// Example: `format_usd(1234567.89)` -> `"$1,234,568"`
pub fn format_usd(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-${}", group_thousands(-rounded))
    } else {
        format!("${}", group_thousands(rounded))
    }
}

/// Format a dollar amount with cents (two decimal places)
pub fn format_usd_cents(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}${}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}

/// Format a count with thousands separators, rounded to a whole number
pub fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    if rounded < 0 {
        format!("-{}", group_thousands(-rounded))
    } else {
        group_thousands(rounded)
    }
}

/// Format a fraction (0.0-1.0) as a percentage with one decimal place
pub fn format_pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn group_thousands(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// SECTION LAYOUT
// ============================================================================

/// A top-level report banner: title between two rules of '='
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(title.len().max(60));
    format!("{}\n{}\n{}", rule, title, rule)
}

/// A section heading: title underlined with '-'
pub fn section(title: &str) -> String {
    format!("{}\n{}", title, "-".repeat(title.len()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd_grouping() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1234.5), "$1,235");
        assert_eq!(format_usd(1_234_567.89), "$1,234,568");
        assert_eq!(format_usd(-350_000.0), "-$350,000");
    }

    #[test]
    fn test_format_usd_cents() {
        assert_eq!(format_usd_cents(47.32), "$47.32");
        assert_eq!(format_usd_cents(1420.5), "$1,420.50");
        assert_eq!(format_usd_cents(-0.79), "-$0.79");
    }

    #[test]
    fn test_format_count_and_pct() {
        assert_eq!(format_count(20531.7), "20,532");
        assert_eq!(format_pct(0.755), "75.5%");
    }

    #[test]
    fn test_banner_width() {
        let b = banner("ROI ANALYSIS");
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 60);
        assert_eq!(lines[0], lines[2]);
    }
}
