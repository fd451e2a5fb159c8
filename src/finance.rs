// 💵 Financial Arithmetic - Discounted cash flow primitives
// Pure functions shared by the point-estimate path and the Monte Carlo path,
// so both report the same economics for the same inputs

use serde::{Deserialize, Serialize};

/// ROI reported when the investment is zero
///
/// A zero denominator must not raise; with nothing invested the percentage
/// return is reported as this sentinel and callers that care distinguish the
/// "free and beneficial" case from the net-benefit figure instead.
pub const ZERO_INVESTMENT_ROI_PCT: f64 = 0.0;

// ============================================================================
// SCENARIO OUTCOME
// ============================================================================

/// The financial outcome of one scenario (point estimate or a single
/// Monte Carlo draw)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Total annual benefit in dollars
    pub annual_benefit: f64,

    /// Return on investment over the analysis horizon, in percent
    pub roi_pct: f64,

    /// Net present value over the analysis horizon
    pub npv: f64,

    /// Months until cumulative cash flow turns positive; `None` when the
    /// scenario never breaks even within its horizon
    pub payback_months: Option<f64>,
}

// ============================================================================
// DISCOUNTED CASH FLOW
// ============================================================================

/// Net present value of year-indexed cash flows
///
/// The first flow is year 0 (undiscounted), matching the convention of
/// `sum(cf / (1 + r)^i)` with `i` starting at zero.
pub fn npv(cash_flows: &[f64], discount_rate: f64) -> f64 {
    cash_flows
        .iter()
        .enumerate()
        .map(|(year, cf)| cf / (1.0 + discount_rate).powi(year as i32))
        .sum()
}

/// Simple ROI percentage: (return - investment) / investment * 100
///
/// Zero or negative investment reports [`ZERO_INVESTMENT_ROI_PCT`] instead of
/// dividing by zero.
pub fn roi_percentage(total_return: f64, total_investment: f64) -> f64 {
    if total_investment <= 0.0 {
        return ZERO_INVESTMENT_ROI_PCT;
    }
    (total_return - total_investment) / total_investment * 100.0
}

/// First month (1-indexed) where cumulative net cash flow reaches zero
///
/// `monthly_net_flows` is the month-by-month net cash flow over the whole
/// horizon. Returns `None` when the schedule never breaks even.
pub fn payback_months(monthly_net_flows: &[f64]) -> Option<u32> {
    let mut cumulative = 0.0;
    for (month, flow) in monthly_net_flows.iter().enumerate() {
        cumulative += flow;
        if cumulative >= 0.0 {
            return Some(month as u32 + 1);
        }
    }
    None
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npv_discounts_later_years() {
        // Year 0 undiscounted, year 1 discounted once
        let flows = [1000.0, 1080.0];
        let value = npv(&flows, 0.08);
        assert!((value - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_npv_negative_first_year() {
        let flows = [-500_000.0, 200_000.0, 200_000.0, 200_000.0];
        let value = npv(&flows, 0.10);
        let expected = -500_000.0 + 200_000.0 / 1.10 + 200_000.0 / 1.21 + 200_000.0 / 1.331;
        assert!((value - expected).abs() < 1e-6);
    }

    #[test]
    fn test_roi_percentage() {
        assert_eq!(roi_percentage(150.0, 100.0), 50.0);
        assert_eq!(roi_percentage(50.0, 100.0), -50.0);
    }

    #[test]
    fn test_roi_zero_investment_is_sentinel_not_panic() {
        // Edge case: a free intervention must not divide by zero
        assert_eq!(roi_percentage(1_000_000.0, 0.0), ZERO_INVESTMENT_ROI_PCT);
        assert_eq!(roi_percentage(0.0, 0.0), ZERO_INVESTMENT_ROI_PCT);
        println!("✅ Zero-investment ROI sentinel test passed");
    }

    #[test]
    fn test_payback_first_positive_month() {
        // -100 up front, +30/month afterwards: cumulative hits 0 in month 5
        let mut flows = vec![-100.0];
        flows.extend(std::iter::repeat(30.0).take(11));
        assert_eq!(payback_months(&flows), Some(5));
    }

    #[test]
    fn test_payback_never_reached() {
        let flows = vec![-100.0, 1.0, 1.0, 1.0];
        assert_eq!(payback_months(&flows), None);
    }

    #[test]
    fn test_payback_immediate() {
        let flows = vec![10.0, 10.0];
        assert_eq!(payback_months(&flows), Some(1));
    }
}
