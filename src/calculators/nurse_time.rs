// ⏱️ Nurse Time Valuation - The fully-loaded cost of an RN minute
// Wage data times a benefits multiplier, then waste and intervention math
// priced in recovered minutes

use crate::finance;
use crate::report::{banner, format_count, format_usd, format_usd_cents};
use serde::{Deserialize, Serialize};

/// National median RN hourly wage (BLS 2024)
pub const NATIONAL_MEDIAN_WAGE: f64 = 47.32;

/// Standard healthcare benefits multiplier range over base wage
pub const BENEFITS_MULTIPLIER_LOW: f64 = 1.8;
pub const BENEFITS_MULTIPLIER_HIGH: f64 = 2.0;

/// Regional wage adjustment relative to the national median
pub fn regional_adjustment(region: &str) -> f64 {
    match region {
        "San Jose, CA" => 1.94,
        "San Francisco, CA" => 1.89,
        "Sacramento, CA" => 1.47,
        "New York, NY" => 1.76,
        "Boston, MA" => 1.68,
        "Rural South" => 0.85,
        "Rural Midwest" => 0.90,
        _ => 1.0,
    }
}

// ============================================================================
// RESULT RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub region: String,
    pub base_hourly_wage: f64,
    pub benefits_multiplier: f64,
    pub fully_loaded_hourly: f64,
    pub cost_per_minute: f64,
    pub cost_per_second: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteCost {
    pub minutes_wasted_per_shift: f64,
    pub cost_per_wasted_minute: f64,
    pub waste_cost_per_shift: f64,
    pub waste_cost_per_nurse_annual: f64,
    pub total_nurses: u32,
    pub total_annual_waste: f64,
    pub hours_wasted_annual: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSavingRoi {
    pub minutes_saved_per_shift: f64,
    pub annual_hours_saved: f64,
    pub total_annual_value: f64,
    pub implementation_cost: f64,
    pub net_annual_benefit: f64,
    pub roi_percentage: f64,
    pub payback_months: Option<f64>,
}

// ============================================================================
// CALCULATOR
// ============================================================================

pub struct NurseTimeCalculator {
    base_wage: f64,
    region: String,
}

impl NurseTimeCalculator {
    /// An explicit wage wins; otherwise the national median is adjusted for
    /// the region
    pub fn new(hourly_wage: Option<f64>, region: &str) -> Self {
        let base_wage =
            hourly_wage.unwrap_or(NATIONAL_MEDIAN_WAGE * regional_adjustment(region));
        NurseTimeCalculator {
            base_wage,
            region: region.to_string(),
        }
    }

    /// Fully-loaded cost including benefits
    pub fn fully_loaded_cost(&self, benefits_multiplier: Option<f64>) -> CostBreakdown {
        let multiplier = benefits_multiplier
            .unwrap_or((BENEFITS_MULTIPLIER_LOW + BENEFITS_MULTIPLIER_HIGH) / 2.0);

        let fully_loaded_hourly = self.base_wage * multiplier;
        let cost_per_minute = fully_loaded_hourly / 60.0;

        CostBreakdown {
            region: self.region.clone(),
            base_hourly_wage: self.base_wage,
            benefits_multiplier: multiplier,
            fully_loaded_hourly,
            cost_per_minute,
            cost_per_second: cost_per_minute / 60.0,
        }
    }

    /// Annual cost of non-value-added minutes across the nursing staff
    pub fn waste_cost(
        &self,
        minutes_wasted_per_shift: f64,
        nurses_count: u32,
        shifts_per_year: u32,
    ) -> WasteCost {
        let cost_per_minute = self.fully_loaded_cost(None).cost_per_minute;

        let waste_per_shift = minutes_wasted_per_shift * cost_per_minute;
        let waste_per_nurse_annual = waste_per_shift * shifts_per_year as f64;
        let total_annual_waste = waste_per_nurse_annual * nurses_count as f64;

        WasteCost {
            minutes_wasted_per_shift,
            cost_per_wasted_minute: cost_per_minute,
            waste_cost_per_shift: waste_per_shift,
            waste_cost_per_nurse_annual: waste_per_nurse_annual,
            total_nurses: nurses_count,
            total_annual_waste,
            hours_wasted_annual: minutes_wasted_per_shift
                * shifts_per_year as f64
                * nurses_count as f64
                / 60.0,
        }
    }

    /// ROI of an intervention that returns minutes to productive time
    pub fn intervention_roi(
        &self,
        minutes_saved_per_shift: f64,
        implementation_cost: f64,
        nurses_count: u32,
        shifts_per_year: u32,
    ) -> TimeSavingRoi {
        let cost_per_minute = self.fully_loaded_cost(None).cost_per_minute;

        let value_per_shift = minutes_saved_per_shift * cost_per_minute;
        let annual_value_per_nurse = value_per_shift * shifts_per_year as f64;
        let total_annual_value = annual_value_per_nurse * nurses_count as f64;

        let net_annual_benefit = total_annual_value - implementation_cost;
        let payback_months = if total_annual_value > 0.0 {
            Some(implementation_cost / (total_annual_value / 12.0))
        } else {
            None
        };

        TimeSavingRoi {
            minutes_saved_per_shift,
            annual_hours_saved: minutes_saved_per_shift
                * shifts_per_year as f64
                * nurses_count as f64
                / 60.0,
            total_annual_value,
            implementation_cost,
            net_annual_benefit,
            roi_percentage: finance::roi_percentage(total_annual_value, implementation_cost),
            payback_months,
        }
    }
}

// ============================================================================
// REPORTS
// ============================================================================

impl CostBreakdown {
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&banner("NURSE TIME VALUATION - COST BREAKDOWN"));
        out.push('\n');
        out.push_str(&format!("Region: {}\n", self.region));
        out.push_str(&format!(
            "Base Hourly Wage: {}\n",
            format_usd_cents(self.base_hourly_wage)
        ));
        out.push_str(&format!(
            "Benefits Multiplier: {:.1}x\n",
            self.benefits_multiplier
        ));
        out.push_str(&format!(
            "\nFully-Loaded Hourly Cost: {}\n",
            format_usd_cents(self.fully_loaded_hourly)
        ));
        out.push_str(&format!(
            "Cost per Minute: {}\n",
            format_usd_cents(self.cost_per_minute)
        ));
        out.push_str(&format!("Cost per Second: ${:.4}\n", self.cost_per_second));
        out
    }
}

impl WasteCost {
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&banner("NURSE TIME WASTE ANALYSIS"));
        out.push('\n');
        out.push_str(&format!(
            "Recoverable minutes per shift: {:.0}\n",
            self.minutes_wasted_per_shift
        ));
        out.push_str(&format!(
            "Cost per wasted minute: {}\n",
            format_usd_cents(self.cost_per_wasted_minute)
        ));
        out.push_str(&format!(
            "Waste cost per shift: {}\n",
            format_usd_cents(self.waste_cost_per_shift)
        ));
        out.push_str(&format!(
            "Waste cost per nurse (annual): {}\n",
            format_usd(self.waste_cost_per_nurse_annual)
        ));
        out.push_str(&format!("Total nursing staff: {} FTEs\n", self.total_nurses));
        out.push_str(&format!(
            "Total annual waste: {}\n",
            format_usd(self.total_annual_waste)
        ));
        out.push_str(&format!(
            "Annual hours wasted: {}\n",
            format_count(self.hours_wasted_annual)
        ));
        out
    }
}

impl TimeSavingRoi {
    pub fn summary(&self) -> String {
        let mut out = String::new();
        out.push_str(&banner("NURSE TIME INTERVENTION ROI"));
        out.push('\n');
        out.push_str(&format!(
            "Minutes saved per shift: {:.0}\n",
            self.minutes_saved_per_shift
        ));
        out.push_str(&format!(
            "Annual hours saved: {}\n",
            format_count(self.annual_hours_saved)
        ));
        out.push_str(&format!(
            "Total annual value: {}\n",
            format_usd(self.total_annual_value)
        ));
        out.push_str(&format!(
            "Implementation cost: {}\n",
            format_usd(self.implementation_cost)
        ));
        out.push_str(&format!(
            "Net annual benefit: {}\n",
            format_usd(self.net_annual_benefit)
        ));
        out.push_str(&format!("ROI: {:.1}%\n", self.roi_percentage));
        match self.payback_months {
            Some(months) => out.push_str(&format!("Payback period: {:.1} months\n", months)),
            None => out.push_str("Payback period: n/a (no annual value)\n"),
        }
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_loaded_cost_national_median() {
        let calc = NurseTimeCalculator::new(None, "National Average");
        let costs = calc.fully_loaded_cost(None);

        assert_eq!(costs.base_hourly_wage, NATIONAL_MEDIAN_WAGE);
        assert_eq!(costs.benefits_multiplier, 1.9);
        // 47.32 * 1.9 = 89.908, just under $1.50/minute
        assert!((costs.fully_loaded_hourly - 89.908).abs() < 1e-9);
        assert!((costs.cost_per_minute - 1.4984667).abs() < 1e-6);
    }

    #[test]
    fn test_regional_adjustment_applied() {
        let calc = NurseTimeCalculator::new(None, "San Jose, CA");
        let costs = calc.fully_loaded_cost(None);
        assert!((costs.base_hourly_wage - NATIONAL_MEDIAN_WAGE * 1.94).abs() < 1e-9);

        // Unknown regions fall back to the national median
        let calc = NurseTimeCalculator::new(None, "Atlantis");
        assert_eq!(calc.fully_loaded_cost(None).base_hourly_wage, NATIONAL_MEDIAN_WAGE);
    }

    #[test]
    fn test_explicit_wage_wins() {
        let calc = NurseTimeCalculator::new(Some(60.0), "San Jose, CA");
        assert_eq!(calc.fully_loaded_cost(None).base_hourly_wage, 60.0);
    }

    #[test]
    fn test_waste_cost_scales_with_staff() {
        let calc = NurseTimeCalculator::new(None, "National Average");
        let waste = calc.waste_cost(50.0, 500, 730);

        let per_minute = calc.fully_loaded_cost(None).cost_per_minute;
        assert!((waste.waste_cost_per_shift - 50.0 * per_minute).abs() < 1e-9);
        assert!(
            (waste.total_annual_waste - 50.0 * per_minute * 730.0 * 500.0).abs() < 1e-6
        );
        // 50 min * 730 shifts * 500 nurses / 60
        assert!((waste.hours_wasted_annual - 304_166.6667).abs() < 0.01);
    }

    #[test]
    fn test_intervention_roi_flowsheet_example() {
        // Flowsheet optimization: 24h of informatics time, 5 minutes/shift back
        let calc = NurseTimeCalculator::new(None, "National Average");
        let roi = calc.intervention_roi(5.0, 24.0 * 150.0, 500, 730);

        assert!(roi.total_annual_value > 2_700_000.0);
        assert!(roi.roi_percentage > 70_000.0);
        let payback = roi.payback_months.unwrap();
        assert!(payback < 1.0, "payback {} should be days, not months", payback);
        println!("✅ Flowsheet ROI test passed: {:.1}%", roi.roi_percentage);
    }

    #[test]
    fn test_zero_cost_intervention_uses_sentinel() {
        let calc = NurseTimeCalculator::new(None, "National Average");
        let roi = calc.intervention_roi(5.0, 0.0, 100, 730);

        // No division by zero; the sentinel value stands in
        assert_eq!(roi.roi_percentage, finance::ZERO_INVESTMENT_ROI_PCT);
        assert_eq!(roi.payback_months, Some(0.0));
        assert!(roi.net_annual_benefit > 0.0);
    }

    #[test]
    fn test_zero_minutes_saved_has_no_payback() {
        let calc = NurseTimeCalculator::new(None, "National Average");
        let roi = calc.intervention_roi(0.0, 10_000.0, 100, 730);

        assert_eq!(roi.total_annual_value, 0.0);
        assert_eq!(roi.payback_months, None);
        assert_eq!(roi.roi_percentage, -100.0);
    }
}
