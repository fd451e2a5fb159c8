// 🚑 ED Boarding ROI - Intervention comparison
// Prices the hours admitted patients spend parked in the ED, then compares
// named interventions by cost, boarding reduction and time-to-impact

use crate::finance;
use crate::report::{banner, format_count, format_usd, section};
use serde::{Deserialize, Serialize};

/// Hourly cost of one boarded patient: lost ED treatment capacity
const LOST_ED_CAPACITY_PER_HOUR: f64 = 137.0;

/// Hourly cost of one boarded patient: nursing overtime
const OVERTIME_PER_HOUR: f64 = 82.0;

/// Average ED visit length in hours, for lost-visit conversion
const AVG_ED_VISIT_HOURS: f64 = 3.0;

/// Average revenue per ED visit
const REVENUE_PER_ED_VISIT: f64 = 650.0;

/// Annual revenue attributed to one virtual bed of recovered capacity
const VIRTUAL_BED_ANNUAL_VALUE: f64 = 500_000.0;

/// NPV discount rate for boarding interventions
const DISCOUNT_RATE: f64 = 0.10;

// ============================================================================
// INTERVENTION CATALOGUE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionKind {
    BasicAlerts,
    DischargeTeam,
    CommandCenter,
    AiAnalytics,
    CombinedAdvanced,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intervention {
    pub name: &'static str,
    /// Recurring annual cost (zero for interventions using existing systems)
    pub annual_cost: f64,
    /// Fraction of boarding hours eliminated at full effectiveness
    pub boarding_reduction: f64,
    /// Months until fully operational
    pub implementation_months: u32,
    /// Equivalent inpatient capacity created, if any
    pub virtual_beds: Option<u32>,
}

impl InterventionKind {
    pub fn all() -> [InterventionKind; 5] {
        [
            InterventionKind::BasicAlerts,
            InterventionKind::DischargeTeam,
            InterventionKind::CommandCenter,
            InterventionKind::AiAnalytics,
            InterventionKind::CombinedAdvanced,
        ]
    }

    pub fn details(&self) -> Intervention {
        match self {
            InterventionKind::BasicAlerts => Intervention {
                name: "Basic Alerts",
                annual_cost: 0.0,
                boarding_reduction: 0.31,
                implementation_months: 1,
                virtual_beds: None,
            },
            InterventionKind::DischargeTeam => Intervention {
                name: "Discharge Team",
                // RN + case manager + transport
                annual_cost: 312_000.0,
                boarding_reduction: 0.47,
                implementation_months: 3,
                virtual_beds: None,
            },
            InterventionKind::CommandCenter => Intervention {
                name: "Command Center",
                // Annualized from a $1.2M investment
                annual_cost: 600_000.0,
                boarding_reduction: 0.30,
                implementation_months: 6,
                virtual_beds: Some(14),
            },
            InterventionKind::AiAnalytics => Intervention {
                name: "AI Analytics",
                annual_cost: 200_000.0,
                boarding_reduction: 0.65,
                implementation_months: 4,
                virtual_beds: None,
            },
            InterventionKind::CombinedAdvanced => Intervention {
                name: "Combined Advanced",
                annual_cost: 800_000.0,
                boarding_reduction: 0.70,
                implementation_months: 9,
                virtual_beds: Some(16),
            },
        }
    }
}

// ============================================================================
// RESULT RECORDS
// ============================================================================

/// Current-state boarding load and its cost
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardingBaseline {
    pub avg_boarding_hours: f64,
    pub annual_boarding_hours: f64,
    pub annual_cost: f64,
    pub lost_ed_capacity_cost: f64,
    pub overtime_cost: f64,
    pub ed_visits_lost: f64,
    pub revenue_lost: f64,
}

/// One year of an intervention's cash flows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterventionYear {
    pub year: u32,
    pub boarding_hours_saved: f64,
    pub direct_savings: f64,
    pub revenue_recovery: f64,
    pub virtual_bed_value: f64,
    pub total_benefits: f64,
    pub intervention_cost: f64,
    pub net_benefit: f64,
    pub cumulative_net_benefit: f64,
}

/// Multi-year analysis of one intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionRoi {
    pub kind: InterventionKind,
    pub years: Vec<InterventionYear>,
    pub total_net_benefit: f64,
    pub payback_months: Option<u32>,
    pub npv: f64,
    pub avg_annual_net_benefit: f64,
}

// ============================================================================
// CALCULATOR
// ============================================================================

pub struct BoardingRoiCalculator {
    hospital_beds: u32,
}

impl BoardingRoiCalculator {
    pub fn new(hospital_beds: u32) -> Self {
        BoardingRoiCalculator { hospital_beds }
    }

    pub fn total_cost_per_hour() -> f64 {
        LOST_ED_CAPACITY_PER_HOUR + OVERTIME_PER_HOUR
    }

    /// Current-state boarding metrics
    ///
    /// Without an explicit annual figure, the load is estimated from hospital
    /// size: 10% of beds hold a boarded patient daily at the given average.
    pub fn baseline(
        &self,
        avg_boarding_hours: f64,
        annual_boarding_hours: Option<f64>,
    ) -> BoardingBaseline {
        let annual_hours = annual_boarding_hours.unwrap_or_else(|| {
            let daily_boarding_patients = self.hospital_beds as f64 * 0.1;
            daily_boarding_patients * avg_boarding_hours * 365.0
        });

        let ed_visits_lost = annual_hours / AVG_ED_VISIT_HOURS;

        BoardingBaseline {
            avg_boarding_hours,
            annual_boarding_hours: annual_hours,
            annual_cost: annual_hours * Self::total_cost_per_hour(),
            lost_ed_capacity_cost: annual_hours * LOST_ED_CAPACITY_PER_HOUR,
            overtime_cost: annual_hours * OVERTIME_PER_HOUR,
            ed_visits_lost,
            revenue_lost: ed_visits_lost * REVENUE_PER_ED_VISIT,
        }
    }

    /// Year-by-year ROI for one intervention, with first-year ramp-up
    pub fn intervention_roi(
        &self,
        kind: InterventionKind,
        baseline: &BoardingBaseline,
        years: u32,
    ) -> InterventionRoi {
        let intervention = kind.details();
        let mut rows: Vec<InterventionYear> = Vec::with_capacity(years as usize);
        let mut cumulative = 0.0;

        for year in 0..years {
            // Year one is partial: only the months after go-live count
            let effectiveness = if year == 0 {
                intervention.boarding_reduction
                    * (12.0 - intervention.implementation_months as f64)
                    / 12.0
            } else {
                intervention.boarding_reduction
            };

            let reduced_hours = baseline.annual_boarding_hours * effectiveness;
            let direct_savings = reduced_hours * Self::total_cost_per_hour();

            let ed_visits_recovered = reduced_hours / AVG_ED_VISIT_HOURS;
            let revenue_recovery = ed_visits_recovered * REVENUE_PER_ED_VISIT;

            let virtual_bed_value = intervention
                .virtual_beds
                .map(|beds| beds as f64 * VIRTUAL_BED_ANNUAL_VALUE)
                .unwrap_or(0.0);

            let total_benefits = direct_savings + revenue_recovery + virtual_bed_value;
            let net_benefit = total_benefits - intervention.annual_cost;
            cumulative += net_benefit;

            rows.push(InterventionYear {
                year: year + 1,
                boarding_hours_saved: reduced_hours,
                direct_savings,
                revenue_recovery,
                virtual_bed_value,
                total_benefits,
                intervention_cost: intervention.annual_cost,
                net_benefit,
                cumulative_net_benefit: cumulative,
            });
        }

        // Free interventions pay back immediately by definition
        let payback_months = if intervention.annual_cost == 0.0 {
            Some(0)
        } else {
            rows.iter()
                .find(|row| row.cumulative_net_benefit > 0.0)
                .map(|row| row.year * 12)
        };

        let cash_flows: Vec<f64> = rows.iter().map(|r| r.net_benefit).collect();
        // Years are indexed from 1 here, so even the first flow is discounted
        let npv = finance::npv(&cash_flows, DISCOUNT_RATE) / (1.0 + DISCOUNT_RATE);

        let avg_annual_net_benefit = if rows.is_empty() {
            0.0
        } else {
            cash_flows.iter().sum::<f64>() / cash_flows.len() as f64
        };

        InterventionRoi {
            kind,
            total_net_benefit: cumulative,
            payback_months,
            npv,
            avg_annual_net_benefit,
            years: rows,
        }
    }

    /// All interventions ranked by total net benefit, best first
    pub fn comparison(&self, baseline: &BoardingBaseline, years: u32) -> Vec<InterventionRoi> {
        let mut results: Vec<InterventionRoi> = InterventionKind::all()
            .iter()
            .map(|&kind| self.intervention_roi(kind, baseline, years))
            .collect();
        results.sort_by(|a, b| {
            b.total_net_benefit
                .partial_cmp(&a.total_net_benefit)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results
    }

    /// Executive text report across the whole catalogue
    pub fn executive_report(&self, baseline: &BoardingBaseline, years: u32) -> String {
        let mut out = String::new();
        out.push_str(&banner("ED BOARDING ROI ANALYSIS - EXECUTIVE SUMMARY"));
        out.push('\n');
        out.push_str(&format!("Hospital Size: {} beds\n", self.hospital_beds));
        out.push_str("Current State Analysis:\n");
        out.push_str(&format!(
            "  - Annual boarding hours: {}\n",
            format_count(baseline.annual_boarding_hours)
        ));
        out.push_str(&format!(
            "  - Annual boarding cost: {}\n",
            format_usd(baseline.annual_cost)
        ));
        out.push_str(&format!(
            "  - Lost ED visits: {}\n",
            format_count(baseline.ed_visits_lost)
        ));
        out.push_str(&format!(
            "  - Lost revenue: {}\n",
            format_usd(baseline.revenue_lost)
        ));

        out.push_str(&format!("\n{}\n", section("INTERVENTION COMPARISON")));
        for result in self.comparison(baseline, years) {
            let details = result.kind.details();
            out.push_str(&format!("\n{}:\n", details.name));
            out.push_str(&format!(
                "  Investment: {}/year\n",
                format_usd(details.annual_cost)
            ));
            out.push_str(&format!(
                "  Boarding reduction: {:.0}%\n",
                details.boarding_reduction * 100.0
            ));
            out.push_str(&format!(
                "  {}-year net benefit: {}\n",
                years,
                format_usd(result.total_net_benefit)
            ));
            match result.payback_months {
                Some(0) => out.push_str("  Payback period: immediate (no recurring cost)\n"),
                Some(months) => {
                    out.push_str(&format!("  Payback period: {} months\n", months))
                }
                None => out.push_str("  Payback period: not reached\n"),
            }
            out.push_str(&format!(
                "  Average annual return: {}\n",
                format_usd(result.avg_annual_net_benefit)
            ));
        }
        out
    }
}

impl InterventionRoi {
    /// Year-by-year breakdown for the detailed output
    pub fn detailed(&self) -> String {
        let details = self.kind.details();
        let mut out = String::new();
        out.push_str(&banner(&format!(
            "DETAILED ANALYSIS: {}",
            details.name.to_uppercase()
        )));
        out.push('\n');
        for row in &self.years {
            out.push_str(&format!("\nYear {}:\n", row.year));
            out.push_str(&format!(
                "  Boarding hours saved: {}\n",
                format_count(row.boarding_hours_saved)
            ));
            out.push_str(&format!(
                "  Direct savings: {}\n",
                format_usd(row.direct_savings)
            ));
            out.push_str(&format!(
                "  Revenue recovery: {}\n",
                format_usd(row.revenue_recovery)
            ));
            if row.virtual_bed_value > 0.0 {
                out.push_str(&format!(
                    "  Virtual bed value: {}\n",
                    format_usd(row.virtual_bed_value)
                ));
            }
            out.push_str(&format!(
                "  Net benefit: {}\n",
                format_usd(row.net_benefit)
            ));
            out.push_str(&format!(
                "  Cumulative: {}\n",
                format_usd(row.cumulative_net_benefit)
            ));
        }
        out.push_str(&format!("\nNPV: {}\n", format_usd(self.npv)));
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
