// Ward Economics - Core Library
// Hospital operations ROI calculators with Monte Carlo uncertainty analysis

pub mod calculators;
pub mod config;
pub mod distributions;
pub mod finance;
pub mod report;
pub mod simulation;
pub mod stats;

// Re-export commonly used types
pub use config::HospitalConfig;
pub use distributions::{InputDistribution, UncertainInput};
pub use finance::{npv, payback_months, roi_percentage, ScenarioOutcome, ZERO_INVESTMENT_ROI_PCT};
pub use simulation::{
    MonteCarloEngine, Scenario, SimulationSettings, SimulationTable, UncertaintyReport,
};
pub use stats::{percentile_sorted, summarize, MetricSummary};

pub use calculators::avatar::{
    AvatarRoiCalculator, AvatarScenario, PortfolioRoi, UseCase, UseCaseRoi,
};
pub use calculators::bed_turnover::{
    BedTurnoverAnalysis, BedTurnoverCalculator, SensitivityAnalysis, TurnoverScenario,
};
pub use calculators::ed_boarding::{
    BoardingBaseline, BoardingRoiCalculator, InterventionKind, InterventionRoi,
};
pub use calculators::nurse_time::{CostBreakdown, NurseTimeCalculator, TimeSavingRoi, WasteCost};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
