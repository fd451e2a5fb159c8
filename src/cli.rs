// Command-line interface definitions

use clap::{Parser, Subcommand, ValueEnum};
use ward_economics::{InterventionKind, UseCase};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Short stdout report
    Summary,
    /// Full report with the uncertainty section
    Detailed,
    /// Machine-readable JSON
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UseCaseArg {
    MentalHealth,
    DischargeEducation,
    MedicationAdherence,
    /// All three use cases as a portfolio
    All,
}

impl UseCaseArg {
    /// `None` means the whole portfolio
    pub fn to_use_case(self) -> Option<UseCase> {
        match self {
            UseCaseArg::MentalHealth => Some(UseCase::MentalHealth),
            UseCaseArg::DischargeEducation => Some(UseCase::DischargeEducation),
            UseCaseArg::MedicationAdherence => Some(UseCase::MedicationAdherence),
            UseCaseArg::All => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InterventionArg {
    BasicAlerts,
    DischargeTeam,
    CommandCenter,
    AiAnalytics,
    CombinedAdvanced,
}

impl InterventionArg {
    pub fn to_kind(self) -> InterventionKind {
        match self {
            InterventionArg::BasicAlerts => InterventionKind::BasicAlerts,
            InterventionArg::DischargeTeam => InterventionKind::DischargeTeam,
            InterventionArg::CommandCenter => InterventionKind::CommandCenter,
            InterventionArg::AiAnalytics => InterventionKind::AiAnalytics,
            InterventionArg::CombinedAdvanced => InterventionKind::CombinedAdvanced,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ward-economics")]
#[command(about = "Hospital operations ROI estimates with Monte Carlo uncertainty", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bed turnover improvement ROI with uncertainty analysis
    BedTurnover {
        /// JSON config file with hospital parameters
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of hospital beds
        #[arg(long)]
        beds: Option<u32>,

        /// Average occupancy rate (0-1)
        #[arg(long)]
        occupancy: Option<f64>,

        /// Revenue per occupied bed day
        #[arg(long)]
        revenue_per_bed_day: Option<f64>,

        /// Current turnover time in minutes
        #[arg(long)]
        current_minutes: Option<f64>,

        /// Target turnover time in minutes
        #[arg(long)]
        target_minutes: Option<f64>,

        /// Analysis horizon in years
        #[arg(long)]
        years: Option<u32>,

        /// Monte Carlo iterations
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,

        /// Random seed (fixed for reproducible runs)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Confidence level for intervals
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,

        /// Append one-at-a-time sensitivity sweeps
        #[arg(long)]
        sensitivity: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Write raw/summary/percentile CSVs with this filename prefix
        #[arg(long)]
        export_csv: Option<String>,

        /// Write the uncertainty report as JSON to this path
        #[arg(long)]
        export_json: Option<PathBuf>,
    },

    /// Virtual care avatar deployment ROI by use case
    Avatar {
        /// Use case to analyze
        #[arg(long, value_enum, default_value = "discharge-education")]
        use_case: UseCaseArg,

        /// Number of hospital beds
        #[arg(long, default_value_t = 300)]
        hospital_beds: u32,

        /// Analysis period in months
        #[arg(long, default_value_t = 36)]
        months: u32,

        /// Monthly patient volume (overrides the size-based default)
        #[arg(long)]
        patient_volume: Option<f64>,

        /// Monte Carlo iterations
        #[arg(long, default_value_t = 10_000)]
        iterations: usize,

        /// Random seed (fixed for reproducible runs)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Confidence level for intervals
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// ED boarding cost baseline and intervention comparison
    EdBoarding {
        /// Number of hospital beds
        #[arg(long, default_value_t = 200)]
        beds: u32,

        /// Average boarding hours per boarded patient
        #[arg(long, default_value_t = 6.9)]
        boarding_hours: f64,

        /// Explicit annual boarding hours (overrides the size-based estimate)
        #[arg(long)]
        annual_hours: Option<f64>,

        /// Analysis horizon in years
        #[arg(long, default_value_t = 5)]
        years: u32,

        /// Intervention to break down year by year
        #[arg(long, value_enum)]
        intervention: Option<InterventionArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },

    /// Fully-loaded nurse time valuation and intervention ROI
    NurseTime {
        /// Base hourly wage (defaults to the regional adjusted median)
        #[arg(long)]
        hourly_wage: Option<f64>,

        /// Region for wage adjustment
        #[arg(long, default_value = "National Average")]
        region: String,

        /// Minutes returned to productive time per shift
        #[arg(long, default_value_t = 5.0)]
        minutes_saved: f64,

        /// One-time intervention cost
        #[arg(long, default_value_t = 3_600.0)]
        implementation_cost: f64,

        /// RN FTEs affected
        #[arg(long, default_value_t = 500)]
        nurses: u32,

        /// Shifts per nurse per year
        #[arg(long, default_value_t = 730)]
        shifts_per_year: u32,

        /// Also price this many wasted minutes per shift
        #[arg(long)]
        minutes_wasted: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
