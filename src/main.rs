mod cli;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use cli::{Cli, Commands, InterventionArg, OutputFormat, UseCaseArg};
use ward_economics::{
    AvatarRoiCalculator, BedTurnoverCalculator, BoardingRoiCalculator, HospitalConfig,
    NurseTimeCalculator, SimulationSettings,
};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::BedTurnover {
            config,
            beds,
            occupancy,
            revenue_per_bed_day,
            current_minutes,
            target_minutes,
            years,
            iterations,
            seed,
            confidence,
            sensitivity,
            output,
            export_csv,
            export_json,
        } => run_bed_turnover(BedTurnoverArgs {
            config,
            beds,
            occupancy,
            revenue_per_bed_day,
            current_minutes,
            target_minutes,
            years,
            iterations,
            seed,
            confidence,
            sensitivity,
            output,
            export_csv,
            export_json,
        }),
        Commands::Avatar {
            use_case,
            hospital_beds,
            months,
            patient_volume,
            iterations,
            seed,
            confidence,
            output,
        } => run_avatar(
            use_case,
            hospital_beds,
            months,
            patient_volume,
            simulation_settings(iterations, seed, confidence),
            output,
        ),
        Commands::EdBoarding {
            beds,
            boarding_hours,
            annual_hours,
            years,
            intervention,
            output,
        } => run_ed_boarding(beds, boarding_hours, annual_hours, years, intervention, output),
        Commands::NurseTime {
            hourly_wage,
            region,
            minutes_saved,
            implementation_cost,
            nurses,
            shifts_per_year,
            minutes_wasted,
            output,
        } => run_nurse_time(NurseTimeArgs {
            hourly_wage,
            region,
            minutes_saved,
            implementation_cost,
            nurses,
            shifts_per_year,
            minutes_wasted,
            output,
        }),
    }
}

fn simulation_settings(iterations: usize, seed: u64, confidence: f64) -> SimulationSettings {
    SimulationSettings::new()
        .with_iterations(iterations)
        .with_seed(Some(seed))
        .with_confidence_level(confidence)
}

// ============================================================================
// BED TURNOVER
// ============================================================================

struct BedTurnoverArgs {
    config: Option<PathBuf>,
    beds: Option<u32>,
    occupancy: Option<f64>,
    revenue_per_bed_day: Option<f64>,
    current_minutes: Option<f64>,
    target_minutes: Option<f64>,
    years: Option<u32>,
    iterations: usize,
    seed: u64,
    confidence: f64,
    sensitivity: bool,
    output: OutputFormat,
    export_csv: Option<String>,
    export_json: Option<PathBuf>,
}

fn run_bed_turnover(args: BedTurnoverArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => HospitalConfig::load_from_file(path)?,
        None => HospitalConfig::default(),
    };

    // CLI flags override the file
    if let Some(beds) = args.beds {
        config.bed_count = beds;
    }
    if let Some(occupancy) = args.occupancy {
        config.average_occupancy = occupancy;
    }
    if let Some(revenue) = args.revenue_per_bed_day {
        config.revenue_per_bed_day = revenue;
    }
    if let Some(minutes) = args.current_minutes {
        config.current_turnover_minutes = minutes;
    }
    if let Some(minutes) = args.target_minutes {
        config.target_turnover_minutes = minutes;
    }
    if let Some(years) = args.years {
        config.horizon_years = years;
    }
    config.validate()?;

    let calculator = BedTurnoverCalculator::new(config);
    let analysis = calculator.analyze();
    let settings = simulation_settings(args.iterations, args.seed, args.confidence);
    let (uncertainty, table) = calculator.monte_carlo(settings)?;

    match args.output {
        OutputFormat::Summary => {
            println!("{}", analysis.summary());
            println!(
                "Break-even Probability:    {:.1}%",
                uncertainty.break_even_probability * 100.0
            );
            println!(
                "P(Positive NPV):           {:.1}%",
                uncertainty.positive_npv_probability * 100.0
            );
        }
        OutputFormat::Detailed => {
            println!("{}", analysis.report(Some(&uncertainty)));
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "analysis": analysis,
                "uncertainty": uncertainty,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    if args.sensitivity && args.output != OutputFormat::Json {
        println!("\n{}", calculator.sensitivity().render());
    }

    if let Some(prefix) = &args.export_csv {
        let paths = table.export_bundle(prefix, uncertainty.confidence_level)?;
        for path in &paths {
            println!("✓ Exported {}", path);
        }
    }
    if let Some(path) = &args.export_json {
        uncertainty.export_json(path)?;
        println!("✓ Exported {}", path.display());
    }

    Ok(())
}

// ============================================================================
// AVATAR
// ============================================================================

fn run_avatar(
    use_case: UseCaseArg,
    hospital_beds: u32,
    months: u32,
    patient_volume: Option<f64>,
    settings: SimulationSettings,
    output: OutputFormat,
) -> Result<()> {
    let calculator = AvatarRoiCalculator::new(hospital_beds);

    let use_case = match use_case.to_use_case() {
        Some(use_case) => use_case,
        None => {
            // Portfolio mode: all three use cases together
            let portfolio = calculator.portfolio_roi(months);
            match output {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&portfolio)?)
                }
                _ => println!("{}", portfolio.summary()),
            }
            return Ok(());
        }
    };

    let roi = calculator.use_case_roi(use_case, months, patient_volume);
    let (uncertainty, _table) =
        calculator.uncertainty(use_case, months, patient_volume, settings)?;

    match output {
        OutputFormat::Summary => {
            println!("{}", roi.summary());
            println!(
                "P(Positive ROI):           {:.1}%",
                uncertainty.positive_roi_probability * 100.0
            );
        }
        OutputFormat::Detailed => {
            println!("{}", roi.detailed());
            println!("\nUNCERTAINTY ANALYSIS");
            println!("--------------------");
            println!("{}", uncertainty.summary());
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "roi": roi,
                "uncertainty": uncertainty,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
    }

    Ok(())
}

// ============================================================================
// ED BOARDING
// ============================================================================

fn run_ed_boarding(
    beds: u32,
    boarding_hours: f64,
    annual_hours: Option<f64>,
    years: u32,
    intervention: Option<InterventionArg>,
    output: OutputFormat,
) -> Result<()> {
    let calculator = BoardingRoiCalculator::new(beds);
    let baseline = calculator.baseline(boarding_hours, annual_hours);

    match output {
        OutputFormat::Json => {
            let comparison = calculator.comparison(&baseline, years);
            let payload = serde_json::json!({
                "baseline": baseline,
                "interventions": comparison,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => {
            println!("{}", calculator.executive_report(&baseline, years));
            if let Some(arg) = intervention {
                let roi = calculator.intervention_roi(arg.to_kind(), &baseline, years);
                println!("\n{}", roi.detailed());
            } else if output == OutputFormat::Detailed {
                let roi = calculator.intervention_roi(
                    InterventionArg::CommandCenter.to_kind(),
                    &baseline,
                    years,
                );
                println!("\n{}", roi.detailed());
            }
        }
    }

    Ok(())
}

// ============================================================================
// NURSE TIME
// ============================================================================

struct NurseTimeArgs {
    hourly_wage: Option<f64>,
    region: String,
    minutes_saved: f64,
    implementation_cost: f64,
    nurses: u32,
    shifts_per_year: u32,
    minutes_wasted: Option<f64>,
    output: OutputFormat,
}

fn run_nurse_time(args: NurseTimeArgs) -> Result<()> {
    let calculator = NurseTimeCalculator::new(args.hourly_wage, &args.region);
    let breakdown = calculator.fully_loaded_cost(None);
    let waste = args
        .minutes_wasted
        .map(|minutes| calculator.waste_cost(minutes, args.nurses, args.shifts_per_year));
    let roi = calculator.intervention_roi(
        args.minutes_saved,
        args.implementation_cost,
        args.nurses,
        args.shifts_per_year,
    );

    match args.output {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "cost_breakdown": breakdown,
                "waste": waste,
                "intervention_roi": roi,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        _ => {
            println!("{}", breakdown.summary());
            if let Some(waste) = &waste {
                println!("\n{}", waste.summary());
            }
            println!("\n{}", roi.summary());
        }
    }

    Ok(())
}
