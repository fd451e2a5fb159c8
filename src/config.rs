// 🏥 Hospital Configuration - Defaults as Data
// Operational and financial parameters shared by the bed turnover analysis

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// HOSPITAL CONFIGURATION
// ============================================================================

/// Operational and financial parameters for a hospital
///
/// Defaults describe a 300-bed facility with a 3-hour bed turnover and a
/// 90-minute improvement target. Any subset of fields can be overridden from
/// a JSON file or CLI flags; unspecified fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalConfig {
    /// Total licensed beds
    pub bed_count: u32,

    /// Average occupancy rate (0.0 - 1.0)
    pub average_occupancy: f64,

    /// Gross revenue per occupied bed day
    pub revenue_per_bed_day: f64,

    /// Current average bed turnover time in minutes
    pub current_turnover_minutes: f64,

    /// Target bed turnover time in minutes
    pub target_turnover_minutes: f64,

    /// Discharges per bed per year (91.25 for a 4-day average length of stay)
    pub annual_discharges_per_bed: f64,

    /// Environmental services hourly cost
    pub evs_hourly_cost: f64,

    /// Nursing hourly cost
    pub nurse_hourly_cost: f64,

    /// Contribution margin applied to recovered bed-day revenue (0.0 - 1.0)
    pub contribution_margin: f64,

    /// One-time implementation cost
    pub implementation_cost: f64,

    /// Ongoing annual maintenance cost
    pub annual_maintenance_cost: f64,

    /// Annual discount rate for NPV
    pub discount_rate: f64,

    /// Analysis horizon in years
    pub horizon_years: u32,
}

impl Default for HospitalConfig {
    fn default() -> Self {
        HospitalConfig {
            bed_count: 300,
            average_occupancy: 0.75,
            revenue_per_bed_day: 2000.0,
            current_turnover_minutes: 180.0,
            target_turnover_minutes: 90.0,
            annual_discharges_per_bed: 91.25,
            evs_hourly_cost: 25.0,
            nurse_hourly_cost: 75.0,
            contribution_margin: 0.40,
            implementation_cost: 350_000.0,
            annual_maintenance_cost: 50_000.0,
            discount_rate: 0.08,
            horizon_years: 5,
        }
    }
}

impl HospitalConfig {
    /// Load configuration from a JSON file
    ///
    /// Missing fields fall back to defaults, so a config file only needs to
    /// list the parameters it changes.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: HospitalConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Check that parameters lie in physically sensible ranges
    pub fn validate(&self) -> Result<()> {
        if self.bed_count == 0 {
            anyhow::bail!("bed_count must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.average_occupancy) {
            anyhow::bail!(
                "average_occupancy must lie in [0, 1], got {}",
                self.average_occupancy
            );
        }
        if !(0.0..=1.0).contains(&self.contribution_margin) {
            anyhow::bail!(
                "contribution_margin must lie in [0, 1], got {}",
                self.contribution_margin
            );
        }
        if self.current_turnover_minutes <= 0.0 || self.target_turnover_minutes <= 0.0 {
            anyhow::bail!("turnover times must be positive");
        }
        if self.horizon_years == 0 {
            anyhow::bail!("horizon_years must be at least 1");
        }
        Ok(())
    }

    /// Blended hourly rate for cross-functional training (EVS + nursing)
    pub fn blended_training_rate(&self) -> f64 {
        (self.evs_hourly_cost + self.nurse_hourly_cost) / 2.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HospitalConfig::default();
        assert_eq!(config.bed_count, 300);
        assert_eq!(config.average_occupancy, 0.75);
        assert_eq!(config.current_turnover_minutes, 180.0);
        assert_eq!(config.target_turnover_minutes, 90.0);
        assert_eq!(config.blended_training_rate(), 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "bed_count": 420, "average_occupancy": 0.82 }"#;
        let config: HospitalConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.bed_count, 420);
        assert_eq!(config.average_occupancy, 0.82);
        // Untouched fields keep their defaults
        assert_eq!(config.revenue_per_bed_day, 2000.0);
        assert_eq!(config.horizon_years, 5);
    }

    #[test]
    fn test_validate_rejects_bad_occupancy() {
        let config = HospitalConfig {
            average_occupancy: 1.4,
            ..HospitalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hospital.json");

        let mut config = HospitalConfig::default();
        config.bed_count = 250;
        config.save_to_file(&path).unwrap();

        let loaded = HospitalConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        println!("✅ Config round trip test passed");
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = HospitalConfig::load_from_file("/nonexistent/hospital.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
