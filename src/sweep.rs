use indicatif::ProgressBar;

use crate::{
    accumulator::{ResultAccumulator, ResultTable},
    config::{FrequencyBand, SweepConfig},
    datatypes::{DimensionSet, ResolvedMaterials},
    enumerator::{enumerate_dimensions, enumerate_materials},
    error::Result,
    evaluator::evaluate,
    materials::resolve,
};

/// Grid samples of all four dimension axes, in micrometers
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGrids {
    pub membrane_thickness: Vec<f64>,
    pub membrane_radius: Vec<f64>,
    pub insulator_thickness: Vec<f64>,
    pub electrode_thickness: Vec<f64>,
}

impl DimensionGrids {
    pub fn from_config(config: &SweepConfig) -> Result<DimensionGrids> {
        Ok(DimensionGrids {
            membrane_thickness: config.membrane_thickness.samples(config.length)?,
            membrane_radius: config.membrane_radius.samples(config.length)?,
            insulator_thickness: config.insulator_thickness.samples(config.length)?,
            electrode_thickness: config.electrode_thickness.samples(config.length)?,
        })
    }

    /// Number of dimension combinations the grids span, `None` on overflow
    pub fn combinations(&self) -> Option<usize> {
        self.membrane_thickness
            .len()
            .checked_mul(self.membrane_radius.len())?
            .checked_mul(self.insulator_thickness.len())?
            .checked_mul(self.electrode_thickness.len())
    }
}

/// Runs the full sweep, evaluating every material combination against every
/// dimension combination. Stops at the first failing combination.
///
/// # Arguments
/// * `config` - The sweep configuration
/// * `progress` - Progress bar advanced once per evaluated combination
pub fn run(config: &SweepConfig, progress: &ProgressBar) -> Result<ResultTable> {
    config.validate()?;

    // Resolve every material up front so an unknown name fails before any evaluation
    let materials: Vec<ResolvedMaterials> =
        enumerate_materials(&config.membranes, &config.insulators, &config.metals)
            .map(resolve)
            .collect::<Result<_>>()?;

    let grids = DimensionGrids::from_config(config)?;
    let dimensions = enumerate_dimensions(
        &grids.membrane_thickness,
        &grids.membrane_radius,
        &grids.insulator_thickness,
        &grids.electrode_thickness,
    );

    let total = config.expected_rows()?;
    println!(
        "info: evaluating {} material combinations x {} dimension combinations...",
        materials.len(),
        total / materials.len()
    );
    progress.set_length(total as u64);

    let mut accumulator = ResultAccumulator::with_capacity(total);
    for resolved in &materials {
        for point in dimensions.clone() {
            let dims = DimensionSet::from_grid_point(&point, config.gap_model);
            accumulator.append(evaluate(resolved, &dims, &config.target_band)?);
            progress.inc(1);
        }
    }
    progress.finish();

    println!("info: sweep complete, {} rows", accumulator.len());
    let table = accumulator.finalize();
    if let Some(warning) = band_warning(&table, &config.target_band) {
        println!("warning: {warning}");
    }
    Ok(table)
}

/// Message for a sweep in which no row resonates inside `band`
fn band_warning(table: &ResultTable, band: &FrequencyBand) -> Option<String> {
    if table.is_empty() || table.count_within_range() > 0 {
        return None;
    }

    Some(format!(
        "no combination resonates inside ({:e}, {:e}) Hz",
        band.low_hz, band.high_hz
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datatypes::GapModel, error::CmutError, grid::DimensionRange};

    fn small_config() -> SweepConfig {
        SweepConfig {
            length: 3,
            ..SweepConfig::default()
        }
    }

    #[test]
    fn row_count_matches_combinations() {
        let config = small_config();
        let table = run(&config, &ProgressBar::hidden()).unwrap();
        assert_eq!(table.len(), 4 * 3usize.pow(4));
        assert_eq!(table.len(), config.expected_rows().unwrap());
    }

    #[test]
    fn grid_combinations_match_length() {
        let grids = DimensionGrids::from_config(&small_config()).unwrap();
        assert_eq!(grids.combinations(), Some(81));
    }

    #[test]
    fn oversized_length_fails_before_sweeping() {
        let config = SweepConfig {
            length: 70_000,
            ..SweepConfig::default()
        };
        assert!(matches!(
            run(&config, &ProgressBar::hidden()),
            Err(CmutError::Configuration(_))
        ));
    }

    #[test]
    fn narrow_range_cannot_produce_duplicate_rows() {
        let config = SweepConfig {
            membrane_thickness: DimensionRange::new(0.5, 0.5002),
            ..small_config()
        };
        assert!(matches!(
            run(&config, &ProgressBar::hidden()),
            Err(CmutError::Configuration(_))
        ));
    }

    #[test]
    fn warns_when_band_is_never_hit() {
        let config = SweepConfig {
            target_band: FrequencyBand {
                low_hz: 1e12,
                high_hz: 2e12,
            },
            ..small_config()
        };
        let table = run(&config, &ProgressBar::hidden()).unwrap();
        assert_eq!(table.count_within_range(), 0);
        let warning = band_warning(&table, &config.target_band).unwrap();
        assert!(warning.contains("1e12"));

        let wide = FrequencyBand {
            low_hz: 0.0,
            high_hz: 1e12,
        };
        let table = run(&SweepConfig { target_band: wide, ..small_config() }, &ProgressBar::hidden()).unwrap();
        assert!(band_warning(&table, &wide).is_none());
    }

    #[test]
    fn rows_are_unique() {
        let table = run(&small_config(), &ProgressBar::hidden()).unwrap();
        let rows = table.rows();
        for (i, a) in rows.iter().enumerate() {
            for b in &rows[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_sweep_row_count() {
        let config = SweepConfig::default();
        let table = run(&config, &ProgressBar::hidden()).unwrap();
        assert_eq!(table.len(), 4 * 10_000);
        assert!(table
            .rows()
            .iter()
            .all(|r| r.resonant_frequency > 0.0 && r.v_pullin > 0.0));
    }

    #[test]
    fn rows_follow_enumeration_order() {
        let table = run(&small_config(), &ProgressBar::hidden()).unwrap();
        let per_combo = 3usize.pow(4);
        let rows = table.rows();
        assert_eq!(rows[0].membrane, "Si3N4");
        assert_eq!(rows[0].metal, "Al");
        assert_eq!(rows[per_combo].metal, "Cr");
        assert_eq!(rows[2 * per_combo].membrane, "polySi");
        // innermost axis is the electrode thickness
        assert_ne!(rows[0].metal_thickness, rows[1].metal_thickness);
        assert_eq!(rows[0].membrane_radius, rows[1].membrane_radius);
    }

    #[test]
    fn gap_tracks_insulator_by_default() {
        let table = run(&small_config(), &ProgressBar::hidden()).unwrap();
        assert!(table
            .rows()
            .iter()
            .all(|r| r.gap_height_original == r.insulator_thickness));
    }

    #[test]
    fn fixed_gap_is_applied_everywhere() {
        let config = SweepConfig {
            gap_model: GapModel::Fixed(0.3),
            ..small_config()
        };
        let table = run(&config, &ProgressBar::hidden()).unwrap();
        assert!(table
            .rows()
            .iter()
            .all(|r| r.gap_height_original == 0.3 * 1e-6));
    }

    #[test]
    fn unknown_material_aborts_before_sweeping() {
        let config = SweepConfig {
            metals: vec!["Al".to_owned(), "Unobtainium".to_owned()],
            ..small_config()
        };
        assert!(matches!(
            run(&config, &ProgressBar::hidden()),
            Err(CmutError::UnknownMaterial { class: "electrode", .. })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SweepConfig {
            length: 0,
            ..SweepConfig::default()
        };
        assert!(matches!(
            run(&config, &ProgressBar::hidden()),
            Err(CmutError::Configuration(_))
        ));
    }

    #[test]
    fn degenerate_geometry_aborts_the_sweep() {
        let config = SweepConfig {
            membrane_radius: DimensionRange::new(0.0, 10.0),
            ..small_config()
        };
        assert!(matches!(
            run(&config, &ProgressBar::hidden()),
            Err(CmutError::NumericDomain { .. })
        ));
    }
}
