use crate::{
    config::FrequencyBand,
    datatypes::{DimensionSet, EvaluationResult, ResolvedMaterials, VibrationFilm},
    error::{CmutError, Result},
};

/// Permittivity of free space, F/m
pub const VACUUM_PERMITTIVITY: f64 = 8.85418782e-12;

/// Clamped circular plate coefficient of the fundamental mode
pub const RESONANCE_COEFFICIENT: f64 = 0.47;

/// Pull-in coefficient (Park et al., 2018)
pub const PULLIN_COEFFICIENT: f64 = 1.56;

/// Describes a material + dimension combination for error messages
fn describe(materials: &ResolvedMaterials, dims: &DimensionSet) -> String {
    format!(
        "membrane={} insulator={} metal={} t_m={:e} m a={:e} m t_i={:e} m t_el={:e} m g_o={:e} m",
        materials.combo.membrane,
        materials.combo.insulator,
        materials.combo.metal,
        dims.membrane_thickness,
        dims.membrane_radius,
        dims.insulator_thickness,
        dims.electrode_thickness,
        dims.gap_height_original,
    )
}

fn domain_error(materials: &ResolvedMaterials, dims: &DimensionSet, reason: &str) -> CmutError {
    CmutError::NumericDomain {
        combination: describe(materials, dims),
        reason: reason.to_owned(),
    }
}

/// Mixes membrane and electrode properties weighted by layer thickness
pub fn vibration_film(materials: &ResolvedMaterials, dims: &DimensionSet) -> Result<VibrationFilm> {
    let t_m = dims.membrane_thickness;
    let t_el = dims.electrode_thickness;
    let t_v = t_m + t_el;

    if !(t_v > 0.0) {
        return Err(domain_error(
            materials,
            dims,
            "vibration film thickness t_m + t_el must be positive",
        ));
    }

    let w_m = t_m / t_v;
    let w_el = t_el / t_v;
    let m = &materials.membrane;
    let el = &materials.electrode;

    Ok(VibrationFilm {
        thickness: t_v,
        youngs_modulus: m.youngs_modulus * w_m + el.youngs_modulus * w_el,
        density: m.density * w_m + el.density * w_el,
        poisson_ratio: m.poisson_ratio * w_m + el.poisson_ratio * w_el,
    })
}

/// Effective electrostatic gap: each dielectric layer contributes its
/// thickness divided by its own relative permittivity.
pub fn effective_gap(materials: &ResolvedMaterials, dims: &DimensionSet) -> Result<f64> {
    let eps_m = materials.membrane.relative_permittivity;
    let eps_i = materials.insulator.relative_permittivity;
    if !(eps_m > 0.0) || !(eps_i > 0.0) {
        return Err(domain_error(
            materials,
            dims,
            "relative permittivities must be positive",
        ));
    }

    Ok(dims.membrane_thickness / eps_m + dims.insulator_thickness / eps_i + dims.gap_height_original)
}

/// Fundamental resonant frequency of the film as a clamped circular plate, Hz
pub fn resonant_frequency(
    materials: &ResolvedMaterials,
    dims: &DimensionSet,
    film: &VibrationFilm,
) -> Result<f64> {
    let a = dims.membrane_radius;
    if !(a > 0.0) {
        return Err(domain_error(materials, dims, "membrane radius must be positive"));
    }

    let stiffness_denominator = film.density * (1.0 - film.poisson_ratio.powi(2));
    if !(stiffness_denominator > 0.0) {
        return Err(domain_error(
            materials,
            dims,
            "rho_v * (1 - v_v^2) must be positive for the resonant frequency",
        ));
    }

    let radicand = film.youngs_modulus / stiffness_denominator;
    if !(radicand >= 0.0) {
        return Err(domain_error(
            materials,
            dims,
            "E_v / (rho_v * (1 - v_v^2)) must be non-negative",
        ));
    }

    Ok(RESONANCE_COEFFICIENT * film.thickness / a.powi(2) * radicand.sqrt())
}

/// Pull-in voltage from the closed-form expression of Park et al., V
pub fn pull_in_voltage(
    materials: &ResolvedMaterials,
    dims: &DimensionSet,
    film: &VibrationFilm,
    g_eff: f64,
) -> Result<f64> {
    let a = dims.membrane_radius;
    let denominator = VACUUM_PERMITTIVITY * a.powi(4) * (1.0 - film.poisson_ratio.powi(2));
    if !(denominator > 0.0) {
        return Err(domain_error(
            materials,
            dims,
            "eps_o * a^4 * (1 - v_v^2) must be positive for the pull-in voltage",
        ));
    }

    let numerator = film.youngs_modulus * film.thickness.powi(3) * g_eff.powi(3);
    let radicand = numerator / denominator;
    if !(radicand >= 0.0) {
        return Err(domain_error(
            materials,
            dims,
            "E_v * t_v^3 * g_eff^3 / (eps_o * a^4 * (1 - v_v^2)) must be non-negative",
        ));
    }

    Ok(PULLIN_COEFFICIENT * radicand.sqrt())
}

/// Derives one result row from a resolved material combination and a geometry
pub fn evaluate(
    materials: &ResolvedMaterials,
    dims: &DimensionSet,
    band: &FrequencyBand,
) -> Result<EvaluationResult> {
    let film = vibration_film(materials, dims)?;
    let g_eff = effective_gap(materials, dims)?;
    let f_o = resonant_frequency(materials, dims, &film)?;
    let v_pullin = pull_in_voltage(materials, dims, &film, g_eff)?;

    if !f_o.is_finite() || !v_pullin.is_finite() {
        return Err(domain_error(
            materials,
            dims,
            "resonant frequency and pull-in voltage must be finite",
        ));
    }

    Ok(EvaluationResult {
        membrane: materials.combo.membrane.to_owned(),
        insulator: materials.combo.insulator.to_owned(),
        metal: materials.combo.metal.to_owned(),
        membrane_radius: dims.membrane_radius,
        gap_height_original: dims.gap_height_original,
        membrane_thickness: dims.membrane_thickness,
        insulator_thickness: dims.insulator_thickness,
        metal_thickness: dims.electrode_thickness,
        gap_height_effective: g_eff,
        resonant_frequency: f_o,
        v_pullin,
        freq_within_range: band.contains(f_o),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datatypes::MaterialCombo, materials::resolve};
    use approx::assert_relative_eq;

    fn si3n4_al() -> ResolvedMaterials<'static> {
        resolve(MaterialCombo {
            membrane: "Si3N4",
            insulator: "SiO2",
            metal: "Al",
        })
        .unwrap()
    }

    fn reference_dims() -> DimensionSet {
        DimensionSet {
            membrane_thickness: 1e-6,
            membrane_radius: 50e-6,
            insulator_thickness: 0.5e-6,
            electrode_thickness: 1e-6,
            gap_height_original: 0.5e-6,
        }
    }

    #[test]
    fn film_properties_are_thickness_weighted() {
        let film = vibration_film(&si3n4_al(), &reference_dims()).unwrap();
        assert_relative_eq!(film.thickness, 2e-6, max_relative = 1e-12);
        assert_relative_eq!(film.youngs_modulus, 178.26e9, max_relative = 1e-12);
        assert_relative_eq!(film.density, (3184.0 + 2699.0) / 2.0, max_relative = 1e-12);
        assert_relative_eq!(film.poisson_ratio, (0.24 + 0.325) / 2.0, max_relative = 1e-12);
    }

    #[test]
    fn reference_combination() {
        let band = FrequencyBand::default();
        let result = evaluate(&si3n4_al(), &reference_dims(), &band).unwrap();

        let e_v: f64 = 178.26e9;
        let rho_v: f64 = 2941.5;
        let v_v: f64 = 0.2825;
        let t_v: f64 = 2e-6;
        let a: f64 = 50e-6;
        let g_eff: f64 = 1e-6 / 9.0 + 0.5e-6 / 4.2 + 0.5e-6;
        let f_o = 0.47 * t_v / a.powi(2) * (e_v / (rho_v * (1.0 - v_v * v_v))).sqrt();
        let v_pullin = 1.56
            * (e_v * t_v.powi(3) * g_eff.powi(3)
                / (8.85418782e-12 * a.powi(4) * (1.0 - v_v * v_v)))
                .sqrt();

        assert_relative_eq!(result.gap_height_effective, g_eff, max_relative = 1e-6);
        assert_relative_eq!(result.resonant_frequency, f_o, max_relative = 1e-6);
        assert_relative_eq!(result.v_pullin, v_pullin, max_relative = 1e-6);
        assert_eq!(result.freq_within_range, band.contains(f_o));
        assert_eq!(result.membrane, "Si3N4");
        assert_eq!(result.metal_thickness, 1e-6);
    }

    #[test]
    fn reference_combination_values() {
        let result = evaluate(&si3n4_al(), &reference_dims(), &FrequencyBand::default()).unwrap();
        assert_relative_eq!(result.gap_height_effective, 7.301587301587302e-7, max_relative = 1e-9);
        assert_relative_eq!(result.resonant_frequency, 3_051_340.898139, max_relative = 1e-9);
        assert_relative_eq!(result.v_pullin, 162.880259622542, max_relative = 1e-9);
        // about 3.05 MHz sits below the default band
        assert!(!result.freq_within_range);
    }

    #[test]
    fn band_classification_uses_configured_bounds() {
        let materials = si3n4_al();
        let dims = reference_dims();
        let f_o = evaluate(&materials, &dims, &FrequencyBand::default())
            .unwrap()
            .resonant_frequency;

        let enclosing = FrequencyBand {
            low_hz: f_o * 0.5,
            high_hz: f_o * 2.0,
        };
        assert!(evaluate(&materials, &dims, &enclosing).unwrap().freq_within_range);

        let touching = FrequencyBand {
            low_hz: f_o,
            high_hz: f_o * 2.0,
        };
        assert!(!evaluate(&materials, &dims, &touching).unwrap().freq_within_range);
    }

    #[test]
    fn zero_radius_is_a_domain_error() {
        let mut dims = reference_dims();
        dims.membrane_radius = 0.0;
        match evaluate(&si3n4_al(), &dims, &FrequencyBand::default()) {
            Err(CmutError::NumericDomain {
                combination,
                reason,
            }) => {
                assert!(combination.contains("membrane=Si3N4"));
                assert!(combination.contains("metal=Al"));
                assert!(reason.contains("radius"));
            }
            other => panic!("expected numeric domain error, got {other:?}"),
        }
    }

    #[test]
    fn zero_film_thickness_is_a_domain_error() {
        let mut dims = reference_dims();
        dims.membrane_thickness = 0.0;
        dims.electrode_thickness = 0.0;
        assert!(matches!(
            evaluate(&si3n4_al(), &dims, &FrequencyBand::default()),
            Err(CmutError::NumericDomain { .. })
        ));
    }

    #[test]
    fn poisson_ratio_beyond_unity_is_a_domain_error() {
        let mut materials = si3n4_al();
        materials.membrane.poisson_ratio = 1.5;
        materials.electrode.poisson_ratio = 1.5;
        assert!(matches!(
            evaluate(&materials, &reference_dims(), &FrequencyBand::default()),
            Err(CmutError::NumericDomain { .. })
        ));
    }
}
