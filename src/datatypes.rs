/// Conversion factor from micrometers to meters
pub const MICROMETER: f64 = 1e-6;

/// Mechanical and electrical constants of a membrane material. SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProperties {
    pub youngs_modulus: f64,
    pub poisson_ratio: f64,
    pub density: f64,
    pub relative_permittivity: f64,
}

/// Mechanical constants of a top electrode metal. SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectrodeProperties {
    pub youngs_modulus: f64,
    pub poisson_ratio: f64,
    pub density: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsulatorProperties {
    pub relative_permittivity: f64,
}

/// One (membrane, insulator, metal) choice, by catalog identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialCombo<'a> {
    pub membrane: &'a str,
    pub insulator: &'a str,
    pub metal: &'a str,
}

/// A material combination with its catalog constants resolved
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMaterials<'a> {
    pub combo: MaterialCombo<'a>,
    pub membrane: MaterialProperties,
    pub insulator: InsulatorProperties,
    pub electrode: ElectrodeProperties,
}

/// One point of the dimension grid, still in micrometers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub membrane_thickness_um: f64,
    pub membrane_radius_um: f64,
    pub insulator_thickness_um: f64,
    pub electrode_thickness_um: f64,
}

/// How the original (vacuum) gap height is chosen for each grid point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GapModel {
    /// The gap height equals the insulator thickness at every grid point
    InsulatorThickness,
    /// The gap height is held at a fixed value, in micrometers
    Fixed(f64),
}

impl Default for GapModel {
    fn default() -> Self {
        GapModel::InsulatorThickness
    }
}

/// Concrete device geometry in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionSet {
    pub membrane_thickness: f64,
    pub membrane_radius: f64,
    pub insulator_thickness: f64,
    pub electrode_thickness: f64,
    pub gap_height_original: f64,
}

impl DimensionSet {
    /// Converts a grid point to meters, deriving the gap height from `gap_model`
    pub fn from_grid_point(point: &GridPoint, gap_model: GapModel) -> DimensionSet {
        let gap_height_um = match gap_model {
            GapModel::InsulatorThickness => point.insulator_thickness_um,
            GapModel::Fixed(gap_um) => gap_um,
        };

        DimensionSet {
            membrane_thickness: point.membrane_thickness_um * MICROMETER,
            membrane_radius: point.membrane_radius_um * MICROMETER,
            insulator_thickness: point.insulator_thickness_um * MICROMETER,
            electrode_thickness: point.electrode_thickness_um * MICROMETER,
            gap_height_original: gap_height_um * MICROMETER,
        }
    }
}

/// Membrane plus top electrode, treated as one equivalent plate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibrationFilm {
    pub thickness: f64,
    pub youngs_modulus: f64,
    pub density: f64,
    pub poisson_ratio: f64,
}

/// One row of the result table
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub membrane: String,
    pub insulator: String,
    pub metal: String,
    pub membrane_radius: f64,
    pub gap_height_original: f64,
    pub membrane_thickness: f64,
    pub insulator_thickness: f64,
    pub metal_thickness: f64,
    pub gap_height_effective: f64,
    pub resonant_frequency: f64,
    pub v_pullin: f64,
    pub freq_within_range: bool,
}
