use json::JsonValue;

use crate::{
    datatypes::GapModel,
    error::{CmutError, Result},
    grid::DimensionRange,
};

/// Target resonant frequency band. Both bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    pub low_hz: f64,
    pub high_hz: f64,
}

impl FrequencyBand {
    pub fn contains(&self, frequency: f64) -> bool {
        frequency > self.low_hz && frequency < self.high_hz
    }
}

impl Default for FrequencyBand {
    fn default() -> Self {
        FrequencyBand {
            low_hz: 10e6,
            high_hz: 40e6,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    /// Number of grid samples per dimension axis
    pub length: usize,
    pub membranes: Vec<String>,
    pub insulators: Vec<String>,
    pub metals: Vec<String>,
    pub membrane_thickness: DimensionRange,
    pub membrane_radius: DimensionRange,
    pub insulator_thickness: DimensionRange,
    pub electrode_thickness: DimensionRange,
    pub target_band: FrequencyBand,
    pub gap_model: GapModel,
    pub output_dir: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            length: 10,
            membranes: vec!["Si3N4".to_owned(), "polySi".to_owned()],
            insulators: vec!["SiO2".to_owned()],
            metals: vec!["Al".to_owned(), "Cr".to_owned()],
            membrane_thickness: DimensionRange::new(0.5, 2.0),
            membrane_radius: DimensionRange::new(20.0, 100.0),
            insulator_thickness: DimensionRange::new(0.2, 1.2),
            electrode_thickness: DimensionRange::new(1.0, 5.0),
            target_band: FrequencyBand::default(),
            gap_model: GapModel::InsulatorThickness,
            output_dir: ".".to_owned(),
        }
    }
}

impl SweepConfig {
    /// Checks the configuration before any evaluation happens
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(CmutError::Configuration(
                "length must be a positive integer".to_owned(),
            ));
        }

        for (class, list) in [
            ("membranes", &self.membranes),
            ("insulators", &self.insulators),
            ("metals", &self.metals),
        ] {
            if list.is_empty() {
                return Err(CmutError::Configuration(format!(
                    "at least one entry is required in {class}"
                )));
            }
        }

        for (axis, range) in [
            ("membrane_thickness", &self.membrane_thickness),
            ("membrane_radius", &self.membrane_radius),
            ("insulator_thickness", &self.insulator_thickness),
            ("electrode_thickness", &self.electrode_thickness),
        ] {
            if !range.start_um.is_finite()
                || !range.stop_um.is_finite()
                || range.start_um >= range.stop_um
            {
                return Err(CmutError::Configuration(format!(
                    "{axis} range [{}, {}) is empty or not finite",
                    range.start_um, range.stop_um
                )));
            }
        }

        self.expected_rows()?;

        for (axis, range) in [
            ("membrane_thickness", &self.membrane_thickness),
            ("membrane_radius", &self.membrane_radius),
            ("insulator_thickness", &self.insulator_thickness),
            ("electrode_thickness", &self.electrode_thickness),
        ] {
            if let Err(CmutError::Configuration(msg)) = range.samples(self.length) {
                return Err(CmutError::Configuration(format!("{axis}: {msg}")));
            }
        }

        let band = &self.target_band;
        if !band.low_hz.is_finite() || !band.high_hz.is_finite() || band.low_hz >= band.high_hz
        {
            return Err(CmutError::Configuration(format!(
                "target band ({}, {}) Hz is empty or not finite",
                band.low_hz, band.high_hz
            )));
        }

        if let GapModel::Fixed(gap_um) = self.gap_model {
            if !gap_um.is_finite() || gap_um <= 0.0 {
                return Err(CmutError::Configuration(format!(
                    "fixed gap height must be positive, got {gap_um} um"
                )));
            }
        }

        Ok(())
    }

    /// Number of rows a sweep over this configuration produces
    pub fn expected_rows(&self) -> Result<usize> {
        let rows = self
            .length
            .checked_pow(4)
            .and_then(|n| n.checked_mul(self.membranes.len()))
            .and_then(|n| n.checked_mul(self.insulators.len()))
            .and_then(|n| n.checked_mul(self.metals.len()));

        match rows {
            Some(n) => Ok(n),
            None => Err(CmutError::Configuration(format!(
                "length {} makes the sweep too large to enumerate",
                self.length
            ))),
        }
    }
}

/// Loads a sweep configuration from a json file. Missing keys keep their
/// default values.
///
/// # Arguments
/// * `input_file` - The path to the json file
pub fn load_config_file(input_file: &str) -> Result<SweepConfig> {
    let file_string = match std::fs::read_to_string(input_file) {
        Ok(f) => f,
        Err(err) => {
            return Err(CmutError::Input(format!(
                "Unable to open config file {input_file}: {err}"
            )))
        }
    };

    parse_config(&file_string)
}

/// Parses the text of a json sweep configuration
pub fn parse_config(text: &str) -> Result<SweepConfig> {
    let input_json = match json::parse(text) {
        Ok(j) => j,
        Err(err) => {
            return Err(CmutError::Configuration(format!(
                "Error in config json: {err}"
            )))
        }
    };

    if !input_json.is_object() {
        return Err(CmutError::Configuration(
            "Config json must be an object".to_owned(),
        ));
    }

    for key in unknown_keys(&input_json) {
        println!("warning: ignoring unknown config key {key}");
    }

    let mut config = SweepConfig::default();

    if input_json.has_key("length") {
        config.length = match input_json["length"].as_usize() {
            Some(n) => n,
            None => {
                return Err(CmutError::Configuration(
                    "length must be a non-negative integer".to_owned(),
                ))
            }
        };
    }

    if input_json.has_key("membranes") {
        config.membranes = parse_string_list(&input_json["membranes"], "membranes")?;
    }
    if input_json.has_key("insulators") {
        config.insulators = parse_string_list(&input_json["insulators"], "insulators")?;
    }
    if input_json.has_key("metals") {
        config.metals = parse_string_list(&input_json["metals"], "metals")?;
    }

    if input_json.has_key("ranges") {
        let ranges = &input_json["ranges"];
        if !ranges.is_object() {
            return Err(CmutError::Configuration(
                "ranges must be an object".to_owned(),
            ));
        }
        for (axis, value) in ranges.entries() {
            let range = parse_range(value, axis)?;
            match axis {
                "membrane_thickness" => config.membrane_thickness = range,
                "membrane_radius" => config.membrane_radius = range,
                "insulator_thickness" => config.insulator_thickness = range,
                "electrode_thickness" => config.electrode_thickness = range,
                other => {
                    return Err(CmutError::Configuration(format!(
                        "Unrecognized dimension range {other}"
                    )))
                }
            }
        }
    }

    if input_json.has_key("target_band") {
        let band = &input_json["target_band"];
        if !band.is_object() {
            return Err(CmutError::Configuration(
                "target_band must be an object with low and high".to_owned(),
            ));
        }
        for (bound, value) in band.entries() {
            match bound {
                "low" => config.target_band.low_hz = parse_number(value, "target_band.low")?,
                "high" => config.target_band.high_hz = parse_number(value, "target_band.high")?,
                other => {
                    return Err(CmutError::Configuration(format!(
                        "Unrecognized target_band bound {other}"
                    )))
                }
            }
        }
    }

    if input_json.has_key("gap_height") {
        let gap = &input_json["gap_height"];
        config.gap_model = if gap.as_str() == Some("insulator_thickness") {
            GapModel::InsulatorThickness
        } else if let Some(gap_um) = gap.as_f64() {
            GapModel::Fixed(gap_um)
        } else {
            return Err(CmutError::Configuration(
                "gap_height must be \"insulator_thickness\" or a number in um".to_owned(),
            ));
        };
    }

    if input_json.has_key("output_dir") {
        config.output_dir = match input_json["output_dir"].as_str() {
            Some(dir) => dir.to_owned(),
            None => {
                return Err(CmutError::Configuration(
                    "output_dir must be a string".to_owned(),
                ))
            }
        };
    }

    Ok(config)
}

/// Top-level keys a sweep configuration understands
const CONFIG_KEYS: [&str; 8] = [
    "length",
    "membranes",
    "insulators",
    "metals",
    "ranges",
    "target_band",
    "gap_height",
    "output_dir",
];

fn unknown_keys(input_json: &JsonValue) -> Vec<&str> {
    input_json
        .entries()
        .map(|(key, _)| key)
        .filter(|key| !CONFIG_KEYS.contains(key))
        .collect()
}

fn parse_string_list(value: &JsonValue, key: &str) -> Result<Vec<String>> {
    if !value.is_array() {
        return Err(CmutError::Configuration(format!(
            "{key} must be an array of strings"
        )));
    }

    value
        .members()
        .map(|member| match member.as_str() {
            Some(s) => Ok(s.to_owned()),
            None => Err(CmutError::Configuration(format!(
                "{key} must be an array of strings"
            ))),
        })
        .collect()
}

fn parse_number(value: &JsonValue, key: &str) -> Result<f64> {
    match value.as_f64() {
        Some(n) => Ok(n),
        None => Err(CmutError::Configuration(format!("{key} must be a number"))),
    }
}

fn parse_range(value: &JsonValue, axis: &str) -> Result<DimensionRange> {
    if !value.is_array() || value.len() != 2 {
        return Err(CmutError::Configuration(format!(
            "range {axis} must be a [start, stop] pair"
        )));
    }

    Ok(DimensionRange::new(
        parse_number(&value[0], axis)?,
        parse_number(&value[1], axis)?,
    ))
}
