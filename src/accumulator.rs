use crate::datatypes::EvaluationResult;

/// Column names of the result table, in export order
pub const COLUMNS: [&str; 12] = [
    "membrane",
    "insulator",
    "metal",
    "membrane_radius",
    "gap_height_original",
    "membrane_thickness",
    "insulator_thickness",
    "metal_thickness",
    "gap_height_effective",
    "resonant_frequency",
    "V_pullin",
    "freq_within_range",
];

/// Append-only collector of evaluation results
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    rows: Vec<EvaluationResult>,
}

impl ResultAccumulator {
    pub fn with_capacity(capacity: usize) -> ResultAccumulator {
        ResultAccumulator {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, result: EvaluationResult) {
        self.rows.push(result);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Freezes the collected rows into a table
    pub fn finalize(self) -> ResultTable {
        ResultTable { rows: self.rows }
    }
}

/// Finished sweep results in enumeration order
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    rows: Vec<EvaluationResult>,
}

impl ResultTable {
    pub fn rows(&self) -> &[EvaluationResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows whose resonant frequency falls inside the target band
    pub fn count_within_range(&self) -> usize {
        self.rows.iter().filter(|r| r.freq_within_range).count()
    }
}
