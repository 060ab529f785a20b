pub mod extractor;
pub mod fields;
pub mod table;

use fields::Field;

/// Summary statistics parsed from one raw output.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsRecord {
    /// Input unit name (column header in the consolidated table).
    pub name: String,
    pub patients: u64,
    pub genes: u64,
    /// Elapsed seconds, already rounded to 2 decimals.
    pub runtime_secs: f64,
    pub dcs_size: u64,
}

impl StatisticsRecord {
    /// Render one field as a table cell.
    ///
    /// Runtime keeps a fractional part even when it is whole (`3.0`).
    pub fn cell(&self, field: Field) -> String {
        match field {
            Field::Patients => self.patients.to_string(),
            Field::Genes => self.genes.to_string(),
            Field::Runtime => format!("{:?}", self.runtime_secs),
            Field::DcsSize => self.dcs_size.to_string(),
        }
    }
}
