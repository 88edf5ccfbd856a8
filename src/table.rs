use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// Excel rejects sheet names longer than this.
const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

pub const INSTRUCTIONS_SHEET: &str = "Instructions";
pub const INSTRUCTIONS_HEADERS: [&str; 4] = ["Sheet Name", "Description", "Required Fields", "Notes"];

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Decimal(f64),
    Integer(i64),
    Date(NaiveDate),
}

impl CellValue {
    /// The text a reader of the sheet sees; dates are ISO `YYYY-MM-DD`.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Decimal(n) => n.to_string(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Decimal(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    /// Listed under "Required Fields" on the instructions sheet.
    pub required: bool,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn required<V: Into<CellValue>>(name: &str, values: impl IntoIterator<Item = V>) -> Self {
        Column {
            name: name.to_string(),
            required: true,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn optional<V: Into<CellValue>>(name: &str, values: impl IntoIterator<Item = V>) -> Self {
        Column {
            required: false,
            ..Column::required(name, values)
        }
    }
}

/// One worksheet worth of data, columns in output order.
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub description: String,
    pub note: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Table {
            name: name.to_string(),
            description: String::new(),
            note: String::new(),
            columns,
        }
    }

    pub fn describe(mut self, description: &str, note: &str) -> Self {
        self.description = description.to_string();
        self.note = note.to_string();
        self
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn required_fields(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Checks the sheet name and that every column has the same length,
    /// returning the number of data rows.
    pub fn validate(&self) -> Result<usize> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("worksheet name is empty"));
        }
        if self.name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(anyhow!(
                "worksheet name longer than {MAX_SHEET_NAME_LEN} characters: {}",
                self.name
            ));
        }
        if let Some(c) = self.name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
            return Err(anyhow!("worksheet name {} contains '{c}'", self.name));
        }
        if self.columns.is_empty() {
            return Err(anyhow!("worksheet {} has no columns", self.name));
        }

        let expected = self.columns[0].values.len();
        for column in &self.columns[1..] {
            if column.values.len() != expected {
                return Err(anyhow!(
                    "worksheet {}: column {} has {} values, column {} has {}",
                    self.name,
                    column.name,
                    column.values.len(),
                    self.columns[0].name,
                    expected
                ));
            }
        }
        Ok(expected)
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn row(&self, index: usize) -> Vec<&CellValue> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }
}

/// Builds the instructions sheet: one row per table, then any free-form
/// rows (legends, blank spacers) appended verbatim.
pub fn instructions(tables: &[Table], extra_rows: &[[&str; 4]]) -> Table {
    let mut sheet_names = Vec::new();
    let mut descriptions = Vec::new();
    let mut required = Vec::new();
    let mut notes = Vec::new();

    for table in tables {
        sheet_names.push(table.name.clone());
        descriptions.push(table.description.clone());
        required.push(table.required_fields().join(", "));
        notes.push(table.note.clone());
    }
    for row in extra_rows {
        sheet_names.push(row[0].to_string());
        descriptions.push(row[1].to_string());
        required.push(row[2].to_string());
        notes.push(row[3].to_string());
    }

    let [name_h, desc_h, req_h, notes_h] = INSTRUCTIONS_HEADERS;
    Table::new(
        INSTRUCTIONS_SHEET,
        vec![
            Column::optional(name_h, sheet_names),
            Column::optional(desc_h, descriptions),
            Column::optional(req_h, required),
            Column::optional(notes_h, notes),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        Table::new(
            "People",
            vec![
                Column::required("name", ["Ann", "Bob"]),
                Column::optional("age", [31_i64, 42]),
            ],
        )
        .describe("Everyone", "Names must be unique")
    }

    #[test]
    fn validate_counts_rows() {
        assert_eq!(people().validate().unwrap(), 2);
    }

    #[test]
    fn validate_rejects_ragged_columns() {
        let mut table = people();
        table.columns[1].values.pop();
        let err = table.validate().unwrap_err().to_string();
        assert!(err.contains("column age has 1 values"), "{err}");
    }

    #[test]
    fn validate_rejects_bad_sheet_names() {
        let mut table = people();
        table.name = "a/b".to_string();
        assert!(table.validate().is_err());

        table.name = "x".repeat(32);
        assert!(table.validate().is_err());

        table.name = "Supplier Items & Prices".to_string();
        assert!(table.validate().is_ok());
    }

    #[test]
    fn instructions_lists_required_fields_only() {
        let sheet = instructions(&[people()], &[]);
        assert_eq!(sheet.name, INSTRUCTIONS_SHEET);
        assert_eq!(sheet.headers(), INSTRUCTIONS_HEADERS.to_vec());
        assert_eq!(sheet.validate().unwrap(), 1);

        let row: Vec<String> = sheet.row(0).iter().map(|v| v.display()).collect();
        assert_eq!(row, ["People", "Everyone", "name", "Names must be unique"]);
    }

    #[test]
    fn instructions_appends_extra_rows() {
        let sheet = instructions(&[people()], &[["", "", "", ""], ["Legend:", "", "", ""]]);
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.row(2)[0].display(), "Legend:");
    }

    #[test]
    fn dates_display_as_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(CellValue::from(date).display(), "2024-03-07");
    }
}
