use sheetbind_model::Value;

/// Raw sheet contents before decoding: trimmed header row plus data rows.
///
/// Blank rows are dropped by the readers, so row indices here line up with
/// the row indices decode errors report.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}
