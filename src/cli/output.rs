use serde::Serialize;

/// One ranked symbol row for `list --json`
#[derive(Serialize)]
pub struct SymbolJson {
    pub label: String,
    pub score: i32,
    pub line: usize,
}
