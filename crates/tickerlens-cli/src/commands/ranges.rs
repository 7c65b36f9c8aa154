use serde::Serialize;

use tickerlens_core::RangeSelection;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeEntry {
    pub name: &'static str,
    pub label: &'static str,
    pub days: i64,
    pub default: bool,
}

pub fn run() -> Vec<RangeEntry> {
    RangeSelection::ALL
        .iter()
        .map(|selection| RangeEntry {
            name: selection.as_str(),
            label: selection.label(),
            days: selection.offset_days(),
            default: *selection == RangeSelection::default(),
        })
        .collect()
}
