use tickerlens_core::{TickerCatalog, TickerInfo};

pub fn run(catalog: &TickerCatalog) -> Vec<TickerInfo> {
    catalog.entries().to_vec()
}
