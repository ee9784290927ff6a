//! Embedded demo records, used for any dataset configured without a `path`.

use crate::{dataset::parse_records, error::Result, record::Record};

const MANUFACTURERS: &str = include_str!("../demo/manufacturers.json");
const MEDICINES: &str = include_str!("../demo/medicines.json");
const SALES: &str = include_str!("../demo/sales.json");
const SALTS: &str = include_str!("../demo/salts.json");

/// Names with embedded demo data.
pub const NAMES: &[&str] = &["manufacturers", "medicines", "sales", "salts"];

/// Demo records for `name`, or `None` when nothing is embedded under it.
pub fn records(name: &str) -> Option<Result<Vec<Record>>> {
    let src = match name {
        "manufacturers" => MANUFACTURERS,
        "medicines" => MEDICINES,
        "sales" => SALES,
        "salts" => SALTS,
        _ => return None,
    };
    Some(parse_records(src))
}
