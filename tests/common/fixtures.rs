//! Static record corpora used across harnesses.

/// Fruit names in dataset order. `an` appears in Banana and Mango only.
pub const FRUIT: &[&str] = &["Apple", "Banana", "Grape", "Mango", "Plum", "Pear", "Lime"];

/// A dataset file mixing string, numeric and array fields.
pub const MIXED_JSON: &str = r#"[
  {"id": "A-1", "name": "Paracetamol", "tags": ["analgesic", "otc"], "stock": 12},
  {"id": "A-2", "name": "Ibuprofen",   "tags": ["nsaid"],            "stock": 0},
  {"id": "A-3", "name": "Amoxicillin", "tags": ["antibiotic"],       "stock": 7.5}
]"#;
