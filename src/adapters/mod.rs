// Adapters layer: concrete codecs for external formats.

pub mod csv_table;
