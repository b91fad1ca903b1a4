//! Codec logic
//!
//! # Components
//!
//! - `decoder` - Record-level decoder (quote state machine)
//! - `table` - Table-level decoder (field-count enforcement)
//! - `mapper` - Header-aware row mapping and the decode entry point
//! - `encoder` - Structured records to escaped CSV text

pub mod decoder;
pub mod encoder;
pub mod mapper;
pub mod table;

pub use decoder::RecordDecoder;
pub use encoder::encode;
pub use mapper::{map_rows, parse, parse_str, ParseOutput};
pub use table::read_table;
