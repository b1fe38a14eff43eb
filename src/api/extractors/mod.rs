//! Request decoding helpers.

mod validated_json;

pub use validated_json::{parse_json, BodyError, ValidatedJson};
