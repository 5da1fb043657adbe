//! Style declarations: values, declaration trees, and the JSON wire format.

pub mod declaration;
pub mod json;
pub mod value;
