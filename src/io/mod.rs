//! Data-access boundary: weekly series import and summary export.

pub mod export;
pub mod import;
