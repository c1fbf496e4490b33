//! Shared utilities and types for feature modules
//!
//! - **pagination**: page/per_page parameters and list metadata
//! - **validation**: input checks for titles, URLs and class materials
//! - **test_helpers**: stub provider and seeded state (test-only)

pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{Paginated, PaginationMetadata, PaginationParams};
pub use validation::{
    validate_class_materials, validate_optional_url, validate_title, MaterialValidationError,
    TitleValidationError, UrlValidationError,
};
