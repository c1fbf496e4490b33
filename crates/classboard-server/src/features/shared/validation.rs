//! Shared validation utilities

use thiserror::Error;

use crate::models::{ClassRecord, Material};

pub const MAX_TITLE_LENGTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TitleValidationError {
    #[error("Title is required and cannot be empty")]
    Required,

    #[error("Title must be between 1 and {max_length} characters")]
    TooLong { max_length: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("{field_name} URL is invalid: must be an absolute http:// or https:// URL")]
    InvalidFormat { field_name: String },
}

pub fn validate_title(title: &str) -> Result<(), TitleValidationError> {
    if title.trim().is_empty() {
        return Err(TitleValidationError::Required);
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(TitleValidationError::TooLong {
            max_length: MAX_TITLE_LENGTH,
        });
    }
    Ok(())
}

/// Absolute http(s) URL with a host
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

/// `None` and empty strings are accepted; an empty string clears the field.
pub fn validate_optional_url(url: Option<&str>, field_name: &str) -> Result<(), UrlValidationError> {
    match url {
        Some(url) if !url.is_empty() && !is_valid_url(url) => Err(UrlValidationError::InvalidFormat {
            field_name: field_name.to_string(),
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MaterialValidationError {
    #[error("Material title is required")]
    TitleRequired,

    #[error(transparent)]
    Url(#[from] UrlValidationError),
}

fn validate_material(material: &Material) -> Result<(), MaterialValidationError> {
    if material.title.trim().is_empty() {
        return Err(MaterialValidationError::TitleRequired);
    }
    validate_optional_url(material.url.as_deref(), "Material")?;
    Ok(())
}

/// Every material of the class needs a title and, when linked, a valid URL
pub fn validate_class_materials(class: &ClassRecord) -> Result<(), MaterialValidationError> {
    class.materials().try_for_each(validate_material)
}
