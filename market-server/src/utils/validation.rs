//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Search engine truncation: titles ~70 chars, descriptions ~160 chars
//! - Reasonable UX limits for notes and intro blocks
//! - SurrealDB TEXT has no built-in length enforcement

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Notes and short marketing texts (seasonal note, delivery note, trending text)
pub const MAX_NOTE_LEN: usize = 500;

/// Long-form blocks: custom intro, additional SEO content
pub const MAX_CONTENT_LEN: usize = 5000;

/// SEO title override (SERP title truncation)
pub const MAX_SEO_TITLE_LEN: usize = 70;

/// SEO description override (SERP snippet truncation)
pub const MAX_SEO_DESCRIPTION_LEN: usize = 160;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that a price multiplier, if present, is non-negative.
pub fn validate_multiplier(value: Option<f64>) -> Result<(), AppError> {
    if let Some(m) = value {
        if !m.is_finite() {
            return Err(AppError::validation(
                "price_multiplier must be a finite number".to_string(),
            ));
        }
        if m < 0.0 {
            return Err(AppError::validation(
                "price_multiplier must be non-negative".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_text_enforces_limit() {
        let long = Some("x".repeat(MAX_SEO_TITLE_LEN + 1));
        assert!(validate_optional_text(&long, "seo_title_override", MAX_SEO_TITLE_LEN).is_err());

        let exact = Some("x".repeat(MAX_SEO_TITLE_LEN));
        assert!(validate_optional_text(&exact, "seo_title_override", MAX_SEO_TITLE_LEN).is_ok());

        assert!(validate_optional_text(&None, "seo_title_override", MAX_SEO_TITLE_LEN).is_ok());
    }

    #[test]
    fn multiplier_bounds() {
        assert!(validate_multiplier(None).is_ok());
        assert!(validate_multiplier(Some(0.0)).is_ok());
        assert!(validate_multiplier(Some(1.15)).is_ok());
        assert!(validate_multiplier(Some(-0.5)).is_err());
        assert!(validate_multiplier(Some(f64::NAN)).is_err());
    }
}
