//! # Validation Module
//!
//! Input validation utilities for Till POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (till-cli)                                           │
//! │  └── Reads a raw line from the operator                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Text → integer (parse_integer)                                    │
//! │  ├── 1-based menu selection → index (parse_selection)                  │
//! │  └── Business bounds (validate_quantity, validate_window)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_integer, validate_quantity};
//!
//! let qty = parse_integer(" 5 ").unwrap();
//! validate_quantity(qty).unwrap();
//! ```

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Text Parsers
// =============================================================================

/// Parses operator input as a whole number.
///
/// Surrounding whitespace is ignored. Anything else that is not an integer
/// is a [`CoreError::NotNumeric`].
///
/// ## Example
/// ```rust
/// use till_core::validation::parse_integer;
///
/// assert_eq!(parse_integer("42").unwrap(), 42);
/// assert!(parse_integer("4.2").is_err());
/// assert!(parse_integer("abc").is_err());
/// ```
pub fn parse_integer(input: &str) -> CoreResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::numeric_values())
}

/// Parses a 1-based menu selection and checks it against the listed range.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Current Sale Items:                                                    │
/// │  1. Coffee Beans - Quantity: 2, Price per unit: $49.99                  │
/// │  2. Milk - Quantity: 1, Price per unit: $1.20                           │
/// │  Select an item to remove: 2                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_selection("2", 2) ← THIS FUNCTION → Ok(2)                        │
/// │                                                                         │
/// │  "x"  → NotNumeric     "0" or "3" → InvalidChoice                       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn parse_selection(input: &str, max: usize) -> CoreResult<usize> {
    let choice = input
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::numeric_value())?;

    if choice < 1 || choice as u64 > max as u64 {
        return Err(CoreError::InvalidChoice { choice, max });
    }

    Ok(choice as usize)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Reference Data Validators
// =============================================================================

/// Validates a required text field (product name, discount name, ...).
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates that a validity window does not end before it starts.
pub fn validate_window(
    field: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ValidationResult<()> {
    if end < start {
        return Err(ValidationError::InvertedWindow {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1").unwrap(), 1);
        assert_eq!(parse_integer("  12\n").unwrap(), 12);
        assert_eq!(parse_integer("-3").unwrap(), -3);

        assert!(matches!(parse_integer(""), Err(CoreError::NotNumeric { .. })));
        assert!(matches!(parse_integer("two"), Err(CoreError::NotNumeric { .. })));
        assert!(matches!(parse_integer("1.5"), Err(CoreError::NotNumeric { .. })));
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("1", 3).unwrap(), 1);
        assert_eq!(parse_selection(" 3 ", 3).unwrap(), 3);

        assert!(matches!(
            parse_selection("0", 3),
            Err(CoreError::InvalidChoice { choice: 0, max: 3 })
        ));
        assert!(matches!(
            parse_selection("4", 3),
            Err(CoreError::InvalidChoice { choice: 4, max: 3 })
        ));
        assert!(matches!(
            parse_selection("-1", 3),
            Err(CoreError::InvalidChoice { .. })
        ));
        assert!(matches!(
            parse_selection("first", 3),
            Err(CoreError::NotNumeric { .. })
        ));
        assert!(matches!(
            parse_selection("1", 0),
            Err(CoreError::InvalidChoice { choice: 1, max: 0 })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("name", "Coffee").is_ok());
        assert!(validate_required("name", "   ").is_err());
    }

    #[test]
    fn test_validate_window() {
        let now = Utc::now();
        assert!(validate_window("price", now, now).is_ok());
        assert!(validate_window("price", now, now + Duration::days(1)).is_ok());
        assert!(validate_window("price", now, now - Duration::days(1)).is_err());
    }
}
