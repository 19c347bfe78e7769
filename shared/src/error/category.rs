//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Permission errors (2xxx)
    Permission,
    /// Discount errors (3xxx)
    Discount,
    /// Dealer errors (4xxx)
    Dealer,
    /// Product and catalog errors (5xxx)
    Product,
    /// Role errors (6xxx)
    Role,
    /// System errors (everything else)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Permission,
            3000..4000 => Self::Discount,
            4000..5000 => Self::Dealer,
            5000..6000 => Self::Product,
            6000..7000 => Self::Role,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Auth => "auth",
            Self::Permission => "permission",
            Self::Discount => "discount",
            Self::Dealer => "dealer",
            Self::Product => "product",
            Self::Role => "role",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Auth);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(3002), ErrorCategory::Discount);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Dealer);
        assert_eq!(ErrorCategory::from_code(5101), ErrorCategory::Product);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Role);
        assert_eq!(ErrorCategory::from_code(7000), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::DiscountScopeEmpty.category(),
            ErrorCategory::Discount
        );
        assert_eq!(ErrorCode::DealerNotFound.category(), ErrorCategory::Dealer);
        assert_eq!(ErrorCode::NetworkError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Discount).unwrap();
        assert_eq!(json, "\"discount\"");
        let category: ErrorCategory = serde_json::from_str("\"role\"").unwrap();
        assert_eq!(category, ErrorCategory::Role);
    }
}
