//! Body Mass Index model

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Weight and height for a BMI calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiInput {
    weight_kg: f64,
    height_cm: f64,
}

impl BmiInput {
    /// Create a BMI input; both measurements must be positive
    pub fn new(weight_kg: f64, height_cm: f64) -> Result<Self, ValidationError> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(ValidationError::OutOfRange {
                field: "Weight",
                value: weight_kg,
                range: "greater than 0",
            });
        }
        if !(height_cm.is_finite() && height_cm > 0.0) {
            return Err(ValidationError::OutOfRange {
                field: "Height",
                value: height_cm,
                range: "greater than 0",
            });
        }
        Ok(Self {
            weight_kg,
            height_cm,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn height_m(&self) -> f64 {
        self.height_cm / 100.0
    }
}

/// BMI category buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Bucket a BMI value. A value on a threshold belongs to the higher bucket.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Normal => write!(f, "Normal weight"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}

/// Result of a BMI calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_higher_bucket() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_height_conversion() {
        let input = BmiInput::new(70.0, 175.0).unwrap();
        assert!((input.height_m() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_zero_height() {
        assert!(matches!(
            BmiInput::new(70.0, 0.0),
            Err(ValidationError::OutOfRange { field: "Height", .. })
        ));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(BmiCategory::Normal.to_string(), "Normal weight");
    }
}
