//! Volumetric and billable weight calculation
//!
//! Dimensional divisors are defined in cubic inches per unit of mass, so
//! metric volumes are converted to cubic inches before dividing.

use shipquote_types::{LengthUnit, QuoteError};

use super::money::{checked, round_currency, to_decimal, to_f64};
use crate::model::PackageSpec;

pub const CUBIC_CM_PER_CUBIC_INCH: f64 = 16.387;
pub const DOMESTIC_VOLUMETRIC_DIVISOR: f64 = 166.0;
pub const INTERNATIONAL_VOLUMETRIC_DIVISOR: f64 = 139.0;

/// Volumetric weight using the domestic divisor
///
/// Returns 0 when any dimension is zero or missing, meaning "fall back to
/// actual weight".
pub fn compute_volumetric_weight(package: &PackageSpec) -> f64 {
    compute_volumetric_weight_with_divisor(package, DOMESTIC_VOLUMETRIC_DIVISOR)
}

/// Volumetric weight rounded to 2 places, in the package's mass unit
///
/// Returns 0 for missing dimensions or a non-positive divisor. Volumes
/// beyond Decimal range are computed in f64 instead of being dropped.
pub fn compute_volumetric_weight_with_divisor(package: &PackageSpec, divisor: f64) -> f64 {
    if !divisor.is_finite() || divisor <= 0.0 {
        return 0.0;
    }
    volumetric_weight(package, divisor).unwrap_or_else(|_| float_volumetric_weight(package, divisor))
}

/// Exact volumetric weight; overflow and unrepresentable values are errors
pub(crate) fn volumetric_weight(package: &PackageSpec, divisor: f64) -> Result<f64, QuoteError> {
    let Some((length, width, height)) = package.dimensions() else {
        return Ok(0.0);
    };
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(QuoteError::InvalidInput(format!(
            "volumetric divisor must be positive, got {}",
            divisor
        )));
    }

    let length = to_decimal(length, "length")?;
    let width = to_decimal(width, "width")?;
    let height = to_decimal(height, "height")?;
    let volume = checked(
        length.checked_mul(width).and_then(|v| v.checked_mul(height)),
        "package volume",
    )?;

    let cubic_inches = match package.length_unit {
        LengthUnit::In => volume,
        LengthUnit::Cm => checked(
            volume.checked_div(to_decimal(CUBIC_CM_PER_CUBIC_INCH, "cubic conversion")?),
            "package volume",
        )?,
    };

    let weight = checked(
        cubic_inches.checked_div(to_decimal(divisor, "volumetric divisor")?),
        "volumetric weight",
    )?;
    to_f64(round_currency(weight))
}

fn float_volumetric_weight(package: &PackageSpec, divisor: f64) -> f64 {
    let Some((length, width, height)) = package.dimensions() else {
        return 0.0;
    };
    let mut cubic_inches = length * width * height;
    if package.length_unit == LengthUnit::Cm {
        cubic_inches /= CUBIC_CM_PER_CUBIC_INCH;
    }
    (cubic_inches / divisor * 100.0).round() / 100.0
}

/// Greater of actual and volumetric weight (domestic divisor)
pub fn compute_billable_weight(package: &PackageSpec) -> Result<f64, QuoteError> {
    compute_billable_weight_with_divisor(package, DOMESTIC_VOLUMETRIC_DIVISOR)
}

pub fn compute_billable_weight_with_divisor(
    package: &PackageSpec,
    divisor: f64,
) -> Result<f64, QuoteError> {
    validate_weight(package)?;
    let volumetric = volumetric_weight(package, divisor)?;
    Ok(package.weight.max(volumetric))
}

pub(crate) fn validate_weight(package: &PackageSpec) -> Result<(), QuoteError> {
    if !package.weight.is_finite() || package.weight <= 0.0 {
        return Err(QuoteError::InvalidPackage(format!(
            "weight must be positive, got {}",
            package.weight
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipquote_types::MassUnit;

    fn inch_box(weight: f64, l: f64, w: f64, h: f64) -> PackageSpec {
        PackageSpec::new(weight, MassUnit::Lb).with_dimensions(l, w, h, LengthUnit::In)
    }

    #[test]
    fn test_volumetric_inches() {
        // 1000 in³ / 166 = 6.024..
        let weight = compute_volumetric_weight(&inch_box(5.0, 10.0, 10.0, 10.0));
        assert!((weight - 6.02).abs() < 1e-9);
    }

    #[test]
    fn test_volumetric_centimeters() {
        // 6000 cm³ / 16.387 = 366.14 in³, / 166 = 2.2057
        let pkg = PackageSpec::new(1.0, MassUnit::Kg).with_dimensions(30.0, 20.0, 10.0, LengthUnit::Cm);
        let expected = ((30.0 * 20.0 * 10.0 / 16.387) / 166.0 * 100.0_f64).round() / 100.0;
        let weight = compute_volumetric_weight(&pkg);
        assert!((weight - expected).abs() < 1e-9);
        assert!((weight - 2.21).abs() < 1e-9);
    }

    #[test]
    fn test_volumetric_zero_dimension() {
        assert_eq!(compute_volumetric_weight(&inch_box(5.0, 10.0, 0.0, 10.0)), 0.0);
        assert_eq!(compute_volumetric_weight(&PackageSpec::new(5.0, MassUnit::Lb)), 0.0);
    }

    #[test]
    fn test_international_divisor_heavier() {
        let pkg = inch_box(1.0, 10.0, 10.0, 10.0);
        let domestic = compute_volumetric_weight(&pkg);
        let international = compute_volumetric_weight_with_divisor(&pkg, INTERNATIONAL_VOLUMETRIC_DIVISOR);
        assert!((international - 7.19).abs() < 1e-9);
        assert!(international > domestic);
    }

    #[test]
    fn test_invalid_divisor_not_computable() {
        let pkg = inch_box(1.0, 10.0, 10.0, 10.0);
        assert_eq!(compute_volumetric_weight_with_divisor(&pkg, 0.0), 0.0);
        assert_eq!(compute_volumetric_weight_with_divisor(&pkg, f64::NAN), 0.0);
    }

    #[test]
    fn test_billable_picks_volumetric() {
        let billable = compute_billable_weight(&inch_box(5.0, 10.0, 10.0, 10.0)).unwrap();
        assert!((billable - 6.02).abs() < 1e-9);
    }

    #[test]
    fn test_billable_picks_actual() {
        let billable = compute_billable_weight(&inch_box(20.0, 10.0, 10.0, 10.0)).unwrap();
        assert_eq!(billable, 20.0);
    }

    #[test]
    fn test_billable_without_dimensions_is_actual_weight() {
        let pkg = PackageSpec::new(3.3, MassUnit::Kg);
        assert_eq!(compute_billable_weight(&pkg).unwrap(), 3.3);
    }

    #[test]
    fn test_billable_never_below_actual() {
        for weight in [0.1, 1.0, 6.02, 6.03, 50.0] {
            for side in [1.0, 5.0, 10.0, 24.0] {
                let pkg = inch_box(weight, side, side, side);
                assert!(compute_billable_weight(&pkg).unwrap() >= weight);
            }
        }
    }

    #[test]
    fn test_oversized_box_is_not_priced_at_actual_weight() {
        let pkg = inch_box(1.0, 5e9, 5e9, 5e9);
        let volumetric = compute_volumetric_weight(&pkg);
        assert!(volumetric > 7.0e26, "got {}", volumetric);
        assert!(matches!(
            compute_billable_weight(&pkg),
            Err(QuoteError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_billable_rejects_invalid_divisor() {
        let pkg = inch_box(1.0, 10.0, 10.0, 10.0);
        assert!(matches!(
            compute_billable_weight_with_divisor(&pkg, 0.0),
            Err(QuoteError::InvalidInput(_))
        ));
        // no dimensions: divisor never used
        let flat = PackageSpec::new(2.0, MassUnit::Lb);
        assert_eq!(compute_billable_weight_with_divisor(&flat, 0.0).unwrap(), 2.0);
    }

    #[test]
    fn test_billable_rejects_non_positive_weight() {
        for weight in [0.0, -1.0, f64::NAN] {
            let pkg = inch_box(weight, 10.0, 10.0, 10.0);
            assert!(matches!(
                compute_billable_weight(&pkg),
                Err(QuoteError::InvalidPackage(_))
            ));
        }
    }
}
