use crate::listing::UnitRecord;

/// Price spread over the remaining lease, so flats with different tenures compare fairly.
pub fn price_per_lease_year(record: &UnitRecord) -> Option<f64> {
    price_per_lease_year_from(record.price?, record.remaining_lease_years?)
}

pub fn price_per_lease_year_from(price: f64, remaining_lease_years: f64) -> Option<f64> {
    if price <= 0.0 || remaining_lease_years <= 0.0 {
        return None;
    }
    Some(price / remaining_lease_years)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_price_by_remaining_years() {
        let per_year = price_per_lease_year_from(500_000.0, 95.0).expect("computed");
        assert!((per_year - 5263.16).abs() < 0.01);
    }

    #[test]
    fn withheld_for_non_positive_inputs() {
        assert!(price_per_lease_year_from(500_000.0, 0.0).is_none());
        assert!(price_per_lease_year_from(-1.0, 95.0).is_none());
        assert!(price_per_lease_year(&UnitRecord::default()).is_none());
    }
}
