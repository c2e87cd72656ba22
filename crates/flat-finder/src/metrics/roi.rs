use crate::listing::UnitRecord;

/// Percentage gain of the estimated resale value over the purchase price.
pub fn roi_percent(record: &UnitRecord) -> Option<f64> {
    roi_from(record.price?, record.estimated_resale_value?)
}

pub fn roi_from(price: f64, estimated_resale_value: f64) -> Option<f64> {
    if price <= 0.0 || estimated_resale_value <= 0.0 {
        return None;
    }
    Some((estimated_resale_value - price) / price * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_percentage_gain() {
        let roi = roi_from(500_000.0, 650_000.0).expect("roi computed");
        assert!((roi - 30.0).abs() < 1e-9);

        let loss = roi_from(400_000.0, 380_000.0).expect("roi computed");
        assert!((loss - -5.0).abs() < 1e-9);
    }

    #[test]
    fn withheld_without_positive_inputs() {
        assert!(roi_from(0.0, 650_000.0).is_none());
        assert!(roi_from(500_000.0, 0.0).is_none());
        assert!(roi_percent(&UnitRecord {
            price: Some(500_000.0),
            ..UnitRecord::default()
        })
        .is_none());
    }
}
