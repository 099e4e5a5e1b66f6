use crate::dates::DateRange;

/// Price of a campaign in USD, pro-rated from the location's 30-day rate
/// over the booked span and rounded to cents.
pub fn campaign_price_usd(price_per_30_days: f64, period: &DateRange) -> f64 {
    let days = period.days_inclusive() as f64;
    (price_per_30_days * days * 100.0 / 30.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    #[test]
    fn thirty_day_booking_costs_the_listed_rate() {
        // Jan 1..Jan 30 inclusive is 30 days.
        let period = range("2024-01-01", "2024-01-30");
        assert_eq!(campaign_price_usd(1250.0, &period), 1250.0);
    }

    #[test]
    fn shorter_bookings_are_pro_rated_to_cents() {
        let period = range("2024-01-01", "2024-01-10");
        // 1250 * 10 / 30 = 416.666... -> 416.67
        assert_eq!(campaign_price_usd(1250.0, &period), 416.67);
    }

    #[test]
    fn single_day_booking_charges_one_day() {
        let period = range("2024-01-05", "2024-01-05");
        assert_eq!(campaign_price_usd(300.0, &period), 10.0);
    }
}
