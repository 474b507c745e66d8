use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close in a historical price series.
///
/// Serialized dates are plain `YYYY-MM-DD` strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalClose {
    pub date: NaiveDate,
    pub close: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_serialize_as_plain_days() {
        let point = HistoricalClose {
            date: NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            close: 187.25,
        };

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2025-11-03");
        assert_eq!(json["close"], 187.25);
    }
}
