use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Inclusive day-granularity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_inclusive_on_both_ends() {
        let range = DateRange::new(
            "2025-01-01".parse().unwrap(),
            "2025-01-31".parse().unwrap(),
        );
        assert!(range.contains("2025-01-01".parse().unwrap()));
        assert!(range.contains("2025-01-31".parse().unwrap()));
        assert!(!range.contains("2025-02-01".parse().unwrap()));
        assert!(!range.contains("2024-12-31".parse().unwrap()));
    }
}
