use crate::listing::CompletionDate;
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Timeline bucket for a unit's completion. Orders completed first, then
/// quarters chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompletionBucket {
    Completed,
    Quarter { year: i32, quarter: u32 },
}

impl CompletionBucket {
    pub fn quarter_of(date: NaiveDate) -> Self {
        Self::Quarter {
            year: date.year(),
            quarter: (date.month() - 1) / 3 + 1,
        }
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CompletionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionBucket::Completed => write!(f, "Completed"),
            CompletionBucket::Quarter { year, quarter } => write!(f, "Q{} {}", quarter, year),
        }
    }
}

impl Serialize for CompletionBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}

/// Bucket for a completion field as of `today`. Quarters already behind the
/// current one count as completed. `None` when the field is missing or unparseable.
pub fn completion_bucket(
    completion: Option<&CompletionDate>,
    today: NaiveDate,
) -> Option<CompletionBucket> {
    match completion? {
        CompletionDate::Completed => Some(CompletionBucket::Completed),
        CompletionDate::Expected(date) => {
            let bucket = CompletionBucket::quarter_of(*date);
            if bucket < CompletionBucket::quarter_of(today) {
                Some(CompletionBucket::Completed)
            } else {
                Some(bucket)
            }
        }
        CompletionDate::Unparsed(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    #[test]
    fn future_dates_bucket_by_quarter() {
        let bucket = completion_bucket(Some(&CompletionDate::parse("2028-2-1")), today())
            .expect("bucketed");
        assert_eq!(
            bucket,
            CompletionBucket::Quarter {
                year: 2028,
                quarter: 1
            }
        );
        assert_eq!(bucket.label(), "Q1 2028");
    }

    #[test]
    fn current_quarter_is_kept() {
        let bucket = completion_bucket(Some(&CompletionDate::parse("2026-12-31")), today());
        assert_eq!(
            bucket,
            Some(CompletionBucket::Quarter {
                year: 2026,
                quarter: 4
            })
        );
    }

    #[test]
    fn past_quarters_are_reclassified_as_completed() {
        let bucket = completion_bucket(Some(&CompletionDate::parse("2026-9-30")), today());
        assert_eq!(bucket, Some(CompletionBucket::Completed));

        let bucket = completion_bucket(Some(&CompletionDate::parse("2019-1-1")), today());
        assert_eq!(bucket, Some(CompletionBucket::Completed));
    }

    #[test]
    fn sentinel_and_garbage() {
        assert_eq!(
            completion_bucket(Some(&CompletionDate::Completed), today()),
            Some(CompletionBucket::Completed)
        );
        assert_eq!(
            completion_bucket(Some(&CompletionDate::parse("soon")), today()),
            None
        );
        assert_eq!(completion_bucket(None, today()), None);
    }

    #[test]
    fn buckets_sort_completed_first() {
        let mut buckets = vec![
            CompletionBucket::Quarter {
                year: 2028,
                quarter: 1,
            },
            CompletionBucket::Completed,
            CompletionBucket::Quarter {
                year: 2027,
                quarter: 3,
            },
        ];
        buckets.sort();
        assert_eq!(buckets[0], CompletionBucket::Completed);
        assert_eq!(buckets[1].label(), "Q3 2027");
    }
}
