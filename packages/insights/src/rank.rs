//! Composite rating ranker.

use nearby_places_models::PlaceRecord;

/// Sorts records descending by `(rating, rating_count)`, with absent
/// values sorting as zero.
///
/// The sort is stable: ties keep their original relative (provider)
/// order, so repeated runs against identical provider output are
/// deterministic. The records themselves are untouched — absent fields
/// stay absent.
pub fn rank(records: &mut [PlaceRecord]) {
    records.sort_by(|a, b| {
        let key_a = (a.rating.unwrap_or(0.0), a.rating_count.unwrap_or(0));
        let key_b = (b.rating.unwrap_or(0.0), b.rating_count.unwrap_or(0));
        key_b.0.total_cmp(&key_a.0).then(key_b.1.cmp(&key_a.1))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, rating: Option<f64>, rating_count: Option<u64>) -> PlaceRecord {
        PlaceRecord {
            name: Some(name.to_owned()),
            rating,
            rating_count,
            categories: vec![],
        }
    }

    fn names(records: &[PlaceRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.name.as_deref()).collect()
    }

    #[test]
    fn sorts_by_rating_then_count_descending() {
        let mut records = vec![
            record("low", Some(3.5), Some(900)),
            record("high", Some(4.8), Some(12)),
            record("mid_many", Some(4.2), Some(500)),
            record("mid_few", Some(4.2), Some(40)),
        ];
        rank(&mut records);
        assert_eq!(names(&records), vec!["high", "mid_many", "mid_few", "low"]);
    }

    #[test]
    fn absent_values_sort_as_zero_but_stay_absent() {
        let mut records = vec![
            record("unrated", None, None),
            record("rated", Some(1.0), Some(1)),
            record("count_only", None, Some(10)),
        ];
        rank(&mut records);
        assert_eq!(names(&records), vec!["rated", "count_only", "unrated"]);
        assert!(records[2].rating.is_none());
        assert!(records[2].rating_count.is_none());
    }

    #[test]
    fn ties_preserve_provider_order() {
        let mut records = vec![
            record("first", Some(4.0), Some(100)),
            record("second", Some(4.0), Some(100)),
            record("third", Some(4.0), Some(100)),
        ];
        rank(&mut records);
        assert_eq!(names(&records), vec!["first", "second", "third"]);
    }
}
