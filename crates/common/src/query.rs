//! Series filtering
//!
//! The catalog listing accepts two optional criteria: a name prefix and a
//! genre id. Both are AND-composed; an absent criterion matches everything.
//! Collection order is preserved, so filtered output is always a
//! subsequence of the input.

use crate::types::Series;

/// Criteria for narrowing a series listing.
///
/// `None` in either field means "do not filter on this". Callers that parse
/// user input are expected to normalize empty strings and the zero genre id
/// to `None` before building a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesFilter {
    pub name_prefix: Option<String>,
    pub genre_id: Option<u32>,
}

impl SeriesFilter {
    /// Build a filter from raw user input.
    ///
    /// An empty or whitespace-only name means no name criterion. A genre id
    /// of zero means no genre criterion. The prefix is kept verbatim
    /// otherwise; matching lowercases both sides at comparison time.
    pub fn from_raw(name: &str, genre_id: u32) -> Self {
        let name_prefix = if name.trim().is_empty() {
            None
        } else {
            Some(name.to_string())
        };
        let genre_id = if genre_id == 0 { None } else { Some(genre_id) };
        Self { name_prefix, genre_id }
    }

    /// True when neither criterion is set.
    pub fn is_empty(&self) -> bool {
        self.name_prefix.is_none() && self.genre_id.is_none()
    }

    /// Test one series against both criteria.
    pub fn matches(&self, series: &Series) -> bool {
        if let Some(prefix) = &self.name_prefix {
            if !series
                .name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase())
            {
                return false;
            }
        }
        if let Some(genre_id) = self.genre_id {
            if series.genre_id != genre_id {
                return false;
            }
        }
        true
    }
}

/// Apply a filter to a collection, preserving input order.
pub fn filter_series(series: Vec<Series>, filter: &SeriesFilter) -> Vec<Series> {
    if filter.is_empty() {
        return series;
    }
    series.into_iter().filter(|s| filter.matches(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Series> {
        vec![
            Series::new(1, "Star Trek", "https://example.com/st.jpg", "https://youtu.be/a", 1),
            Series::new(2, "Stranger Things", "https://example.com/str.jpg", "https://youtu.be/b", 1),
            Series::new(3, "Comedy Show", "https://example.com/cs.jpg", "https://youtu.be/c", 2),
        ]
    }

    #[test]
    fn empty_filter_returns_the_full_collection() {
        let all = filter_series(sample(), &SeriesFilter::default());
        assert_eq!(all, sample());
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        let filter = SeriesFilter::from_raw("star", 0);
        let hits = filter_series(sample(), &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Star Trek");
    }

    #[test]
    fn prefix_is_literal_not_substring() {
        let filter = SeriesFilter::from_raw("Trek", 0);
        assert!(filter_series(sample(), &filter).is_empty());
    }

    #[test]
    fn genre_criterion_matches_exactly() {
        let filter = SeriesFilter::from_raw("", 2);
        let hits = filter_series(sample(), &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Comedy Show");
    }

    #[test]
    fn criteria_compose_with_and() {
        let both = SeriesFilter::from_raw("S", 1);
        let hits = filter_series(sample(), &both);
        let names: Vec<&str> = hits.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Star Trek", "Stranger Things"]);

        let disjoint = SeriesFilter::from_raw("S", 2);
        assert!(filter_series(sample(), &disjoint).is_empty());
    }

    #[test]
    fn output_preserves_collection_order() {
        let filter = SeriesFilter::from_raw("s", 0);
        let hits = filter_series(sample(), &filter);
        let ids: Vec<u32> = hits.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_and_zero_raw_input_normalize_to_no_criteria() {
        assert!(SeriesFilter::from_raw("", 0).is_empty());
        assert!(SeriesFilter::from_raw("   ", 0).is_empty());
        assert!(!SeriesFilter::from_raw("a", 0).is_empty());
        assert!(!SeriesFilter::from_raw("", 1).is_empty());
    }

    #[test]
    fn filtering_an_empty_collection_yields_empty() {
        let filter = SeriesFilter::from_raw("Star", 1);
        assert!(filter_series(Vec::new(), &filter).is_empty());
    }

    #[test]
    fn prefix_longer_than_name_never_matches() {
        let filter = SeriesFilter::from_raw("Star Trek Discovery", 0);
        assert!(filter_series(sample(), &filter).is_empty());
    }
}
