use crate::record::OutputRecord;

/// Returns the records ordered by `relevance_score`, highest first.
///
/// The sort is stable, so equal scores keep the order they were
/// accumulated in.
pub fn sort_by_relevance(mut records: Vec<OutputRecord>) -> Vec<OutputRecord> {
    records.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(document: &str, relevance_score: f64) -> OutputRecord {
        OutputRecord {
            query: "q".to_string(),
            document: document.to_string(),
            relevance_score,
            index: 0,
        }
    }

    #[test]
    fn orders_descending_across_queries() {
        let sorted = sort_by_relevance(vec![
            rec("a", 0.1),
            rec("b", 0.9),
            rec("c", -0.5),
            rec("d", 0.4),
        ]);
        let docs: Vec<&str> = sorted.iter().map(|r| r.document.as_str()).collect();
        assert_eq!(docs, vec!["b", "d", "a", "c"]);
        assert!(sorted
            .windows(2)
            .all(|w| w[0].relevance_score >= w[1].relevance_score));
    }

    #[test]
    fn ties_keep_accumulation_order() {
        let sorted = sort_by_relevance(vec![rec("first", 0.5), rec("second", 0.5)]);
        assert_eq!(sorted[0].document, "first");
        assert_eq!(sorted[1].document, "second");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(sort_by_relevance(Vec::new()).is_empty());
    }
}
