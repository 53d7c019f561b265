//! Turns noisy recognizer text into a numeric reading.
//!
//! Candidates are maximal runs of digits optionally followed by a single
//! '.' and more digits. Runs are never merged across whitespace: "1 2" is
//! two candidates, not twelve. A comma is whitelist noise rather than a
//! thousands separator, so "12,000" yields the candidates 12 and 0.

use std::sync::OnceLock;

use peakwatch_types::{NumericReading, ReadingPolicy};
use regex::Regex;

static NUMBER_RUN: OnceLock<Regex> = OnceLock::new();

fn number_run() -> &'static Regex {
    NUMBER_RUN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").unwrap())
}

/// All numeric candidates in the text, left to right. Tokens that fail to
/// parse are skipped.
pub fn candidates(text: &str) -> Vec<f64> {
    number_run()
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// Reading value for a candidate list under the given policy; 0.0 when the
/// list is empty.
pub fn select(candidates: &[f64], policy: ReadingPolicy) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    match policy {
        ReadingPolicy::Max => candidates.iter().copied().fold(f64::MIN, f64::max),
        ReadingPolicy::First => candidates[0],
        ReadingPolicy::Last => candidates[candidates.len() - 1],
        ReadingPolicy::Sum => candidates.iter().sum(),
    }
}

pub fn extract(text: &str, policy: ReadingPolicy) -> NumericReading {
    let value = select(&candidates(text), policy);
    NumericReading {
        value,
        raw_text: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_text_yields_max_candidate() {
        let reading = extract("5\n1\n23.4", ReadingPolicy::Max);
        assert_eq!(candidates("5\n1\n23.4"), vec![5.0, 1.0, 23.4]);
        assert_eq!(reading.value, 23.4);
        assert_eq!(reading.raw_text, "5\n1\n23.4");
    }

    #[test]
    fn empty_text_reads_zero() {
        assert_eq!(extract("", ReadingPolicy::Max).value, 0.0);
        assert_eq!(extract("..,,\n", ReadingPolicy::Max).value, 0.0);
    }

    #[test]
    fn comma_is_noise_not_a_separator() {
        // Documented behavior: "12,000" is two runs, 12 and 0.
        assert_eq!(candidates("12,000"), vec![12.0, 0.0]);
        assert_eq!(extract("12,000", ReadingPolicy::Max).value, 12.0);
    }

    #[test]
    fn runs_do_not_merge_across_whitespace() {
        assert_eq!(candidates(" 1 2 "), vec![1.0, 2.0]);
    }

    #[test]
    fn decimal_runs_keep_a_single_point() {
        assert_eq!(candidates("3.14.15"), vec![3.14, 15.0]);
        assert_eq!(candidates("7."), vec![7.0]);
    }

    #[test]
    fn policies_pick_the_expected_candidate() {
        let c = candidates("5\n1\n23.4");
        assert_eq!(select(&c, ReadingPolicy::Max), 23.4);
        assert_eq!(select(&c, ReadingPolicy::First), 5.0);
        assert_eq!(select(&c, ReadingPolicy::Last), 23.4);
        assert_eq!(select(&c, ReadingPolicy::Sum), 29.4);

        let c = candidates("12,000");
        assert_eq!(select(&c, ReadingPolicy::First), 12.0);
        assert_eq!(select(&c, ReadingPolicy::Last), 0.0);
    }
}
