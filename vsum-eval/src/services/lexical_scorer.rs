//! Lexical Overlap Scorer
//!
//! Bag-of-words overlap between candidate and reference token sets:
//! - Precision = |overlap| / |candidate|
//! - Recall = |overlap| / |reference|
//! - F1 = 2 * (precision * recall) / (precision + recall), 0 when both are 0
//!
//! Also reports ROUGE-L (longest common subsequence F-measure) as an
//! order-aware diagnostic. It is not part of the blend, and only the first
//! `rouge_max_tokens` tokens of each text are compared.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::models::{LexicalMetrics, LexicalParams};

/// Common function words ignored when `remove_stop_words` is set
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
        "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
        "would", "could", "should", "may", "might", "can", "this", "that", "these", "those", "a",
        "an",
    ]
    .into_iter()
    .collect()
});

/// Whether a token is on the stop-word list
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

fn token_set<'a>(tokens: &'a [String], remove_stop_words: bool) -> HashSet<&'a str> {
    tokens
        .iter()
        .map(String::as_str)
        .filter(|t| !remove_stop_words || !is_stop_word(t))
        .collect()
}

/// Score lexical overlap between candidate and reference tokens
///
/// Empty token slices yield all-zero metrics. If stop-word removal would
/// leave either side without tokens, the unfiltered sets are used instead so
/// that texts made only of function words are still comparable.
pub fn score_lexical(
    candidate_tokens: &[String],
    reference_tokens: &[String],
    params: &LexicalParams,
) -> LexicalMetrics {
    if candidate_tokens.is_empty() || reference_tokens.is_empty() {
        return LexicalMetrics::default();
    }

    let mut candidate = token_set(candidate_tokens, params.remove_stop_words);
    let mut reference = token_set(reference_tokens, params.remove_stop_words);
    if candidate.is_empty() || reference.is_empty() {
        candidate = token_set(candidate_tokens, false);
        reference = token_set(reference_tokens, false);
    }

    let overlap = candidate.intersection(&reference).count() as f64;
    let precision = overlap / candidate.len() as f64;
    let recall = overlap / reference.len() as f64;

    LexicalMetrics {
        precision,
        recall,
        f1: f_measure(precision, recall),
        rouge_l: rouge_l(
            leading(candidate_tokens, params.rouge_max_tokens),
            leading(reference_tokens, params.rouge_max_tokens),
        ),
    }
}

fn leading(tokens: &[String], max: usize) -> &[String] {
    &tokens[..tokens.len().min(max)]
}

fn f_measure(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Longest common subsequence length (two-row DP)
fn lcs_length(a: &[String], b: &[String]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// ROUGE-L F-measure between candidate and reference sequences
pub fn rouge_l(candidate: &[String], reference: &[String]) -> f64 {
    let lcs = lcs_length(candidate, reference) as f64;
    if lcs == 0.0 {
        return 0.0;
    }
    f_measure(lcs / candidate.len() as f64, lcs / reference.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn params() -> LexicalParams {
        LexicalParams::default()
    }

    #[test]
    fn test_identical_is_perfect() {
        let t = toks("plants make food from sunlight");
        let m = score_lexical(&t, &t, &params());
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.recall, 1.0);
        assert_eq!(m.f1, 1.0);
        assert_eq!(m.rouge_l, 1.0);
    }

    #[test]
    fn test_disjoint_is_zero() {
        let m = score_lexical(&toks("apple orange"), &toks("dog cat"), &params());
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
        assert_eq!(m.rouge_l, 0.0);
    }

    #[test]
    fn test_shared_stop_words_do_not_count() {
        let m = score_lexical(&toks("the apple and the orange"), &toks("the dog and the cat"), &params());
        assert_eq!(m.f1, 0.0);

        let keep = LexicalParams {
            remove_stop_words: false,
            ..LexicalParams::default()
        };
        let m = score_lexical(&toks("the apple and the orange"), &toks("the dog and the cat"), &keep);
        assert!(m.f1 > 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // candidate set {machine, learning, algorithms}, reference set {machine, learning}
        let m = score_lexical(&toks("machine learning algorithms"), &toks("machine learning"), &params());
        assert!((m.precision - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(m.recall, 1.0);
        assert!((m.f1 - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let m = score_lexical(&toks("sun sun sun"), &toks("sun"), &params());
        assert_eq!(m.precision, 1.0);
        assert_eq!(m.recall, 1.0);
    }

    #[test]
    fn test_only_stop_words_falls_back_to_all_tokens() {
        let t = toks("it is what it is");
        let m = score_lexical(&toks("this is that"), &toks("this is that"), &params());
        assert_eq!(m.f1, 1.0);
        let m = score_lexical(&t, &t, &params());
        assert_eq!(m.f1, 1.0);
    }

    #[test]
    fn test_empty_tokens_all_zero() {
        let m = score_lexical(&[], &toks("something"), &params());
        assert_eq!(m, LexicalMetrics::default());
    }

    #[test]
    fn test_rouge_l_is_order_sensitive() {
        let reference = toks("light energy becomes chemical energy");
        let same_order = rouge_l(&toks("light energy becomes chemical energy"), &reference);
        let reversed = rouge_l(&toks("energy chemical becomes energy light"), &reference);
        assert_eq!(same_order, 1.0);
        assert!(reversed < same_order);
    }

    #[test]
    fn test_rouge_l_uses_leading_window() {
        let params = LexicalParams {
            rouge_max_tokens: 3,
            ..LexicalParams::default()
        };
        // Tails differ entirely; only "a b c" is compared
        let m = score_lexical(&toks("a b c x y z"), &toks("a b c p q r s"), &params);
        assert_eq!(m.rouge_l, 1.0);
    }

    #[test]
    fn test_long_inputs_stay_bounded() {
        let long: Vec<String> = (0..200_000).map(|i| format!("w{}", i)).collect();
        let mut reversed = long.clone();
        reversed.reverse();

        let started = std::time::Instant::now();
        let m = score_lexical(&long, &reversed, &params());
        assert_eq!(m.f1, 1.0);
        assert!(m.rouge_l < 1.0);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_lcs_length() {
        assert_eq!(lcs_length(&toks("a b c d"), &toks("a c d")), 3);
        assert_eq!(lcs_length(&toks("a b"), &toks("c d")), 0);
    }
}
