//! Confidence scoring from per-token log-probabilities.

/// Convert an ordered sequence of natural-log token probabilities into a
/// bounded percentage.
///
/// The mean in log space is the geometric mean of the per-token
/// probabilities, so `exp(mean)` summarizes generation certainty in [0, 1].
/// An empty sequence has no defined confidence and yields `None`.
pub fn score_from_logprobs(logprobs: &[f64]) -> Option<f64> {
    if logprobs.is_empty() {
        return None;
    }
    let avg = logprobs.iter().sum::<f64>() / logprobs.len() as f64;
    Some((avg.exp() * 100.0).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_undefined() {
        assert_eq!(score_from_logprobs(&[]), None);
    }

    #[test]
    fn test_certain_tokens_score_one_hundred() {
        assert_eq!(score_from_logprobs(&[0.0]), Some(100.0));
        assert_eq!(score_from_logprobs(&[0.0, 0.0, 0.0]), Some(100.0));
    }

    #[test]
    fn test_monotonic_in_mean_logprob() {
        let low = score_from_logprobs(&[-2.0, -3.0]).unwrap();
        let mid = score_from_logprobs(&[-1.0, -1.5]).unwrap();
        let high = score_from_logprobs(&[-0.1, -0.2]).unwrap();
        assert!(low < mid);
        assert!(mid < high);
    }

    #[test]
    fn test_bounded() {
        let score = score_from_logprobs(&[-50.0, -80.0]).unwrap();
        assert!((0.0..=100.0).contains(&score));

        // A positive logprob is out of contract, but the clamp still holds.
        let score = score_from_logprobs(&[1.0]).unwrap();
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_known_value() {
        let score = score_from_logprobs(&[-0.1, -0.2]).unwrap();
        let expected = (-0.15f64).exp() * 100.0;
        assert!((score - expected).abs() < 1e-9);
    }
}
