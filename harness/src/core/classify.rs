//! Deterministic classification of captured target output.

/// Outcome of comparing one year's captured output against the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearOutcome {
    /// Normalized output matched the expected string byte-for-byte.
    Pass,
    /// The target produced no output (timeout, crash, or silence).
    NoOutput,
    /// The target produced output that differs from the expected string.
    Mismatch { expected: String, received: String },
}

impl YearOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, YearOutcome::Pass)
    }
}

/// Classify raw captured stdout against `expected`.
///
/// Normalization trims leading/trailing whitespace, including the trailing
/// newline. Output that is not valid UTF-8 cannot match and is carried into
/// the mismatch via lossy conversion.
pub fn classify(expected: &str, raw_stdout: &[u8]) -> YearOutcome {
    let received = String::from_utf8_lossy(raw_stdout);
    let received = received.trim();
    if received.is_empty() {
        YearOutcome::NoOutput
    } else if received == expected {
        YearOutcome::Pass
    } else {
        YearOutcome::Mismatch {
            expected: expected.to_string(),
            received: received.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_passes() {
        assert_eq!(classify("expected line", b"expected line"), YearOutcome::Pass);
    }

    #[test]
    fn trailing_newline_is_trimmed() {
        assert_eq!(classify("expected line", b"expected line\n"), YearOutcome::Pass);
        assert_eq!(
            classify("expected line", b"  expected line \t\n"),
            YearOutcome::Pass
        );
    }

    #[test]
    fn empty_output_is_no_output() {
        assert_eq!(classify("expected line", b""), YearOutcome::NoOutput);
    }

    #[test]
    fn whitespace_only_output_is_no_output() {
        assert_eq!(classify("expected line", b" \n\t\n"), YearOutcome::NoOutput);
    }

    #[test]
    fn mismatch_carries_both_strings() {
        let outcome = classify("expected line", b"something else\n");
        assert_eq!(
            outcome,
            YearOutcome::Mismatch {
                expected: "expected line".to_string(),
                received: "something else".to_string(),
            }
        );
        assert!(!outcome.is_pass());
    }

    #[test]
    fn unicode_output_compares_byte_for_byte() {
        let expected = "壬寅 (rén-yín, Water Tiger; yang - year 39 of the cycle)";
        assert_eq!(classify(expected, expected.as_bytes()), YearOutcome::Pass);
        let wrong = "壬寅 (ren-yin, Water Tiger; yang - year 39 of the cycle)";
        assert!(!classify(expected, wrong.as_bytes()).is_pass());
    }
}
