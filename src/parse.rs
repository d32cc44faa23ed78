//! Extraction of reported runtimes from subject executable output.
//!
//! The subject prints one line per query sub-phase in the form
//! `Time measured: 1.234 seconds`, interleaved with arbitrary other output.

use regex::Regex;
use std::sync::OnceLock;

fn runtime_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Time measured: ([0-9]+\.[0-9]+) seconds")
            .expect("built-in runtime pattern must compile")
    })
}

/// Scan `text` for all runtime lines and return the reported values in order
/// of appearance. Text without any match yields an empty vector; how many
/// timings a trial reports is the subject's business, not the parser's.
pub fn extract_runtimes(text: &str) -> Vec<f64> {
    runtime_pattern()
        .captures_iter(text)
        .filter_map(|cap| cap[1].parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_single_runtime() {
        assert_eq!(
            extract_runtimes("Time measured: 1.234 seconds"),
            vec![1.234]
        );
    }

    #[test]
    fn test_extracts_all_runtimes_in_order() {
        let out = "query 1 starting\n\
                   Time measured: 0.111 seconds\n\
                   partition scan done\n\
                   Time measured: 2.500 seconds\n\
                   Time measured: 0.003 seconds\n";
        assert_eq!(extract_runtimes(out), vec![0.111, 2.5, 0.003]);
    }

    #[test]
    fn test_round_trips_formatted_values() {
        for v in [0.0f64, 0.001, 1.0, 3.141, 17.25, 123456.789] {
            let line = format!("Time measured: {:.3} seconds", v);
            let parsed = extract_runtimes(&line);
            assert_eq!(parsed.len(), 1);
            assert!((parsed[0] - (v * 1000.0).round() / 1000.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ignores_unrelated_output() {
        assert!(extract_runtimes("loaded 512000 blocks\nno timings here\n").is_empty());
        assert!(extract_runtimes("").is_empty());
        // integer-only values do not match the expected format
        assert!(extract_runtimes("Time measured: 5 seconds").is_empty());
    }

    #[test]
    fn test_embedded_match_is_found() {
        let out = "prefix Time measured: 4.750 seconds suffix";
        assert_eq!(extract_runtimes(out), vec![4.75]);
    }
}
