/// A set of interchangeable phrases (usually Hindi and English variants of the
/// same idea) that earn `points` when any of them appears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordGroup {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub points: f64,
}

impl KeywordGroup {
    pub const fn new(label: &'static str, keywords: &'static [&'static str], points: f64) -> Self {
        Self {
            label,
            keywords,
            points,
        }
    }

    /// Substring match against lower-cased text. Keywords are stored lower-case.
    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.keywords)
    }
}

/// Outcome of scanning text against a list of groups.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroupScan {
    pub points: f64,
    pub matched_groups: usize,
}

pub struct KeywordScanner;

impl KeywordScanner {
    /// Adds up the points of every group present in `text`. Each group counts
    /// at most once however many of its keywords appear.
    pub fn scan(text: &str, groups: &[KeywordGroup]) -> GroupScan {
        groups
            .iter()
            .filter(|g| g.matches(text))
            .fold(GroupScan::default(), |acc, g| GroupScan {
                points: acc.points + g.points,
                matched_groups: acc.matched_groups + 1,
            })
    }

    /// Number of keywords in `phrases` that occur in `text`.
    pub fn count_present(text: &str, phrases: &[&str]) -> usize {
        phrases.iter().filter(|p| text.contains(**p)).count()
    }
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PAYMENT: KeywordGroup = KeywordGroup::new("payment", &["payment", "भुगतान"], 3.0);
    const URGENT: KeywordGroup = KeywordGroup::new("urgency", &["urgent", "तुरंत"], 4.0);
    const DEADLINE: KeywordGroup = KeywordGroup::new("deadline", &["deadline"], 2.0);

    #[test]
    fn test_matches_either_language() {
        assert!(PAYMENT.matches("please make the payment"));
        assert!(PAYMENT.matches("आज भुगतान करें"));
        assert!(!PAYMENT.matches("hello"));
    }

    #[test]
    fn test_scan_counts_each_group_once() {
        let scan = KeywordScanner::scan(
            "payment payment भुगतान is urgent",
            &[PAYMENT, URGENT, DEADLINE],
        );
        assert_relative_eq!(scan.points, 7.0);
        assert_eq!(scan.matched_groups, 2);
    }

    #[test]
    fn test_scan_nothing_matches() {
        let scan = KeywordScanner::scan("good morning", &[PAYMENT, URGENT]);
        assert_eq!(scan, GroupScan::default());
    }

    #[test]
    fn test_scan_empty_groups() {
        assert_eq!(KeywordScanner::scan("anything", &[]), GroupScan::default());
    }

    #[test]
    fn test_count_present() {
        assert_eq!(
            KeywordScanner::count_present("you must pay but you said", &["you must", "but you", "x"]),
            2
        );
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("agent: idiot", &["stupid", "idiot"]));
        assert!(!contains_any("agent: hello", &["stupid", "idiot"]));
    }
}
