//! Global keyword→frequency table over the snapshot's job titles.
//! Rebuilt from scratch on every refresh, never incrementally.

use std::collections::HashMap;

use crate::models::job::JobPosting;
use crate::models::keyword::KeywordCount;

/// Tokenize one title: casefold, strip everything that isn't
/// alphanumeric or whitespace, split on whitespace runs, drop
/// single-character tokens.
fn title_tokens(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_string)
        .collect()
}

/// Build the keyword table: per-job local counts merged into one global
/// accumulator. No ordering contract; the store's read query orders by
/// count.
pub fn build_keyword_counts(jobs: &[JobPosting]) -> Vec<KeywordCount> {
    let mut global: HashMap<String, i64> = HashMap::new();
    for job in jobs {
        let mut local: HashMap<String, i64> = HashMap::new();
        for token in title_tokens(&job.title) {
            *local.entry(token).or_default() += 1;
        }
        for (token, count) in local {
            *global.entry(token).or_default() += count;
        }
    }
    global
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn titled(title: &str) -> JobPosting {
        JobPosting {
            job_id: "1".to_string(),
            run_id: "1".to_string(),
            collection_slug: "remote-jobs".to_string(),
            urn: "urn:li:job:1".to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            company_link: None,
            location: "Remote".to_string(),
            remote: true,
            salary: "Not specified".to_string(),
            listing_date: "0".to_string(),
            reposted: false,
            applicant_count: "?".to_string(),
            promoted: false,
            easy_apply: false,
            apply_url: None,
            description: None,
            company_alumni: None,
            school_alumni: None,
            connections: None,
        }
    }

    fn as_map(counts: Vec<KeywordCount>) -> HashMap<String, i64> {
        counts.into_iter().map(|k| (k.keyword, k.count)).collect()
    }

    #[test]
    fn counts_are_case_folded_and_summed() {
        let jobs = vec![titled("Backend Engineer"), titled("backend intern")];
        let counts = as_map(build_keyword_counts(&jobs));
        assert_eq!(counts.get("backend"), Some(&2));
        assert_eq!(counts.get("engineer"), Some(&1));
        assert_eq!(counts.get("intern"), Some(&1));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn single_letter_tokens_are_excluded() {
        let counts = as_map(build_keyword_counts(&[titled("A B Engineer")]));
        assert!(!counts.contains_key("a"));
        assert!(!counts.contains_key("b"));
        assert_eq!(counts.get("engineer"), Some(&1));
    }

    #[test]
    fn punctuation_is_stripped() {
        let counts = as_map(build_keyword_counts(&[titled("Sr. Engineer (Remote) - C++")]));
        assert_eq!(counts.get("sr"), Some(&1));
        assert_eq!(counts.get("engineer"), Some(&1));
        assert_eq!(counts.get("remote"), Some(&1));
        // "C++" collapses to a single letter and drops out
        assert!(!counts.contains_key("c"));
    }

    #[test]
    fn repeated_token_within_one_title() {
        let counts = as_map(build_keyword_counts(&[titled("Engineer, Engineer Tools")]));
        assert_eq!(counts.get("engineer"), Some(&2));
    }
}
