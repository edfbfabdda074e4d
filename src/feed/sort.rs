use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::feed::score::{early_bird_score, networking_score, parse_applicant_count, salary_value};
use crate::models::job::JobPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    EarlyBirdScore,
    ListingDate,
    ApplicantCount,
    Salary,
    Networking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Stable multi-key sort. "desc" means best-first for every key except
/// applicant count, whose natural direction is ascending (fewest
/// applicants first); unknown counts are pinned to the end either way.
pub fn sort_jobs(
    jobs: &mut [JobPosting],
    key: SortKey,
    direction: SortDirection,
    now_ms: i64,
) {
    jobs.sort_by(|a, b| compare(a, b, key, direction, now_ms));
}

fn compare(
    a: &JobPosting,
    b: &JobPosting,
    key: SortKey,
    direction: SortDirection,
    now_ms: i64,
) -> Ordering {
    match key {
        SortKey::ApplicantCount => {
            let a_count = parse_applicant_count(&a.applicant_count);
            let b_count = parse_applicant_count(&b.applicant_count);
            match (a_count, b_count) {
                (None, None) => Ordering::Equal,
                // unknown sorts last regardless of direction
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a_count), Some(b_count)) => {
                    let ascending = a_count.cmp(&b_count);
                    match direction {
                        SortDirection::Asc => ascending,
                        SortDirection::Desc => ascending.reverse(),
                    }
                }
            }
        }
        _ => {
            // best-first ordering for the key, flipped for "asc"
            let best_first = match key {
                SortKey::EarlyBirdScore => early_bird_score(b, now_ms)
                    .partial_cmp(&early_bird_score(a, now_ms))
                    .unwrap_or(Ordering::Equal),
                SortKey::ListingDate => {
                    let a_date = a.listing_date.parse::<i64>().unwrap_or(0);
                    let b_date = b.listing_date.parse::<i64>().unwrap_or(0);
                    b_date.cmp(&a_date)
                }
                SortKey::Salary => salary_value(&b.salary).cmp(&salary_value(&a.salary)),
                SortKey::Networking => networking_score(b).cmp(&networking_score(a)),
                SortKey::ApplicantCount => unreachable!(),
            };
            match direction {
                SortDirection::Desc => best_first,
                SortDirection::Asc => best_first.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW_MS: i64 = 1_700_000_000_000;

    fn job(id: &str) -> JobPosting {
        JobPosting {
            job_id: id.to_string(),
            run_id: "1".to_string(),
            collection_slug: "remote-jobs".to_string(),
            urn: format!("urn:li:job:{id}"),
            title: "Engineer".to_string(),
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

    fn with_applicants(id: &str, count: &str) -> JobPosting {
        let mut j = job(id);
        j.applicant_count = count.to_string();
        j
    }

    #[test]
    fn unknown_applicant_count_sorts_last_in_both_directions() {
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let mut jobs = vec![
                with_applicants("a", "10"),
                with_applicants("b", "?"),
                with_applicants("c", "<25"),
            ];
            sort_jobs(&mut jobs, SortKey::ApplicantCount, direction, NOW_MS);
            assert_eq!(jobs[2].job_id, "b", "direction {direction:?}");
        }
    }

    #[test]
    fn applicant_count_ascending_puts_fewest_first() {
        let mut jobs = vec![
            with_applicants("a", "50"),
            with_applicants("b", "10"),
            with_applicants("c", "<25"),
        ];
        sort_jobs(&mut jobs, SortKey::ApplicantCount, SortDirection::Asc, NOW_MS);
        let order: Vec<&str> = jobs.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);

        sort_jobs(&mut jobs, SortKey::ApplicantCount, SortDirection::Desc, NOW_MS);
        let order: Vec<&str> = jobs.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn listing_date_desc_puts_newest_first() {
        let mut newer = job("new");
        newer.listing_date = (NOW_MS - 1_000_000).to_string();
        let mut older = job("old");
        older.listing_date = (NOW_MS - 9_000_000).to_string();
        let mut jobs = vec![older, newer];
        sort_jobs(&mut jobs, SortKey::ListingDate, SortDirection::Desc, NOW_MS);
        assert_eq!(jobs[0].job_id, "new");
        sort_jobs(&mut jobs, SortKey::ListingDate, SortDirection::Asc, NOW_MS);
        assert_eq!(jobs[0].job_id, "old");
    }

    #[test]
    fn salary_desc_puts_highest_first_and_unparseable_last() {
        let mut a = job("a");
        a.salary = "$90,000/yr".to_string();
        let mut b = job("b");
        b.salary = "$120,000/yr".to_string();
        let c = job("c"); // Not specified -> 0
        let mut jobs = vec![a, c, b];
        sort_jobs(&mut jobs, SortKey::Salary, SortDirection::Desc, NOW_MS);
        let order: Vec<&str> = jobs.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn early_bird_desc_puts_highest_score_first() {
        let mut fresh = job("fresh");
        fresh.listing_date = (NOW_MS - 2 * 3_600_000).to_string();
        let mut stale = job("stale");
        stale.listing_date = (NOW_MS - 200 * 3_600_000).to_string();
        let mut jobs = vec![stale, fresh];
        sort_jobs(&mut jobs, SortKey::EarlyBirdScore, SortDirection::Desc, NOW_MS);
        assert_eq!(jobs[0].job_id, "fresh");
    }

    #[test]
    fn networking_sums_all_three_signals() {
        let mut a = job("a");
        a.connections = Some(2);
        a.company_alumni = Some(1);
        let mut b = job("b");
        b.school_alumni = Some(9);
        let mut jobs = vec![a, b];
        sort_jobs(&mut jobs, SortKey::Networking, SortDirection::Desc, NOW_MS);
        assert_eq!(jobs[0].job_id, "b");
    }

    #[test]
    fn ties_keep_original_relative_order() {
        let mut jobs = vec![
            with_applicants("first", "10"),
            with_applicants("second", "10"),
        ];
        sort_jobs(&mut jobs, SortKey::ApplicantCount, SortDirection::Asc, NOW_MS);
        assert_eq!(jobs[0].job_id, "first");
        assert_eq!(jobs[1].job_id, "second");
    }
}
