//! The EarlyBird composite relevance score: recency, network proximity
//! and competitiveness, computed at sort time against a caller-supplied
//! clock.

use crate::models::job::JobPosting;

const HOUR_MS: f64 = 3_600_000.0;

/// Applicant count as a comparable number. `"?"` is unknown; a `"<N"`
/// bound counts as one below the bound; trailing junk after the leading
/// digits ("100+ applicants") is ignored.
pub fn parse_applicant_count(count: &str) -> Option<i64> {
    if count == "?" {
        return None;
    }
    let (digits, bounded) = match count.strip_prefix('<') {
        Some(rest) => (rest, true),
        None => (count, false),
    };
    let run: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    let value = run.parse::<i64>().ok()?;
    Some(if bounded { value - 1 } else { value })
}

/// First `$`-prefixed digit group of the salary text, commas allowed.
/// Unparseable salaries compare as 0.
pub fn salary_value(salary: &str) -> i64 {
    let Some(idx) = salary.find('$') else {
        return 0;
    };
    let digits: String = salary[idx + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Raw networking reach: connections plus both alumni counts.
pub fn networking_score(job: &JobPosting) -> i64 {
    job.connections.unwrap_or(0)
        + job.company_alumni.unwrap_or(0)
        + job.school_alumni.unwrap_or(0)
}

/// The composite score. Not cached anywhere; callers pass the current
/// wall clock in epoch millis.
pub fn early_bird_score(job: &JobPosting, now_ms: i64) -> f64 {
    let mut score = 0.0;

    // Recency (max 100, +30 repost boost inside the first day)
    let posted_ms = job.listing_date.parse::<i64>().unwrap_or(0);
    let hours_since_posted = (now_ms - posted_ms) as f64 / HOUR_MS;
    if hours_since_posted < 24.0 {
        score += 100.0 - hours_since_posted * (50.0 / 24.0);
        if job.reposted {
            score += 30.0;
        }
    } else if hours_since_posted < 168.0 {
        score += 50.0 - (hours_since_posted - 24.0) * (50.0 / 144.0);
    }

    // Connections (max 80: 20 connections saturate)
    score += (job.connections.unwrap_or(0) as f64 * 4.0).min(80.0);

    // Alumni (max 60; company alumni weigh more than school alumni)
    score += (job.company_alumni.unwrap_or(0) as f64 * 3.0).min(40.0);
    score += (job.school_alumni.unwrap_or(0) as f64 * 2.0).min(20.0);

    // Competitiveness (max 100; unknown counts contribute nothing)
    if let Some(applicants) = parse_applicant_count(&job.applicant_count) {
        score += if applicants < 25 {
            100.0
        } else if applicants < 50 {
            75.0
        } else if applicants < 100 {
            50.0
        } else if applicants < 200 {
            25.0
        } else {
            0.0
        };
    }

    score
}
