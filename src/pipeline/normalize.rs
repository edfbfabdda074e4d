//! Converts one raw listing entry into a canonical `JobPosting`.

use crate::error::AppError;
use crate::models::job::{JobPosting, SALARY_NOT_SPECIFIED, UNKNOWN_APPLICANT_COUNT};
use crate::source::raw::{FooterItem, RawListing};

/// Separator the upstream uses between segments of its description
/// strings ("Acme Corp · New York, NY").
const SEGMENT_SEPARATOR: char = '\u{b7}';

/// Extract the stable numeric job identifier from an opaque resource
/// name: the first run of ASCII digits. Entries without one are
/// malformed.
pub fn extract_job_id(urn: &str) -> Result<String, AppError> {
    let mut digits = String::new();
    for c in urn.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !digits.is_empty() {
            break;
        }
    }
    if digits.is_empty() {
        return Err(AppError::Parse(format!("no job id in urn {urn:?}")));
    }
    Ok(digits)
}

/// First whitespace-delimited token of the applicant-count text. The
/// "Be among the first 25 applicants" phrasing normalizes to the
/// bounded sentinel.
pub fn normalize_applicant_count(text: &str) -> String {
    match text.split_whitespace().next() {
        Some(token) if token.eq_ignore_ascii_case("be") => "<25".to_string(),
        Some(token) => token.to_string(),
        None => UNKNOWN_APPLICANT_COUNT.to_string(),
    }
}

/// Salary lives in the first segment of the tertiary description, and
/// only when it actually looks like a dollar figure.
fn normalize_salary(tertiary: Option<&str>) -> String {
    let first = tertiary
        .and_then(|t| t.split(SEGMENT_SEPARATOR).next())
        .map(str::trim)
        .unwrap_or("");
    if first.starts_with('$') {
        first.to_string()
    } else {
        SALARY_NOT_SPECIFIED.to_string()
    }
}

/// Company and location. Newer upstream payloads pack both into the
/// primary description ("Acme Corp · New York, NY"); older ones use the
/// secondary description for the location. Prefer the split, fall back
/// to the separate fields.
fn extract_company_location(entry: &RawListing) -> (String, String) {
    let primary = entry
        .primary_description
        .as_ref()
        .and_then(|t| t.text.as_deref())
        .unwrap_or("");
    if let Some((company, location)) = primary.split_once(SEGMENT_SEPARATOR) {
        return (company.trim().to_string(), location.trim().to_string());
    }
    let secondary = entry
        .secondary_description
        .as_ref()
        .and_then(|t| t.text.as_deref())
        .unwrap_or("");
    (primary.trim().to_string(), secondary.trim().to_string())
}

/// Normalize one raw entry. `Ok(None)` for entries without the posting
/// marker (auxiliary entities, end-of-collection filler); `Err` for
/// entries that carry the marker but can't be parsed.
///
/// The reposted flag is deliberately left `false` here: repost status is
/// a property of the whole aggregation run (the id set is consulted in a
/// second pass over everything the run accumulated), not of one entry.
pub fn normalize_listing(
    entry: &RawListing,
    collection_slug: &str,
    run_id: &str,
) -> Result<Option<JobPosting>, AppError> {
    if entry.pre_dash_normalized_job_posting_urn.is_none() {
        return Ok(None);
    }

    let job_id = extract_job_id(&entry.entity_urn)?;

    let mut applicant_count = UNKNOWN_APPLICANT_COUNT.to_string();
    let mut listing_date = String::new();
    let mut promoted = false;
    let mut easy_apply = false;

    for item in &entry.footer_items {
        match item {
            FooterItem::ListedDate { time_at } => {
                listing_date = time_at.to_string();
            }
            FooterItem::ApplicantCountText { text } => {
                if let Some(text) = text.as_ref().and_then(|t| t.text.as_deref()) {
                    applicant_count = normalize_applicant_count(text);
                }
            }
            FooterItem::Promoted { text } => {
                promoted = text.as_ref().and_then(|t| t.text.as_deref()) == Some("Promoted");
            }
            FooterItem::EasyApplyText { text } => {
                easy_apply = text.as_ref().and_then(|t| t.text.as_deref()) == Some("Easy Apply");
            }
            FooterItem::Unknown => {}
        }
    }

    let title = entry
        .title
        .as_ref()
        .and_then(|t| t.text.clone())
        .ok_or_else(|| AppError::Parse(format!("posting {job_id} has no title")))?;

    let (company, location) = extract_company_location(entry);
    let remote = location.to_lowercase().contains("remote");
    let salary = normalize_salary(
        entry
            .tertiary_description
            .as_ref()
            .and_then(|t| t.text.as_deref()),
    );
    let company_link = entry.logo.as_ref().and_then(|l| l.action_target.clone());

    Ok(Some(JobPosting {
        job_id,
        run_id: run_id.to_string(),
        collection_slug: collection_slug.to_string(),
        urn: entry.entity_urn.clone(),
        title,
        company,
        company_link,
        location,
        remote,
        salary,
        listing_date,
        reposted: false,
        applicant_count,
        promoted,
        easy_apply,
        apply_url: None,
        description: None,
        company_alumni: None,
        school_alumni: None,
        connections: None,
    }))
}
