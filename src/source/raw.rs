//! Wire shapes of the upstream listing and detail APIs. The schema is a
//! versioned, partially-undocumented external contract; everything here
//! is optional-by-default so that upstream drift degrades to skipped
//! fields instead of failed pages.

use serde::Deserialize;

/// Envelope of one listing page. The interesting entries live in the
/// normalized `included` side-table.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEnvelope {
    #[serde(default)]
    pub included: Vec<RawListing>,
}

/// One raw entry from a listing page. Entries carrying
/// `preDashNormalizedJobPostingUrn` are job postings; the rest are
/// auxiliary entities we only consult for the reposted flag.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawListing {
    pub entity_urn: String,
    pub pre_dash_normalized_job_posting_urn: Option<String>,
    pub reposted_job: bool,
    pub footer_items: Vec<FooterItem>,
    pub title: Option<TextBlock>,
    pub primary_description: Option<TextBlock>,
    pub secondary_description: Option<TextBlock>,
    pub tertiary_description: Option<TextBlock>,
    pub logo: Option<Logo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBlock {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Logo {
    pub action_target: Option<String>,
}

/// Heterogeneous footer entries, tagged by `type`. Tags we don't know
/// about deserialize to `Unknown` and are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FooterItem {
    #[serde(rename = "LISTED_DATE", rename_all = "camelCase")]
    ListedDate { time_at: i64 },
    #[serde(rename = "APPLICANT_COUNT_TEXT")]
    ApplicantCountText {
        #[serde(default)]
        text: Option<TextBlock>,
    },
    #[serde(rename = "PROMOTED")]
    Promoted {
        #[serde(default)]
        text: Option<TextBlock>,
    },
    #[serde(rename = "EASY_APPLY_TEXT")]
    EasyApplyText {
        #[serde(default)]
        text: Option<TextBlock>,
    },
    #[serde(other)]
    Unknown,
}

/// Detail-lookup result for one job. A per-job `error` means the detail
/// service could not resolve that job; the batch itself still succeeded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetail {
    pub num_applicants: Option<String>,
    pub apply_url: Option<String>,
    pub description: Option<String>,
    pub company_alumni: Option<i64>,
    pub school_alumni: Option<i64>,
    pub connections: Option<i64>,
    pub error: Option<String>,
}
