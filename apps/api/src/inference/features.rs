//! Input normalization — turns raw form fields into the fixed feature row the
//! classifier was trained on.
//!
//! The column set and order here must match the training columns exactly.
//! `LinearTextClassifier` checks its artifact against `FEATURE_COLUMNS` at load.

/// Column order handed to the classifier: six structured fields passed
/// through unchanged, then `all_text`.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "job_title",
    "location",
    "industry",
    "salary_range",
    "company_profile",
    "employment_type",
    "all_text",
];

// ────────────────────────────────────────────────────────────────────────────
// Input / feature types
// ────────────────────────────────────────────────────────────────────────────

/// A job posting as submitted by the form. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct JobPosting {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub salary_range: Option<String>,
    pub company_profile: Option<String>,
    pub employment_type: Option<String>,
    pub job_desc: Option<String>,
    pub skills_desc: Option<String>,
    pub text: Option<String>,
}

impl JobPosting {
    /// Builds a posting from raw form pairs. The first value of a repeated
    /// field wins; unknown fields are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut posting = JobPosting::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "job_title" => &mut posting.job_title,
                "location" => &mut posting.location,
                "industry" => &mut posting.industry,
                "salary_range" => &mut posting.salary_range,
                "company_profile" => &mut posting.company_profile,
                "employment_type" => &mut posting.employment_type,
                "job_desc" => &mut posting.job_desc,
                "skills_desc" => &mut posting.skills_desc,
                "text" => &mut posting.text,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        posting
    }
}

/// One row of classifier input. Built per request and dropped after predict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    pub job_title: String,
    pub location: String,
    pub industry: String,
    pub salary_range: String,
    pub company_profile: String,
    pub employment_type: String,
    pub all_text: String,
}

impl FeatureVector {
    /// `(column, value)` pairs in `FEATURE_COLUMNS` order.
    pub fn columns(&self) -> [(&'static str, &str); 7] {
        [
            (FEATURE_COLUMNS[0], self.job_title.as_str()),
            (FEATURE_COLUMNS[1], self.location.as_str()),
            (FEATURE_COLUMNS[2], self.industry.as_str()),
            (FEATURE_COLUMNS[3], self.salary_range.as_str()),
            (FEATURE_COLUMNS[4], self.company_profile.as_str()),
            (FEATURE_COLUMNS[5], self.employment_type.as_str()),
            (FEATURE_COLUMNS[6], self.all_text.as_str()),
        ]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// The one null check used everywhere. `None` is the only missing marker;
/// an empty string is a present value.
pub fn is_missing(value: Option<&str>) -> bool {
    value.is_none()
}

fn coalesce(value: Option<&str>) -> String {
    if is_missing(value) {
        String::new()
    } else {
        value.unwrap_or_default().to_string()
    }
}

/// Space-joins `job_desc`, `skills_desc` and `text`. Empty parts keep their
/// slot, so the result is never trimmed.
pub fn build_all_text(
    job_desc: Option<&str>,
    skills_desc: Option<&str>,
    text: Option<&str>,
) -> String {
    [job_desc, skills_desc, text]
        .into_iter()
        .map(coalesce)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn normalize(raw: &JobPosting) -> FeatureVector {
    FeatureVector {
        job_title: coalesce(raw.job_title.as_deref()),
        location: coalesce(raw.location.as_deref()),
        industry: coalesce(raw.industry.as_deref()),
        salary_range: coalesce(raw.salary_range.as_deref()),
        company_profile: coalesce(raw.company_profile.as_deref()),
        employment_type: coalesce(raw.employment_type.as_deref()),
        all_text: build_all_text(
            raw.job_desc.as_deref(),
            raw.skills_desc.as_deref(),
            raw.text.as_deref(),
        ),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
