use crate::constants::{DATE_FORMAT, MAX_UPSTREAM_RESULTS};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort direction accepted by the upstream search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// Returns the wire representation used in the search payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl From<&str> for SortOrder {
    fn from(value: &str) -> Self {
        // Anything other than an explicit descending marker sorts ascending;
        // callers can decide to log if needed.
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// A pair of optional date bounds in the upstream's dd/mm/yy form.
///
/// Either bound may be absent. An empty range (both bounds absent) is
/// equivalent to no filter and is never emitted in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Parses textual dd/mm/yy bounds, failing fast on malformed input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the offending string if either bound
    /// does not parse as dd/mm/yy.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> AppResult<Self> {
        Ok(Self {
            from: from.map(parse_upstream_date).transpose()?,
            to: to.map(parse_upstream_date).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Parses a single dd/mm/yy date string.
pub fn parse_upstream_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        AppError::InvalidInput(format!("Invalid date '{value}' (expected dd/mm/yy): {e}"))
    })
}

/// Immutable set of search filters; every field is optional.
///
/// `kod_yeshuv` and `settlement` are mutually exclusive on the wire: when a
/// resolved settlement code is present the name is suppressed. The legacy
/// free-text `purpose`/`region` fields are only emitted when their structured
/// replacements (`tender_purposes`/`regions`) are absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub tender_number: Option<String>,
    pub tender_types: Option<Vec<i64>>,
    pub settlement: Option<String>,
    pub kod_yeshuv: Option<i64>,
    pub neighborhood: Option<String>,
    pub tender_purposes: Option<Vec<i64>>,
    pub regions: Option<Vec<i64>>,
    pub tender_statuses: Option<Vec<i64>>,
    pub priority_populations: Option<Vec<i64>>,
    pub submission_deadline: Option<DateRange>,
    pub committee_date: Option<DateRange>,
    pub publication_date: Option<DateRange>,
    /// Legacy free-text land use purpose (superseded by `tender_purposes`)
    pub purpose: Option<String>,
    /// Legacy free-text region name (superseded by `regions`)
    pub region: Option<String>,
    pub active_only: bool,
    pub quick_search: bool,
    pub has_results: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    /// Client-side page size; never sent upstream
    pub page_size: usize,
    /// Client-side 1-indexed page number; never sent upstream
    pub page_number: usize,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            tender_number: None,
            tender_types: None,
            settlement: None,
            kod_yeshuv: None,
            neighborhood: None,
            tender_purposes: None,
            regions: None,
            tender_statuses: None,
            priority_populations: None,
            submission_deadline: None,
            committee_date: None,
            publication_date: None,
            purpose: None,
            region: None,
            active_only: false,
            quick_search: false,
            has_results: None,
            sort_by: None,
            sort_order: None,
            page_size: 100,
            page_number: 1,
        }
    }
}

impl SearchCriteria {
    /// Preset for all available tenders in one upstream call.
    pub fn all() -> Self {
        Self {
            page_size: MAX_UPSTREAM_RESULTS,
            ..Self::default()
        }
    }

    /// Preset for currently active tenders.
    pub fn active() -> Self {
        Self {
            active_only: true,
            page_size: MAX_UPSTREAM_RESULTS,
            ..Self::default()
        }
    }

    /// Preset for tenders with results whose submission deadline falls in
    /// the last `days` days, counted back from `today`.
    ///
    /// `today` is injected so the computation stays a pure function of its
    /// inputs; callers pass the wall-clock date at the outermost layer.
    pub fn recent_results(days: i64, today: NaiveDate) -> Self {
        Self {
            has_results: Some(true),
            submission_deadline: Some(DateRange {
                from: Some(today - chrono::Duration::days(days)),
                to: None,
            }),
            page_size: MAX_UPSTREAM_RESULTS,
            ..Self::default()
        }
    }

    /// Preset for type/purpose searches.
    pub fn by_type(tender_types: Option<Vec<i64>>, purpose: Option<String>) -> Self {
        Self {
            tender_types,
            purpose,
            page_size: MAX_UPSTREAM_RESULTS,
            ..Self::default()
        }
    }

    /// Preset for location searches by settlement code, region name,
    /// neighborhood, or legacy purpose text.
    pub fn by_location(
        kod_yeshuv: Option<i64>,
        region: Option<String>,
        neighborhood: Option<String>,
        purpose: Option<String>,
    ) -> Self {
        Self {
            kod_yeshuv,
            region,
            neighborhood,
            purpose,
            page_size: MAX_UPSTREAM_RESULTS,
            ..Self::default()
        }
    }
}

/// Upstream-shaped tender record.
///
/// Only the identifier is guaranteed; upstream omits fields depending on
/// tender status. Unknown fields are retained in `extra` so records survive
/// a round-trip without loss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenderRecord {
    #[serde(rename = "MichrazID", default)]
    pub michraz_id: i64,
    #[serde(rename = "MichrazName", skip_serializing_if = "Option::is_none")]
    pub michraz_name: Option<String>,
    #[serde(rename = "KodYeshuv", skip_serializing_if = "Option::is_none")]
    pub kod_yeshuv: Option<i64>,
    #[serde(rename = "KodMerchav", skip_serializing_if = "Option::is_none")]
    pub kod_merchav: Option<i64>,
    #[serde(rename = "StatusMichraz", skip_serializing_if = "Option::is_none")]
    pub status_michraz: Option<i64>,
    #[serde(rename = "KodSugMichraz", skip_serializing_if = "Option::is_none")]
    pub kod_sug_michraz: Option<i64>,
    #[serde(rename = "KodYeudMichraz", skip_serializing_if = "Option::is_none")]
    pub kod_yeud_michraz: Option<i64>,
    #[serde(rename = "Shchuna", skip_serializing_if = "Option::is_none")]
    pub shchuna: Option<String>,
    #[serde(rename = "YechidotDiur", skip_serializing_if = "Option::is_none")]
    pub yechidot_diur: Option<i64>,
    #[serde(rename = "PirsumDate", skip_serializing_if = "Option::is_none")]
    pub pirsum_date: Option<String>,
    #[serde(rename = "SgiraDate", skip_serializing_if = "Option::is_none")]
    pub sgira_date: Option<String>,
    #[serde(rename = "VaadaDate", skip_serializing_if = "Option::is_none")]
    pub vaada_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TenderRecord {
    /// Parses a raw upstream record.
    pub fn from_value(value: &Value) -> AppResult<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Detail lookups for nonexistent tenders come back as HTTP 200 with an
    /// identifier of 0 (or no name) and an embedded message object. This is
    /// a data condition, not an error.
    pub fn is_not_found(&self) -> bool {
        self.michraz_id == 0 || self.michraz_name.is_none()
    }
}
