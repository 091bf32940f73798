// Upstream API
pub const BASE_URL: &str = "https://apps.land.gov.il/MichrazimSite/api";
pub const SEARCH_PATH: &str = "SearchApi/Search";
pub const DETAILS_PATH: &str = "MichrazDetailsApi/Get";
pub const MAP_DETAILS_PATH: &str = "MichrazDetailsApi/GetMichrazMapaDetails";

// Required headers; upstream rejects requests missing them
pub const USER_AGENT: &str = "datagov-external-client";
pub const ORIGIN: &str = "https://apps.land.gov.il";
pub const REFERER: &str = "https://apps.land.gov.il/MichrazimSite/";

// Date format used by the upstream search form (dd/mm/yy)
pub const DATE_FORMAT: &str = "%d/%m/%y";

// Upstream returns at most this many records per call
pub const MAX_UPSTREAM_RESULTS: usize = 10_000;

// Settlement lookup returns at most this many partial matches
pub const PARTIAL_MATCH_LIMIT: usize = 10;

// Largest client-side page size the search tool will slice to
pub const MAX_TOOL_PAGE_SIZE: usize = 1_000;
