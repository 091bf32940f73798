//! Static reference catalogs for the Israeli Land Authority dataset.
//!
//! The catalogs are process-wide, read-only, and baked into the binary;
//! they are exposed only through accessor functions and never mutated.
//! The ids are the stable filter keys the upstream search form expects.

use serde::Serialize;

/// One entry of a reference catalog (tender type, region, land use,
/// status, or priority population).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub id: i64,
    pub name_hebrew: &'static str,
    pub name_english: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

const fn entry(id: i64, name_hebrew: &'static str, name_english: &'static str) -> ReferenceEntry {
    ReferenceEntry {
        id,
        name_hebrew,
        name_english,
        description: None,
    }
}

/// A populated place with its government-assigned Kod Yeshuv code.
///
/// Codes are unique; Hebrew names are not guaranteed unique since several
/// settlements may legitimately share spelling variants.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Settlement {
    pub kod_yeshuv: i64,
    pub name_hebrew: &'static str,
}

const fn settlement(kod_yeshuv: i64, name_hebrew: &'static str) -> Settlement {
    Settlement {
        kod_yeshuv,
        name_hebrew,
    }
}

static TENDER_TYPES: &[ReferenceEntry] = &[
    entry(1, "מכרז פומבי רגיל", "Regular Public Tender"),
    entry(2, "מחיר מטרה", "Target Price"),
    entry(3, "דיור במחיר מופחת", "Reduced Price Housing"),
    entry(4, "מכרז ייזום", "Initiative Tender"),
    entry(5, "מכרז למגרש בלתי מסוים", "Unspecified Plot Tender"),
    entry(6, "הרשמה והגרלה", "Registration and Lottery"),
    entry(7, "דיור להשכרה", "Rental Housing"),
    entry(8, "מכרזי עמידר", "Amidar Tenders"),
    entry(9, "מכרזי החברה לפיתוח עכו", "Acre Development Company Tenders"),
];

static REGIONS: &[ReferenceEntry] = &[
    entry(1, "יו\"ש", "Judea and Samaria"),
    entry(2, "דרום", "South"),
    entry(3, "חיפה", "Haifa"),
    entry(4, "תל אביב", "Tel Aviv"),
    entry(5, "ירושלים", "Jerusalem"),
    entry(6, "מרכז", "Center"),
];

static LAND_USES: &[ReferenceEntry] = &[
    entry(1, "בנייה נמוכה/צמודת קרקע", "Low-rise/Ground-attached Construction"),
    entry(2, "בנייה רוויה", "High-density Construction"),
    entry(3, "מסחר ו/או משרדים", "Commerce and/or Offices"),
    entry(4, "מלונאות", "Hotels"),
    entry(5, "מוסדות ו/או בניינים ציבוריים", "Institutions and/or Public Buildings"),
    entry(6, "ספורט ו/או נופש ו/או תיירות ו/או מלונאות", "Sports/Recreation/Tourism/Hotels"),
    entry(7, "מגורים ו/או מסחר ו/או מלונאות ו/או נופש", "Residential/Commercial/Hotels/Recreation"),
    entry(8, "כרייה וחציבה", "Mining and Quarrying"),
    entry(9, "אחר", "Other"),
];

static TENDER_STATUSES: &[ReferenceEntry] = &[
    entry(1, "מפורסם", "Published"),
    entry(2, "בוטל", "Cancelled"),
    entry(3, "טרם הוכרזו זוכים", "Winners Not Yet Announced"),
];

// Id 5 is unassigned in the source data.
static PRIORITY_POPULATIONS: &[ReferenceEntry] = &[
    entry(1, "אנשים עם מוגבלות", "People with disabilities"),
    entry(2, "בני מקום - לא לשימוש", "Locals - not for use"),
    entry(3, "חסרי דיור", "Housing-deprived"),
    entry(4, "בני מיעוטים מומלצי כוחות הביטחון", "Minorities recommended by security forces"),
    entry(6, "חיילי מילואים", "Reserve soldiers"),
    entry(7, "חיילי מילואים לוחמים", "Combat reserve soldiers"),
    entry(8, "חיילי מילואים לוחמים בני מקום תושבי היישוב", "Combat reserves - local settlement residents"),
    entry(9, "חיילי מילואים פעילים בני מקום תושבי היישוב", "Active reserves - local settlement residents"),
    entry(10, "חיילי מילואים לוחמים בני מקום תושבי המועצה", "Combat reserves - local council residents"),
    entry(11, "חיילי מילואים לוחמים בני מקום", "Combat reserves - locals"),
    entry(12, "חיילי מילואים פעילים בני מקום תושבי המועצה", "Active reserves - local council residents"),
    entry(13, "חיילי מילואים פעילים בני מקום", "Active reserves - locals"),
    entry(14, "בני מקום תושבי היישוב", "Local settlement residents"),
    entry(15, "בני מקום תושבי המועצה", "Local council residents"),
    entry(16, "בני מקום", "Locals"),
];

// Kod Yeshuv table, ordered by insertion order of the source data.
// Lookups scan linearly; first entry wins on duplicate names.
static SETTLEMENTS: &[Settlement] = &[
    settlement(3000, "ירושלים"),
    settlement(5000, "תל אביב"),
    settlement(4000, "חיפה"),
    settlement(9000, "באר שבע"),
    settlement(8300, "ראשון לציון"),
    settlement(7900, "פתח תקווה"),
    settlement(70, "אשדוד"),
    settlement(7400, "נתניה"),
    settlement(6100, "בני ברק"),
    settlement(6600, "חולון"),
    settlement(8600, "רמת גן"),
    settlement(7100, "אשקלון"),
    settlement(8400, "רחובות"),
    settlement(6200, "בת ים"),
    settlement(2610, "בית שמש"),
    settlement(6900, "כפר סבא"),
    settlement(6400, "הרצליה"),
    settlement(6500, "חדרה"),
    settlement(1200, "מודיעין-מכבים-רעות"),
    settlement(7300, "נצרת"),
    settlement(7000, "לוד"),
    settlement(8500, "רמלה"),
    settlement(8700, "רעננה"),
    settlement(3797, "מודיעין עילית"),
    settlement(1161, "רהט"),
    settlement(9700, "הוד השרון"),
    settlement(6300, "גבעתיים"),
    settlement(6800, "קריית אתא"),
    settlement(9100, "נהריה"),
    settlement(3780, "ביתר עילית"),
    settlement(2630, "קריית גת"),
    settlement(2710, "אום אל-פחם"),
    settlement(2600, "אילת"),
    settlement(2640, "ראש העין"),
    settlement(7600, "עכו"),
    settlement(1309, "אלעד"),
    settlement(6700, "טבריה"),
    settlement(8200, "קריית מוצקין"),
    settlement(8000, "צפת"),
    settlement(1139, "כרמיאל"),
    settlement(2620, "קריית אונו"),
    settlement(9500, "קריית ביאליק"),
    settlement(2720, "טירה"),
    settlement(2660, "יבנה"),
    settlement(7200, "נס ציונה"),
    settlement(7700, "עפולה"),
    settlement(2200, "דימונה"),
    settlement(2730, "טייבה"),
    settlement(9600, "קריית ים"),
    settlement(2560, "ערד"),
    settlement(2500, "נשר"),
    settlement(1031, "שדרות"),
    settlement(246, "נתיבות"),
    settlement(831, "גבעת שמואל"),
    settlement(9400, "יהוד-מונוסון"),
    settlement(168, "אופקים"),
    settlement(29, "אור יהודה"),
    settlement(2400, "עראבה"),
    settlement(8800, "קריית שמונה"),
    settlement(2800, "טירת כרמל"),
];

pub fn tender_types() -> &'static [ReferenceEntry] {
    TENDER_TYPES
}

pub fn regions() -> &'static [ReferenceEntry] {
    REGIONS
}

pub fn land_uses() -> &'static [ReferenceEntry] {
    LAND_USES
}

pub fn tender_statuses() -> &'static [ReferenceEntry] {
    TENDER_STATUSES
}

pub fn priority_populations() -> &'static [ReferenceEntry] {
    PRIORITY_POPULATIONS
}

pub fn settlements() -> &'static [Settlement] {
    SETTLEMENTS
}
