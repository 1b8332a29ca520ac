//! METS, MODS, PREMIS and XLink names used by the parser.

use crate::xml::Name;

pub const METS_NS: &str = "http://www.loc.gov/METS/";
pub const MODS_NS: &str = "http://www.loc.gov/mods/v3";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const PREMIS_V3_NS: &str = "http://www.loc.gov/premis/v3";
pub const PREMIS_V2_NS: &str = "info:lc/xmlns/premis-v2";

const METS: &[&str] = &[METS_NS];
const MODS: &[&str] = &[MODS_NS];
const XLINK: &[&str] = &[XLINK_NS];
const PREMIS: &[&str] = &[PREMIS_V3_NS, PREMIS_V2_NS];

const fn mets(local: &'static str) -> Name {
    Name { namespaces: METS, local }
}

const fn mods(local: &'static str) -> Name {
    Name { namespaces: MODS, local }
}

const fn premis(local: &'static str) -> Name {
    Name { namespaces: PREMIS, local }
}

pub const METS_STRUCT_MAP: Name = mets("structMap");
pub const METS_DIV: Name = mets("div");
pub const METS_FPTR: Name = mets("fptr");
pub const METS_FILE: Name = mets("file");
pub const METS_FLOCAT: Name = mets("FLocat");
pub const METS_AMD_SEC: Name = mets("amdSec");
pub const METS_TECH_MD: Name = mets("techMD");
pub const METS_DIGIPROV_MD: Name = mets("digiprovMD");
pub const METS_AGENT: Name = mets("agent");
pub const METS_NAME: Name = mets("name");

pub const MODS_MODS: Name = mods("mods");
pub const MODS_TITLE: Name = mods("title");
pub const MODS_NAME: Name = mods("name");
pub const MODS_ACCESS_CONDITION: Name = mods("accessCondition");

pub const XLINK_HREF: Name = Name {
    namespaces: XLINK,
    local: "href",
};

pub const PREMIS_FIXITY: Name = premis("fixity");
pub const PREMIS_MESSAGE_DIGEST_ALGORITHM: Name = premis("messageDigestAlgorithm");
pub const PREMIS_MESSAGE_DIGEST: Name = premis("messageDigest");
pub const PREMIS_SIZE: Name = premis("size");
pub const PREMIS_FORMAT: Name = premis("format");
pub const PREMIS_FORMAT_NAME: Name = premis("formatName");
pub const PREMIS_FORMAT_REGISTRY_KEY: Name = premis("formatRegistryKey");
pub const PREMIS_ORIGINAL_NAME: Name = premis("originalName");
pub const PREMIS_CONTENT_LOCATION: Name = premis("contentLocation");
pub const PREMIS_CONTENT_LOCATION_VALUE: Name = premis("contentLocationValue");
pub const PREMIS_EVENT: Name = premis("event");
pub const PREMIS_EVENT_DATE_TIME: Name = premis("eventDateTime");
pub const PREMIS_EVENT_OUTCOME_INFORMATION: Name = premis("eventOutcomeInformation");
pub const PREMIS_EVENT_OUTCOME: Name = premis("eventOutcome");
pub const PREMIS_EVENT_OUTCOME_DETAIL: Name = premis("eventOutcomeDetail");
pub const PREMIS_EVENT_OUTCOME_DETAIL_NOTE: Name = premis("eventOutcomeDetailNote");
pub const PREMIS_EVENT_DETAIL_INFORMATION: Name = premis("eventDetailInformation");
pub const PREMIS_EVENT_DETAIL: Name = premis("eventDetail");

/// `mods:accessCondition/@type` values.
pub const RESTRICTION_ON_ACCESS: &str = "restriction on access";
pub const ACCESS_STATUS: &str = "status";
pub const USE_AND_REPRODUCTION: &str = "use and reproduction";
