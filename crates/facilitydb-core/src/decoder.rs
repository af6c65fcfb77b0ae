// crates/facilitydb-core/src/decoder.rs

//! Decodes one raw snapshot line into a validated [`Facility`].
//!
//! The snapshot carries flattened, mostly upper-cased government source data.
//! Decoding validates the required properties, resolves the classification
//! enums, reformats the shoutier strings, and computes the geohash for the
//! facility's point at full precision.

use crate::error::DecodeError;
use crate::geohash::{self, GEOHASH_PRECISION};
use crate::model::{
    Facility, FacilityAddress, FacilityCapabilities, FacilityContact, FacilityGovernance,
    FacilityLocation, FacilityType, GeoPoint, TraumaCapability, TraumaType,
};
use serde::Deserialize;
use url::Url;

/// Raw flattened facility line as shipped in the snapshot. Unknown fields are
/// ignored; every property is optional at this stage so that validation can
/// produce a precise error instead of a deserializer failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFacility {
    latitude: Option<f64>,
    longitude: Option<f64>,
    state: Option<String>,
    city: Option<String>,
    name: Option<String>,
    object_id: Option<String>,
    row_id: Option<String>,
    address: Option<String>,
    zip: Option<String>,
    telephone: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    status: Option<String>,
    open: Option<bool>,
    county: Option<String>,
    country: Option<String>,
    naics_code: Option<String>,
    naics_desc: Option<String>,
    website: Option<String>,
    alt_name: Option<String>,
    owner_type: Option<String>,
    beds: Option<i64>,
    trauma1: Option<String>,
    trauma2: Option<String>,
    helipad: Option<bool>,
}

/// Decodes a single JSON-ND line into a facility entity.
pub fn decode_line(line: &str) -> Result<Facility, DecodeError> {
    let raw: RawFacility = serde_json::from_str(line)?;
    raw.export()
}

/// Returns the value if present and (for strings) non-blank.
fn check<'a>(value: &'a Option<String>, label: &'static str) -> Result<&'a str, DecodeError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DecodeError::MissingField(label)),
    }
}

/// Re-formats an all-caps source string into title case, preserving the
/// source's `" And "` → `" & "` rewrite.
fn prettify(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let pretty: Vec<String> = trimmed
        .split(' ')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first, chars.as_str().to_lowercase()),
                None => String::new(),
            }
        })
        .collect();
    pretty.join(" ").replace(" And ", " & ")
}

fn resolve_type(value: &str) -> Result<FacilityType, DecodeError> {
    let resolved = match value.trim().to_uppercase().as_str() {
        "GENERAL ACUTE CARE" => FacilityType::GeneralAcuteCare,
        "CRITICAL ACCESS" => FacilityType::CriticalAccess,
        "PSYCHIATRIC" => FacilityType::Psychiatric,
        "LONG TERM CARE" => FacilityType::LongTermCare,
        "REHABILITATION" => FacilityType::Rehabilitation,
        "MILITARY" => FacilityType::Military,
        "CHILDREN" => FacilityType::Children,
        "SPECIAL" => FacilityType::Special,
        "WOMEN" => FacilityType::Women,
        "CHRONIC DISEASE" => FacilityType::ChronicDisease,
        _ => return Err(DecodeError::UnknownType(value.trim().to_string())),
    };
    Ok(resolved)
}

fn resolve_governance(value: &str) -> FacilityGovernance {
    match value.trim().to_uppercase().as_str() {
        "GOVERNMENT" => FacilityGovernance::Government,
        "NON-PROFIT" => FacilityGovernance::NonProfit,
        "PROPRIETARY" => FacilityGovernance::Private,
        _ => FacilityGovernance::Unknown,
    }
}

/// Resolves a trauma designation. "NOT DESIGNATED" and "UNCLASSIFIED" map to
/// no capability; anything else unrecognized is a decode error.
fn resolve_trauma(value: &str) -> Result<Option<TraumaCapability>, DecodeError> {
    let upper = value.trim().to_uppercase();
    let level = match upper.replace(" PEDIATRIC", "").as_str() {
        "LEVEL I" => TraumaType::Level1,
        "LEVEL II" => TraumaType::Level2,
        "LEVEL III" => TraumaType::Level3,
        "LEVEL IV" => TraumaType::Level4,
        "LEVEL V" => TraumaType::Level5,
        "TRH" => TraumaType::Trh,
        "TRF" => TraumaType::Trf,
        "CTH" => TraumaType::Cth,
        "ATH" => TraumaType::Ath,
        "TRAUMA SYSTEM HOSPITAL" => TraumaType::TraumaSystemHospital,
        "RTC" => TraumaType::Rtc,
        "RTH" => TraumaType::Rth,
        "AREA" => TraumaType::Area,
        "CTF" => TraumaType::Ctf,
        "PARC" => TraumaType::Parc,
        "RPTC" => TraumaType::Rptc,
        "NOT DESIGNATED" | "UNCLASSIFIED" => return Ok(None),
        _ => return Err(DecodeError::UnknownTrauma(value.trim().to_string())),
    };
    Ok(Some(TraumaCapability {
        level,
        pediatric: upper.contains("PEDIATRIC"),
    }))
}

/// Returns the website as a parseable URL, trying an `http://` prefix for
/// bare hostnames. Unparseable values are skipped with a warning.
fn normalize_website(website: &str) -> Option<String> {
    if Url::parse(website).is_ok() {
        return Some(website.to_string());
    }
    let prefixed = format!("http://{website}");
    if Url::parse(&prefixed).is_ok() {
        Some(prefixed)
    } else {
        tracing::warn!(url = %website, "failed to decode string as URL, skipping value");
        None
    }
}

impl RawFacility {
    /// Validates and exports this raw line as a domain [`Facility`].
    fn export(self) -> Result<Facility, DecodeError> {
        let id = check(&self.row_id, "row ID")?.to_string();
        let object_id = check(&self.object_id, "object ID")?.to_string();
        let name = prettify(check(&self.name, "name")?);

        let mut alternate_names = Vec::new();
        if let Some(alt) = self.alt_name.as_deref() {
            if !alt.trim().is_empty() {
                alternate_names.push(alt.to_string());
            }
        }

        let kind = resolve_type(check(&self.kind, "type")?)?;
        let open = self.open.unwrap_or(false)
            || self
                .status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("open"));
        let naics = check(&self.naics_code, "naicsCode")?.to_string();
        let category = prettify(check(&self.naics_desc, "naicsDesc")?);
        let governance = match self.owner_type.as_deref() {
            Some(v) if !v.trim().is_empty() => resolve_governance(v),
            _ => FacilityGovernance::Unknown,
        };

        let latitude = self.latitude.ok_or(DecodeError::MissingField("latitude"))?;
        let longitude = self
            .longitude
            .ok_or(DecodeError::MissingField("longitude"))?;
        let point = GeoPoint {
            latitude,
            longitude,
        };
        let hash = geohash::encode(point, GEOHASH_PRECISION);

        let country = check(&self.country, "country")?.to_uppercase();
        let state = if country == "US" || country == "USA" {
            check(&self.state, "US state")?.to_uppercase()
        } else {
            check(&self.state, "province/state")?.to_string()
        };
        let address = FacilityAddress {
            lines: prettify(check(&self.address, "address")?)
                .split('\n')
                .map(str::to_string)
                .collect(),
            city: prettify(check(&self.city, "city")?),
            county: self
                .county
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(prettify),
            state,
            postal_code: check(&self.zip, "zip")?.to_string(),
            country,
        };

        let mut contact = FacilityContact::default();
        if let Some(website) = self.website.as_deref() {
            if !website.trim().is_empty() {
                if let Some(url) = normalize_website(website.trim()) {
                    contact.websites.push(url);
                }
            }
        }
        if let Some(phone) = self.telephone.as_deref() {
            if !phone.trim().is_empty() {
                contact.phone = Some(phone.to_string());
            }
        }

        let mut capabilities = FacilityCapabilities {
            beds: self.beds.filter(|b| *b > 0).map(|b| b as u32),
            helipad: self.helipad.ok_or(DecodeError::MissingField("helipad"))?,
            trauma: Vec::new(),
            pediatric: false,
        };
        for designation in [self.trauma1.as_deref(), self.trauma2.as_deref()]
            .into_iter()
            .flatten()
        {
            if designation.trim().is_empty() {
                continue;
            }
            if let Some(capability) = resolve_trauma(designation)? {
                capabilities.trauma.push(capability);
            }
            if designation.to_lowercase().contains("pediatric") {
                capabilities.pediatric = true;
            }
        }

        Ok(Facility {
            id,
            object_id,
            name,
            alternate_names,
            kind,
            governance,
            naics,
            category,
            open,
            location: FacilityLocation {
                point,
                hash,
                address,
            },
            contact,
            capabilities,
        })
    }
}
