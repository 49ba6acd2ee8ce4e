//! SWIFT code DTOs

use serde::{Deserialize, Serialize};

use domain_directory::{BankRecord, CountryLookup, NewBankRecord, SwiftCodeLookup};

/// Body of `POST /v1/swift-codes`
///
/// Missing text fields deserialize as empty strings so that they are reported
/// by record validation rather than by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSwiftCodeRequest {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: Option<bool>,
    pub swift_code: String,
}

impl From<CreateSwiftCodeRequest> for NewBankRecord {
    fn from(request: CreateSwiftCodeRequest) -> Self {
        NewBankRecord {
            swift_code: request.swift_code,
            bank_name: request.bank_name,
            address: request.address,
            country_iso2: request.country_iso2,
            country_name: request.country_name,
            is_headquarter: request.is_headquarter,
        }
    }
}

/// Single code lookup
///
/// `branches` is present for headquarters only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftCodeResponse {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub is_headquarter: bool,
    pub swift_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<SwiftCodeEntry>>,
}

/// A record listed inside another response; carries no country name
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwiftCodeEntry {
    pub address: String,
    pub bank_name: String,
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub is_headquarter: bool,
    pub swift_code: String,
}

/// Country lookup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySwiftCodesResponse {
    #[serde(rename = "countryISO2")]
    pub country_iso2: String,
    pub country_name: String,
    pub swift_codes: Vec<SwiftCodeEntry>,
}

/// Confirmation of a create or delete
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl From<&BankRecord> for SwiftCodeEntry {
    fn from(record: &BankRecord) -> Self {
        Self {
            address: record.address().to_string(),
            bank_name: record.bank_name().to_string(),
            country_iso2: record.country_iso2().to_string(),
            is_headquarter: record.is_headquarter(),
            swift_code: record.swift_code().to_string(),
        }
    }
}

impl From<SwiftCodeLookup> for SwiftCodeResponse {
    fn from(lookup: SwiftCodeLookup) -> Self {
        let record = lookup.record;
        Self {
            address: record.address().to_string(),
            bank_name: record.bank_name().to_string(),
            country_iso2: record.country_iso2().to_string(),
            country_name: record.country_name().to_string(),
            is_headquarter: record.is_headquarter(),
            swift_code: record.swift_code().to_string(),
            branches: lookup
                .branches
                .map(|branches| branches.iter().map(SwiftCodeEntry::from).collect()),
        }
    }
}

impl From<CountryLookup> for CountrySwiftCodesResponse {
    fn from(lookup: CountryLookup) -> Self {
        Self {
            country_iso2: lookup.country_iso2.to_string(),
            country_name: lookup.country_name,
            swift_codes: lookup.records.iter().map(SwiftCodeEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(code: &str) -> BankRecord {
        BankRecord::create(NewBankRecord {
            swift_code: code.to_string(),
            bank_name: "Citibank".to_string(),
            address: "Senatorska 16".to_string(),
            country_iso2: "PL".to_string(),
            country_name: "Poland".to_string(),
            is_headquarter: None,
        })
        .unwrap()
    }

    #[test]
    fn test_branch_lookup_omits_branches_field() {
        let body = serde_json::to_value(SwiftCodeResponse::from(SwiftCodeLookup {
            record: record("CITIPLPP123"),
            branches: None,
        }))
        .unwrap();

        assert!(body.get("branches").is_none());
        assert_eq!(body["countryISO2"], "PL");
        assert_eq!(body["isHeadquarter"], false);
    }

    #[test]
    fn test_headquarter_lookup_lists_branches_without_country_name() {
        let body = serde_json::to_value(SwiftCodeResponse::from(SwiftCodeLookup {
            record: record("CITIPLPPXXX"),
            branches: Some(vec![record("CITIPLPP123")]),
        }))
        .unwrap();

        assert_eq!(body["countryName"], "POLAND");
        assert_eq!(
            body["branches"],
            json!([{
                "address": "SENATORSKA 16",
                "bankName": "CITIBANK",
                "countryISO2": "PL",
                "isHeadquarter": false,
                "swiftCode": "CITIPLPP123"
            }])
        );
    }

    #[test]
    fn test_headquarter_without_branches_serializes_empty_list() {
        let body = serde_json::to_value(SwiftCodeResponse::from(SwiftCodeLookup {
            record: record("CITIPLPPXXX"),
            branches: Some(vec![]),
        }))
        .unwrap();

        assert_eq!(body["branches"], json!([]));
    }

    #[test]
    fn test_create_request_defaults() {
        let request: CreateSwiftCodeRequest = serde_json::from_value(json!({
            "swiftCode": "CITIPLPPXXX",
            "bankName": "Citi",
            "countryISO2": "PL",
            "countryName": "Poland"
        }))
        .unwrap();

        assert_eq!(request.address, "");
        assert_eq!(request.is_headquarter, None);

        let request: CreateSwiftCodeRequest =
            serde_json::from_value(json!({ "isHeadquarter": null })).unwrap();
        assert_eq!(request.is_headquarter, None);
    }
}
