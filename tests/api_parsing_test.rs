use gleif::api::reference::{normalize_item, ReferenceType};
use gleif::api::search::normalize_record;
use gleif::api::types::Document;
use gleif::error::GleifError;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Abridged copy of a live `lei-records` page
const LEI_PAGE: &str = r#"{
    "meta": {
        "goldenCopy": {"publishDate": "2024-05-02T08:00:00Z"},
        "pagination": {"currentPage": 1, "perPage": 100, "from": 1, "to": 2, "total": 2, "lastPage": 1}
    },
    "links": {
        "first": "https://api.gleif.org/api/v1/lei-records?filter%5Bentity.legalName%5D=Citibank&page%5Bnumber%5D=1&page%5Bsize%5D=100",
        "last": "https://api.gleif.org/api/v1/lei-records?filter%5Bentity.legalName%5D=Citibank&page%5Bnumber%5D=1&page%5Bsize%5D=100"
    },
    "data": [
        {
            "type": "lei-records",
            "id": "E57ODZWZ7FF32TWEFA76",
            "attributes": {
                "lei": "E57ODZWZ7FF32TWEFA76",
                "entity": {
                    "legalName": {"name": "CITIBANK, N.A.", "language": "en"},
                    "otherNames": [],
                    "legalAddress": {
                        "language": "en",
                        "addressLines": ["5800 SOUTH CORPORATE PLACE"],
                        "addressNumber": null,
                        "addressNumberWithinBuilding": null,
                        "mailRouting": null,
                        "city": "SIOUX FALLS",
                        "region": "US-SD",
                        "country": "US",
                        "postalCode": "57108"
                    },
                    "jurisdiction": "US",
                    "category": "GENERAL",
                    "status": "ACTIVE"
                },
                "registration": {
                    "initialRegistrationDate": "2012-06-06T15:53:00Z",
                    "status": "ISSUED",
                    "managingLou": "5493001KJTIIGC8Y1R12"
                },
                "bic": ["CITIUS33XXX"]
            },
            "relationships": {
                "managing-lou": {"links": {"related": "https://api.gleif.org/api/v1/lei-records/E57ODZWZ7FF32TWEFA76/managing-lou"}},
                "isins": {"links": {"related": "https://api.gleif.org/api/v1/lei-records/E57ODZWZ7FF32TWEFA76/isins"}}
            }
        },
        {
            "type": "lei-records",
            "id": "N1FBEDJ5J41VKZLO2475",
            "attributes": {
                "lei": "N1FBEDJ5J41VKZLO2475",
                "entity": {
                    "legalName": {"name": "CITIBANK EUROPE PUBLIC LIMITED COMPANY", "language": "en"},
                    "legalAddress": {
                        "language": "en",
                        "addressLines": ["1 North Wall Quay", "Dublin 1"],
                        "city": "Dublin",
                        "region": null,
                        "country": "IE",
                        "postalCode": "D01 T8Y1"
                    },
                    "jurisdiction": null
                },
                "registration": {"status": "ISSUED", "jurisdiction": "IE"},
                "bic": null
            },
            "relationships": {}
        }
    ]
}"#;

#[test]
fn test_document_pagination_metadata() {
    let document: Document = serde_json::from_str(LEI_PAGE).unwrap();

    assert_eq!(document.data.len(), 2);
    assert_eq!(document.meta.pagination.current_page, Some(1));
    assert_eq!(document.meta.pagination.last_page, Some(1));
    assert_eq!(document.meta.pagination.total, Some(2));
    assert!(document.links.next.is_none());
    assert!(document.data[0].has_relationship("isins"));
    assert!(!document.data[1].has_relationship("isins"));
}

#[test]
fn test_normalize_full_record() {
    let document: Document = serde_json::from_str(LEI_PAGE).unwrap();
    let record = normalize_record(&document.data[0]).unwrap();

    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "legal_entity_id": "E57ODZWZ7FF32TWEFA76",
            "legal_entity_name": {"name": "CITIBANK, N.A.", "language": "en"},
            "region": "US-SD",
            "country": "US",
            "country_of_jurisdiction": "US",
            "address": {
                "street": "5800 SOUTH CORPORATE PLACE",
                "city": "SIOUX FALLS",
                "postal_code": "57108",
                "country": "US"
            },
            "tickers_and_instruments": [{"type": "BIC", "value": ["CITIUS33XXX"]}]
        })
    );
}

#[test]
fn test_normalize_record_without_optional_fields() {
    let document: Document = serde_json::from_str(LEI_PAGE).unwrap();
    let record = normalize_record(&document.data[1]).unwrap();

    assert_eq!(record.region, None);
    assert_eq!(record.country.as_deref(), Some("IE"));
    // Entity jurisdiction is null, so the registration's is used
    assert_eq!(record.country_of_jurisdiction.as_deref(), Some("IE"));
    assert_eq!(record.tickers_and_instruments, None);

    let address = record.address.unwrap();
    assert_eq!(address.street.as_deref(), Some("1 North Wall Quay"));
    assert_eq!(address.additional.as_deref(), Some("Dublin 1"));

    let value = serde_json::to_value(normalize_record(&document.data[1]).unwrap()).unwrap();
    assert!(value.get("tickers_and_instruments").is_none());
    assert_eq!(value["region"], serde_json::Value::Null);
}

#[test]
fn test_jurisdiction_falls_back_to_address_country() {
    let document: Document = serde_json::from_value(json!({
        "data": [{
            "type": "lei-records",
            "id": "5493001KJTIIGC8Y1R12",
            "attributes": {
                "lei": "5493001KJTIIGC8Y1R12",
                "entity": {
                    "legalName": {"name": "Bloomberg Finance L.P."},
                    "legalAddress": {"country": "US", "addressLines": []}
                },
                "registration": {}
            }
        }]
    }))
    .unwrap();

    let record = normalize_record(&document.data[0]).unwrap();
    assert_eq!(record.country_of_jurisdiction.as_deref(), Some("US"));
    assert_eq!(record.legal_entity_name.language, None);
}

#[test]
fn test_bic_as_single_string() {
    let document: Document = serde_json::from_value(json!({
        "data": [{
            "id": "X",
            "attributes": {
                "lei": "LEI00000000000000001",
                "entity": {"legalName": {"name": "Example Bank"}},
                "bic": "EXMPGB2L"
            }
        }]
    }))
    .unwrap();

    let record = serde_json::to_value(normalize_record(&document.data[0]).unwrap()).unwrap();
    assert_eq!(
        record["tickers_and_instruments"],
        json!([{"type": "BIC", "value": ["EXMPGB2L"]}])
    );
}

#[test]
fn test_record_without_legal_name_is_malformed() {
    let document: Document = serde_json::from_value(json!({
        "data": [{
            "id": "LEI00000000000000001",
            "attributes": {"lei": "LEI00000000000000001", "entity": {"legalName": {"name": "  "}}}
        }]
    }))
    .unwrap();

    let err = normalize_record(&document.data[0]).unwrap_err();
    assert!(matches!(err, GleifError::MalformedResponse(ref msg) if msg.contains("LEI00000000000000001")));
}

#[test]
fn test_record_without_lei_is_malformed() {
    let document: Document = serde_json::from_value(json!({
        "data": [{"id": "x", "attributes": {"entity": {"legalName": {"name": "Nameless"}}}}]
    }))
    .unwrap();

    assert!(matches!(
        normalize_record(&document.data[0]),
        Err(GleifError::MalformedResponse(_))
    ));
}

#[test]
fn test_reference_items_keep_attributes_verbatim() {
    let document: Document = serde_json::from_value(json!({
        "meta": {"pagination": {"currentPage": 1, "lastPage": 1}},
        "data": [{
            "type": "entity-legal-forms",
            "id": "8888",
            "attributes": {
                "code": "8888",
                "country": "Any",
                "countryCode": null,
                "names": [{"localName": "Other", "language": "English", "languageCode": "en"}]
            }
        }]
    }))
    .unwrap();

    let item = normalize_item(ReferenceType::EntityLegalForms, &document.data[0]).unwrap();
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        json!({
            "id": "8888",
            "code": "8888",
            "country": "Any",
            "countryCode": null,
            "names": [{"localName": "Other", "language": "English", "languageCode": "en"}]
        })
    );
}

#[test]
fn test_reference_item_without_id_is_malformed() {
    let document: Document = serde_json::from_value(json!({
        "data": [{"type": "countries", "attributes": {"code": "AD", "name": "Andorra"}}]
    }))
    .unwrap();

    assert!(matches!(
        normalize_item(ReferenceType::Countries, &document.data[0]),
        Err(GleifError::MalformedResponse(_))
    ));
}
