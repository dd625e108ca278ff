// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Normalized address records handed to the host on selection

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full address record as returned by a retrieve call
///
/// Field names follow the service's PascalCase wire names so records can be
/// round-tripped to the host unchanged. Fields the widget does not model are
/// kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domestic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_building: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_iso2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_iso3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AddressRecord {
    /// Non-empty address lines in order.
    pub fn lines(&self) -> Vec<&str> {
        [
            &self.line1,
            &self.line2,
            &self.line3,
            &self.line4,
            &self.line5,
        ]
        .into_iter()
        .filter_map(|line| line.as_deref())
        .filter(|line| !line.trim().is_empty())
        .collect()
    }

    /// Single-line summary: the service label if present, otherwise the
    /// address lines followed by city and postal code.
    pub fn summary(&self) -> String {
        if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
            return label.replace('\n', ", ");
        }
        let mut parts: Vec<&str> = self.lines();
        parts.extend(self.city.as_deref());
        parts.extend(self.postal_code.as_deref());
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_names_and_keeps_unknown_fields() {
        let json = serde_json::json!({
            "Id": "GB|RM|A|21415581",
            "Line1": "1 High Street",
            "Line2": "",
            "City": "London",
            "PostalCode": "E1 6AZ",
            "CountryIso2": "GB",
            "DataLevel": "Premise"
        });
        let record: AddressRecord = serde_json::from_value(json).expect("record");
        assert_eq!(record.id, "GB|RM|A|21415581");
        assert_eq!(record.lines(), vec!["1 High Street"]);
        assert_eq!(record.country_iso2.as_deref(), Some("GB"));
        assert_eq!(
            record.extra.get("DataLevel"),
            Some(&serde_json::Value::String("Premise".into()))
        );
        assert_eq!(record.summary(), "1 High Street, London, E1 6AZ");
    }

    #[test]
    fn summary_prefers_label() {
        let record = AddressRecord {
            id: "x".into(),
            label: Some("1 High Street\nLondon\nE1 6AZ".into()),
            ..Default::default()
        };
        assert_eq!(record.summary(), "1 High Street, London, E1 6AZ");
    }
}
