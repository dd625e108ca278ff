// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Canned candidates and records shaped like real capture-service responses

use af_domain_types::{AddressRecord, Candidate};

/// Id of the first address in [`abbey_road_candidates`]
pub const FIRST_ADDRESS_ID: &str = "GB|RM|A|21415581";
/// Id of the street container at the end of [`abbey_road_candidates`]
pub const ABBEY_ROAD_STREET_ID: &str = "GB|RM|ENG|8JH-ABBEY_ROAD";

const STREET_DESCRIPTION: &str = "London, NW8 9AY";

/// Ten top-level results: nine addresses followed by one street container.
pub fn abbey_road_candidates() -> Vec<Candidate> {
    let mut items: Vec<Candidate> = [
        (FIRST_ADDRESS_ID, "1 Abbey Road"),
        ("GB|RM|A|21415582", "2 Abbey Road"),
        ("GB|RM|A|21415583", "3 Abbey Road"),
        ("GB|RM|A|21415584", "Flat 1, 5 Abbey Road"),
        ("GB|RM|A|21415585", "Flat 2, 5 Abbey Road"),
        ("GB|RM|A|21415586", "7 Abbey Road"),
        ("GB|RM|A|21415587", "Abbey Road Studios, 3 Abbey Road"),
        ("GB|RM|A|21415588", "9 Abbey Road"),
        ("GB|RM|A|21415589", "11 Abbey Road"),
    ]
    .into_iter()
    .map(|(id, text)| Candidate::new(id, text, STREET_DESCRIPTION, "Address").with_highlight("0-1"))
    .collect();

    items.push(
        Candidate::new(
            ABBEY_ROAD_STREET_ID,
            "Abbey Road",
            "London - 24 Addresses",
            "Street",
        )
        .with_highlight("0-1"),
    );
    items
}

/// Addresses inside the Abbey Road street container.
pub fn abbey_road_street_children() -> Vec<Candidate> {
    [
        ("GB|RM|A|21415590", "13 Abbey Road"),
        ("GB|RM|A|21415591", "15 Abbey Road"),
        ("GB|RM|A|21415592", "17 Abbey Road"),
    ]
    .into_iter()
    .map(|(id, text)| Candidate::new(id, text, STREET_DESCRIPTION, "Address"))
    .collect()
}

/// The single result served by the alternate `https://foo.bar` endpoint.
pub fn baz_candidates() -> Vec<Candidate> {
    vec![Candidate::new("baz", "Baz", "Foo Town", "Address")]
}

/// Build a plausible full record for an address id.
pub fn record_for(id: &str, line1: &str) -> AddressRecord {
    AddressRecord {
        id: id.to_string(),
        domestic_id: Some(id.rsplit('|').next().unwrap_or(id).to_string()),
        language: Some("ENG".to_string()),
        street: Some("Abbey Road".to_string()),
        city: Some("London".to_string()),
        province: Some("Greater London".to_string()),
        postal_code: Some("NW8 9AY".to_string()),
        country_name: Some("United Kingdom".to_string()),
        country_iso2: Some("GB".to_string()),
        country_iso3: Some("GBR".to_string()),
        line1: Some(line1.to_string()),
        label: Some(format!("{line1}\nLONDON\nNW8 9AY\nUNITED KINGDOM")),
        ..AddressRecord::default()
    }
}
