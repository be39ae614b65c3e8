//! Geolocation information returned by the SeeIP geolocation endpoint.

use crate::error::Error;

use serde::Deserialize;

/// The geolocation information that the SeeIP geolocation endpoint associates
/// with the public IP of the machine.
///
/// The fields mirror the keys of the JSON object returned by the service.
/// Fields absent from the response take the zero value of their type; fields
/// present with a mismatched type make the whole parsing fail.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeoInformation {
    /// The public IP address the information refers to.
    pub ip: String,
    /// Two-letter continent code (e.g. "EU").
    pub continent_code: String,
    /// Country name.
    pub country: String,
    /// Two-letter country code (ISO 3166-1 alpha-2).
    pub country_code: String,
    /// Three-letter country code (ISO 3166-1 alpha-3).
    pub country_code3: String,
    /// Region or state name.
    pub region: String,
    /// Region or state code.
    pub region_code: String,
    /// City name.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Latitude in decimal degrees.
    pub latitude: f32,
    /// Longitude in decimal degrees.
    pub longitude: f32,
    /// Time zone name (e.g. "Europe/Madrid").
    pub timezone: String,
    /// Offset from UTC in seconds.
    pub offset: i32,
    /// Autonomous system number announcing the IP.
    pub asn: u32,
    /// Name of the organization that the autonomous system belongs to.
    pub organization: String,
}

/// Parses the body returned by the geolocation endpoint.
///
/// A body holding the JSON `null` value, and any body the deserializer
/// rejects, return an [`ErrorKind::NoGeoInfo`](crate::ErrorKind::NoGeoInfo)
/// error; the rejected case nests the deserializer error as the source.
pub(crate) fn parse(json: &str) -> Result<GeoInformation, Error> {
    match serde_json::from_str::<Option<GeoInformation>>(json) {
        Ok(Some(info)) => Ok(info),
        Ok(None) => Err(Error::no_geo_info(None)),
        Err(err) => Err(Error::no_geo_info(Some(err.into()))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    use std::error::Error as StdError;

    #[test]
    fn test_parse_all_fields() {
        let json = r#"{
            "ip": "203.0.113.7",
            "continent_code": "NA",
            "country": "United States",
            "country_code": "US",
            "country_code3": "USA",
            "region": "California",
            "region_code": "CA",
            "city": "San Francisco",
            "postal_code": "94107",
            "latitude": 37.5,
            "longitude": -122.25,
            "timezone": "America/Los_Angeles",
            "offset": -28800,
            "asn": 14061,
            "organization": "Example Cloud Inc."
        }"#;

        let info = parse(json).expect("well formed JSON must parse");
        assert_eq!(info.ip, "203.0.113.7", "ip");
        assert_eq!(info.continent_code, "NA", "continent_code");
        assert_eq!(info.country, "United States", "country");
        assert_eq!(info.country_code, "US", "country_code");
        assert_eq!(info.country_code3, "USA", "country_code3");
        assert_eq!(info.region, "California", "region");
        assert_eq!(info.region_code, "CA", "region_code");
        assert_eq!(info.city, "San Francisco", "city");
        assert_eq!(info.postal_code, "94107", "postal_code");
        assert_eq!(info.latitude, 37.5, "latitude");
        assert_eq!(info.longitude, -122.25, "longitude");
        assert_eq!(info.timezone, "America/Los_Angeles", "timezone");
        assert_eq!(info.offset, -28800, "offset");
        assert_eq!(info.asn, 14061, "asn");
        assert_eq!(info.organization, "Example Cloud Inc.", "organization");
    }

    #[test]
    fn test_parse_absent_fields_take_zero_values() {
        let info = parse("{}").expect("empty object must parse");
        assert_eq!(info, GeoInformation::default(), "all fields zero valued");

        let info = parse(r#"{"ip": "203.0.113.7"}"#).expect("partial object must parse");
        assert_eq!(info.ip, "203.0.113.7", "present field");
        assert_eq!(info.country, "", "absent text field");
        assert_eq!(info.latitude, 0.0, "absent float field");
        assert_eq!(info.offset, 0, "absent integer field");
    }

    #[test]
    fn test_parse_null() {
        let err = parse("null").expect_err("JSON null must not yield a value");
        assert_eq!(err.kind(), ErrorKind::NoGeoInfo, "kind");
        assert!(err.source().is_none(), "a legitimate null has no cause");
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse("{not json").expect_err("malformed JSON must fail");
        assert_eq!(err.kind(), ErrorKind::NoGeoInfo, "kind");
        assert!(
            err.source().is_some(),
            "the deserializer error must be nested"
        );
    }

    #[test]
    fn test_parse_mismatched_field_type() {
        let err = parse(r#"{"latitude": "37.5"}"#)
            .expect_err("a field with a mismatched type must fail");
        assert_eq!(err.kind(), ErrorKind::NoGeoInfo, "kind");
        assert!(
            err.source().is_some(),
            "the deserializer error must be nested"
        );
    }
}
