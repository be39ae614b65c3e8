//! Defines the error type returned by every operation of this crate.
//! A single type with a kind tag and an optional nested cause is used instead
//! of one type per failure, so callers always catch the same thing and walk
//! the `source()` chain when they need to know the specific reason.

use std::error as stderr;
use std::fmt;

/// Convenient type for making more concise wrapping the standard error trait
/// object into a Box.
pub type BoxError = Box<dyn stderr::Error + Send + Sync>;

/// The error type returned by all the operations of this crate.
///
/// The top-level operations of [`Client`](crate::Client) always return the
/// [`ErrorKind::Unknown`] kind wrapping the specific lower-level error, which
/// is reachable through [`std::error::Error::source`]. The string-to-address
/// conversion is the only operation that returns its specific kind
/// ([`ErrorKind::Parsing`]) directly.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

/// The kinds of errors that [`Error`] distinguishes.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The OS reports no usable network interface. Only returned when the
    /// caller did not ask to skip the availability check.
    NetworkUnavailable,
    /// A transport-level failure happened during the HTTP request (DNS,
    /// connection, TLS, timeout, non-decodable response body).
    BadWebRequest,
    /// The geolocation endpoint returned JSON that deserialized to no value.
    NoGeoInfo,
    /// An invalid IP version was selected. The version selector only has two
    /// variants and both are handled, so this kind cannot currently be
    /// returned; it remains part of the taxonomy that this crate promises.
    BadIpVersion,
    /// The string-to-address conversion received a string which is not a
    /// valid IP literal.
    Parsing,
    /// The wrapper that every top-level operation returns; the specific
    /// reason is nested as the error source.
    Unknown,
}

impl Error {
    /// The kind of this error. Inspect the [`std::error::Error::source`]
    /// chain for the specific reason when the kind is
    /// [`ErrorKind::Unknown`].
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Convenient constructor for the error returned when the OS reports
    /// that no network interface is usable.
    pub(crate) fn network_unavailable() -> Self {
        Self {
            kind: ErrorKind::NetworkUnavailable,
            source: None,
        }
    }

    /// Convenient constructor for wrapping a transport-level failure.
    pub(crate) fn bad_web_request(cause: BoxError) -> Self {
        Self {
            kind: ErrorKind::BadWebRequest,
            source: Some(cause),
        }
    }

    /// Convenient constructor for the error returned when the geolocation
    /// endpoint yields no value. `cause` is `None` for a legitimate JSON
    /// `null` and carries the deserializer error otherwise.
    pub(crate) fn no_geo_info(cause: Option<BoxError>) -> Self {
        Self {
            kind: ErrorKind::NoGeoInfo,
            source: cause,
        }
    }

    /// Convenient constructor for wrapping an IP literal parsing failure.
    pub(crate) fn parsing(cause: BoxError) -> Self {
        Self {
            kind: ErrorKind::Parsing,
            source: Some(cause),
        }
    }

    /// Convenient constructor for the wrapper returned by the top-level
    /// operations; `cause` is the specific lower-level error.
    pub(crate) fn unknown(cause: impl Into<BoxError>) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            source: Some(cause.into()),
        }
    }
}

impl stderr::Error for Error {
    fn source(&self) -> Option<&(dyn stderr::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn stderr::Error + 'static))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self.kind {
            ErrorKind::NetworkUnavailable => {
                write!(f, "the network connection is reported unavailable by the OS")
            }
            ErrorKind::BadWebRequest => {
                write!(f, "an error occurred while connecting to the API")
            }
            ErrorKind::NoGeoInfo => write!(
                f,
                "the API did not return any information regarding the physical location"
            ),
            ErrorKind::BadIpVersion => write!(f, "the selected IP version is invalid"),
            ErrorKind::Parsing => write!(f, "the string is not a valid IP address literal"),
            ErrorKind::Unknown => write!(f, "an unknown error occurred while fetching the IP"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::error::Error as StdError;

    #[test]
    fn test_kind_and_source() {
        let err = Error::network_unavailable();
        assert_eq!(err.kind(), ErrorKind::NetworkUnavailable, "kind");
        assert!(err.source().is_none(), "no nested cause");

        let err = Error::unknown(Error::network_unavailable());
        assert_eq!(err.kind(), ErrorKind::Unknown, "wrapper kind");
        let cause = err
            .source()
            .expect("wrapper must nest its cause")
            .downcast_ref::<Error>()
            .expect("nested cause must be this crate's error type");
        assert_eq!(cause.kind(), ErrorKind::NetworkUnavailable, "nested kind");
    }

    #[test]
    fn test_display_messages() {
        let cases = [
            (
                Error::network_unavailable(),
                "the network connection is reported unavailable by the OS",
            ),
            (
                Error::bad_web_request(BoxError::from("connection refused")),
                "an error occurred while connecting to the API",
            ),
            (
                Error::no_geo_info(None),
                "the API did not return any information regarding the physical location",
            ),
            (
                Error {
                    kind: ErrorKind::BadIpVersion,
                    source: None,
                },
                "the selected IP version is invalid",
            ),
            (
                Error::parsing(BoxError::from("invalid IP address syntax")),
                "the string is not a valid IP address literal",
            ),
            (
                Error::unknown(Error::no_geo_info(None)),
                "an unknown error occurred while fetching the IP",
            ),
        ];

        for (err, msg) in cases {
            assert_eq!(format!("{}", err), msg, "display of {:?}", err.kind());
        }
    }
}
