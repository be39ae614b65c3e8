//! Client library for retrieving the public IP (V4/V6) and the geolocation
//! information of the machine through the SeeIP services.
//!
//! All the operations are offered in an asynchronous and a blocking form with
//! the same observable behavior. Every call is independent; no state is kept
//! between calls apart from the fixed endpoint URLs.
//!
//! ```no_run
//! use seeip::Client;
//!
//! # async fn run() -> Result<(), seeip::Error> {
//! let client = Client::new();
//! let ip = client.ipv4(false).await?;
//! println!("public IP V4: {}", ip);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod error;
mod geo;
mod net;

pub use error::{BoxError, Error, ErrorKind};
pub use geo::GeoInformation;
pub use net::is_network_available;

use std::future::Future;
use std::net::IpAddr;
use std::str::FromStr;

use isahc::AsyncReadResponseExt;
use log::debug;

/// URL of the SeeIP endpoint that reveals the public IP V4 of the machine.
pub const IPV4_URL: &str = "https://ip4.seeip.org/";
/// URL of the SeeIP endpoint that reveals the public IP V6 of the machine.
pub const IPV6_URL: &str = "https://ip6.seeip.org/";
/// URL of the SeeIP endpoint that reveals the geolocation information of the
/// machine.
pub const GEO_URL: &str = "https://ip.seeip.org/geoip";

/// Selector of the IP address family to query.
enum IpVersion {
    V4,
    V6,
}

/// The client for the SeeIP services.
///
/// Each operation performs exactly one HTTP GET request with a fresh HTTP
/// client, so connection reuse between calls isn't guaranteed. Unless the
/// caller asks to skip it, the operations check first that the OS reports the
/// network available and fail fast without any network attempt when it
/// doesn't; see [`is_network_available`] for what the check guarantees.
///
/// Every operation that fails returns an [`Error`] of the
/// [`ErrorKind::Unknown`] kind which nests the specific reason; inspect the
/// [`std::error::Error::source`] chain to distinguish them.
pub struct Client<'a> {
    /// The URL to request the public IP V4.
    ipv4_url: &'a str,
    /// The URL to request the public IP V6.
    ipv6_url: &'a str,
    /// The URL to request the geolocation information.
    geo_url: &'a str,
    /// The predicate consulted before any HTTP attempt.
    network_check: fn() -> bool,
}

impl<'a> Client<'a> {
    /// Creates a client that uses the fixed SeeIP endpoints.
    pub fn new() -> Self {
        Self::with_urls(IPV4_URL, IPV6_URL, GEO_URL, net::is_network_available)
    }

    /// Creates a client using the specified URLs and availability predicate.
    /// This constructor is mainly useful for testing purposes.
    fn with_urls(
        ipv4_url: &'a str,
        ipv6_url: &'a str,
        geo_url: &'a str,
        network_check: fn() -> bool,
    ) -> Self {
        Self {
            ipv4_url,
            ipv6_url,
            geo_url,
            network_check,
        }
    }

    /// Gets the public IP V4 of the machine as the text returned by the
    /// service, verbatim.
    ///
    /// `skip_network_check` bypasses the local network availability gate.
    pub async fn ipv4(&self, skip_network_check: bool) -> Result<String, Error> {
        self.ip_by_version(IpVersion::V4, skip_network_check)
            .await
            .map_err(Error::unknown)
    }

    /// Gets the public IP V6 of the machine as the text returned by the
    /// service, verbatim.
    ///
    /// `skip_network_check` bypasses the local network availability gate.
    pub async fn ipv6(&self, skip_network_check: bool) -> Result<String, Error> {
        self.ip_by_version(IpVersion::V6, skip_network_check)
            .await
            .map_err(Error::unknown)
    }

    /// Gets the geolocation information associated with the public IP of the
    /// machine.
    ///
    /// `skip_network_check` bypasses the local network availability gate.
    pub async fn geo_info(&self, skip_network_check: bool) -> Result<GeoInformation, Error> {
        self.fetch_geo_info(skip_network_check)
            .await
            .map_err(Error::unknown)
    }

    /// Blocking form of [`Client::ipv4`].
    ///
    /// It must not be called from asynchronous contexts, where it panics.
    pub fn ipv4_blocking(&self, skip_network_check: bool) -> Result<String, Error> {
        block_on(self.ipv4(skip_network_check))
    }

    /// Blocking form of [`Client::ipv6`].
    ///
    /// It must not be called from asynchronous contexts, where it panics.
    pub fn ipv6_blocking(&self, skip_network_check: bool) -> Result<String, Error> {
        block_on(self.ipv6(skip_network_check))
    }

    /// Blocking form of [`Client::geo_info`].
    ///
    /// It must not be called from asynchronous contexts, where it panics.
    pub fn geo_info_blocking(&self, skip_network_check: bool) -> Result<GeoInformation, Error> {
        block_on(self.geo_info(skip_network_check))
    }

    /// Gets the public IP of the indicated version, gating on the
    /// availability check unless the caller asked to skip it.
    async fn ip_by_version(
        &self,
        version: IpVersion,
        skip_network_check: bool,
    ) -> Result<String, Error> {
        if !skip_network_check && !(self.network_check)() {
            return Err(Error::network_unavailable());
        }

        let url = match version {
            IpVersion::V4 => self.ipv4_url,
            IpVersion::V6 => self.ipv6_url,
        };

        self.fetch_text(url).await
    }

    /// Gets and parses the geolocation information, gating on the
    /// availability check unless the caller asked to skip it.
    async fn fetch_geo_info(&self, skip_network_check: bool) -> Result<GeoInformation, Error> {
        if !skip_network_check && !(self.network_check)() {
            return Err(Error::network_unavailable());
        }

        let body = self.fetch_text(self.geo_url).await?;
        geo::parse(&body)
    }

    /// Sends a GET request to `url` and returns the whole response body as
    /// text, whatever the response HTTP status code is. Transport-level
    /// failures are returned as `ErrorKind::BadWebRequest` errors.
    async fn fetch_text(&self, url: &str) -> Result<String, Error> {
        let http_cli = isahc::HttpClientBuilder::new().build().expect(
            "HTTP client initialization error, this due to a bug in this crate, please report it",
        );

        debug!("requesting {}", url);
        let mut response = http_cli
            .get_async(url)
            .await
            .map_err(|err| Error::bad_web_request(err.into()))?;

        debug!(
            r#"{} responded with an HTTP "{}" status code"#,
            url,
            response.status()
        );
        response
            .text()
            .await
            .map_err(|err| Error::bad_web_request(err.into()))
    }
}

impl Default for Client<'_> {
    fn default() -> Self {
        Client::new()
    }
}

/// Extension for converting a textual IP, like the ones returned by
/// [`Client::ipv4`] and [`Client::ipv6`], into a [`std::net::IpAddr`].
pub trait AsIpAddress {
    /// Parses the text as an IP (V4 or V6) address.
    ///
    /// A text which isn't a valid IP literal returns an
    /// [`ErrorKind::Parsing`] error nesting the standard parser error.
    fn as_ip_address(&self) -> Result<IpAddr, Error>;
}

impl AsIpAddress for str {
    fn as_ip_address(&self) -> Result<IpAddr, Error> {
        IpAddr::from_str(self).map_err(|err| Error::parsing(err.into()))
    }
}

/// Runs the passed future to completion on a runtime created for this only
/// call.
fn block_on<F: Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect(
            "Tokio runtime initialization error, this due to a bug in this crate, please report it",
        )
        .block_on(fut)
}
