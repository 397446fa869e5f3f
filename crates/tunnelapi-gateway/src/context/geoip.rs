use std::net::IpAddr;

/// Legacy marker for an unresolved GeoIP value.
pub const GEOIP_UNKNOWN_VALUE: &str = "None";

/// Per-connection geolocation metadata, resolved outside the API core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoIpData {
    pub country: String,
    pub city: String,
    pub isp: String,
}

impl GeoIpData {
    pub fn new(
        country: impl Into<String>,
        city: impl Into<String>,
        isp: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            city: city.into(),
            isp: isp.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(GEOIP_UNKNOWN_VALUE, GEOIP_UNKNOWN_VALUE, GEOIP_UNKNOWN_VALUE)
    }
}

impl Default for GeoIpData {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Resolves a client address to GeoIP data. Lookups must not fail; unknown
/// addresses resolve to [`GeoIpData::unknown`].
pub trait GeoIpResolver: Send + Sync {
    fn lookup(&self, ip: IpAddr) -> GeoIpData;
}

/// Resolver used when no GeoIP database is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnknownGeoIp;

impl GeoIpResolver for UnknownGeoIp {
    fn lookup(&self, _ip: IpAddr) -> GeoIpData {
        GeoIpData::unknown()
    }
}
