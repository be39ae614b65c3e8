//! Local network availability check.

use log::debug;

/// Reports if the OS considers the network available, that's at least one
/// network interface other than the loopback is operational.
///
/// This is a local-only query of the interfaces state; it doesn't verify that
/// the internet, nor the SeeIP services, are actually reachable. A machine
/// connected to a router without an upstream link is still reported as
/// available.
///
/// When the interfaces enumeration itself fails the network is reported
/// unavailable.
pub fn is_network_available() -> bool {
    match if_addrs::get_if_addrs() {
        Ok(addrs) => addrs.iter().any(|i| !i.is_loopback()),
        Err(err) => {
            debug!("network interfaces enumeration failed: {}", err);
            false
        }
    }
}
