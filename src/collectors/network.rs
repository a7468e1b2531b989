//! Network identity collector.
//!
//! Enumerates network interfaces via getifaddrs and records the first IPv4
//! address assigned to each. Interfaces without an IPv4 address are omitted,
//! which is expected for IPv6-only and unconfigured interfaces.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use nix::ifaddrs::getifaddrs;

/// Reads the first IPv4 address of every interface that has one.
pub fn read_interface_addrs() -> Result<BTreeMap<String, Ipv4Addr>, String> {
    let addrs = getifaddrs().map_err(|e| format!("getifaddrs failed: {}", e))?;

    let mut interfaces = BTreeMap::new();
    for ifaddr in addrs {
        let Some(storage) = ifaddr.address else {
            continue;
        };
        let Some(sin) = storage.as_sockaddr_in() else {
            continue; // not an IPv4 address
        };
        // getifaddrs yields one entry per address family per interface;
        // keep only the first IPv4 address seen for an interface.
        interfaces.entry(ifaddr.interface_name).or_insert_with(|| sin.ip());
    }

    Ok(interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_interface_addrs() {
        let result = read_interface_addrs();
        assert!(result.is_ok(), "Failed to enumerate interfaces: {:?}", result);

        let interfaces = result.unwrap();
        // Loopback should always carry 127.0.0.1
        if let Some(addr) = interfaces.get("lo") {
            assert_eq!(*addr, Ipv4Addr::LOCALHOST);
        }
    }
}
