//! MCP get_ip_address tool: list the non-loopback addresses of interfaces that are up.

use std::net::IpAddr;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{blocking, cancellable};
use crate::error::ToolError;

pub const NAME: &str = "get_ip_address";

/// Addresses found on the machine's network interfaces.
#[derive(Debug, Serialize)]
pub struct IpAddressOutput {
    /// List of IP addresses
    pub addresses: Vec<String>,
    /// Primary IP address (first non-loopback IPv4)
    pub primary: String,
}

/// Execute the get_ip_address tool logic.
pub async fn run_get_ip_address(ct: &CancellationToken) -> Result<IpAddressOutput, ToolError> {
    let lookup = blocking(NAME, || {
        let interfaces = if_addrs::get_if_addrs()
            .map_err(|e| ToolError::external(NAME, "failed to get network interfaces", e))?;
        select_addresses(usable_addresses(interfaces.iter().map(InterfaceAddr::from)))
    });
    cancellable(NAME, ct, lookup).await
}

/// One address of one interface, as reported by enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddr {
    pub ip: IpAddr,
    pub loopback: bool,
    /// Operational state of the owning interface
    pub up: bool,
}

impl From<&if_addrs::Interface> for InterfaceAddr {
    fn from(iface: &if_addrs::Interface) -> Self {
        Self { ip: iface.ip(), loopback: iface.is_loopback(), up: iface.is_oper_up() }
    }
}

/// Addresses of interfaces that are up and not loopback.
pub fn usable_addresses(addrs: impl IntoIterator<Item = InterfaceAddr>) -> Vec<IpAddr> {
    addrs.into_iter().filter(|a| a.up && !a.loopback).map(|a| a.ip).collect()
}

/// Drop loopback addresses and pick the primary one.
///
/// The primary address is the first IPv4 address, or the first address of
/// any family when there is no IPv4 address.
pub fn select_addresses(ips: impl IntoIterator<Item = IpAddr>) -> Result<IpAddressOutput, ToolError> {
    let addresses: Vec<IpAddr> = ips.into_iter().filter(|ip| !ip.is_loopback()).collect();

    let primary = addresses
        .iter()
        .find(|ip| ip.is_ipv4())
        .or_else(|| addresses.first())
        .ok_or_else(|| ToolError::EmptyResult {
            tool: NAME,
            message: "no IP addresses found".to_string(),
        })?
        .to_string();

    Ok(IpAddressOutput { addresses: addresses.iter().map(IpAddr::to_string).collect(), primary })
}
