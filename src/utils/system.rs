//! System utilities

use std::net::{Ipv4Addr, TcpListener};

use log::debug;

use crate::constants::PORT_SEARCH_RANGE;

/// Finds the first port from `preferred` that can be bound on localhost
///
/// Probes `preferred` and the following ports, returning `None` if all of
/// them are taken.
pub fn find_free_port(preferred: u16) -> Option<u16> {
    let end = preferred.saturating_add(PORT_SEARCH_RANGE);
    (preferred..end).find(|&port| match TcpListener::bind((Ipv4Addr::LOCALHOST, port)) {
        Ok(_) => true,
        Err(e) => {
            debug!("Port {} unavailable: {}", port, e);
            false
        }
    })
}
