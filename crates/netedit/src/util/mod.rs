//! Shared utilities for netedit.

pub mod addr;
pub mod ifname;

pub use addr::{
    CidrToken, ipv4_in_prefix, mask_to_prefix, parse_ipv4, parse_route, parse_route_list,
    parse_subnet, prefix_to_mask,
};
