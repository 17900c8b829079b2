//! Address, subnet and route string parsing.
//!
//! Route lists are checked for *shape* only: four groups of one to three
//! digits, a slash, and one or two digits. Octet and prefix ranges are left
//! to the backend; [`CidrToken::is_in_range`] exists so callers can warn
//! about them without rejecting the request.

use std::fmt;
use std::net::Ipv4Addr;

use winnow::ascii::multispace0;
use winnow::combinator::separated;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Error type for address parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),

    #[error("invalid subnet mask: {0}")]
    InvalidMask(String),

    #[error("invalid route list: {0}")]
    InvalidRoute(String),
}

pub type Result<T> = std::result::Result<T, AddrError>;

/// One syntactically valid `A.B.C.D/N` token from a route list.
///
/// Digit groups are kept as parsed, so `999.0.0.0/99` is a valid token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CidrToken {
    pub octets: [u16; 4],
    pub prefix_len: u8,
}

impl CidrToken {
    /// Check that every octet is at most 255 and the prefix at most 32.
    pub fn is_in_range(&self) -> bool {
        self.octets.iter().all(|o| *o <= 255) && self.prefix_len <= 32
    }

    /// Convert to an IPv4 network, if the token is in range.
    pub fn to_network(&self) -> Option<(Ipv4Addr, u8)> {
        if !self.is_in_range() {
            return None;
        }
        let [a, b, c, d] = self.octets;
        Some((
            Ipv4Addr::new(a as u8, b as u8, c as u8, d as u8),
            self.prefix_len,
        ))
    }
}

impl fmt::Display for CidrToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{}.{}.{}.{}/{}", a, b, c, d, self.prefix_len)
    }
}

// ============================================================================
// Route list grammar
// ============================================================================

type PResult<T> = std::result::Result<T, ErrMode<ContextError>>;

fn octet(input: &mut &str) -> PResult<u16> {
    take_while(1..=3, '0'..='9')
        .try_map(|digits: &str| digits.parse::<u16>())
        .parse_next(input)
}

fn prefix_len(input: &mut &str) -> PResult<u8> {
    take_while(1..=2, '0'..='9')
        .try_map(|digits: &str| digits.parse::<u8>())
        .parse_next(input)
}

fn cidr_token(input: &mut &str) -> PResult<CidrToken> {
    let (a, _, b, _, c, _, d, _, prefix_len) = (
        octet, '.', octet, '.', octet, '.', octet, '/', prefix_len,
    )
        .parse_next(input)?;

    Ok(CidrToken {
        octets: [a, b, c, d],
        prefix_len,
    })
}

fn route_list(input: &mut &str) -> PResult<Vec<CidrToken>> {
    separated(1.., cidr_token, (',', multispace0)).parse_next(input)
}

/// Parse a comma-separated route list.
///
/// ASCII whitespace is accepted after a comma and nowhere else. Empty input,
/// trailing commas and malformed tokens are rejected.
pub fn parse_route_list(s: &str) -> Result<Vec<CidrToken>> {
    route_list
        .parse(s)
        .map_err(|_| AddrError::InvalidRoute(s.to_string()))
}

/// Parse a single route destination.
pub fn parse_route(s: &str) -> Result<CidrToken> {
    cidr_token
        .parse(s)
        .map_err(|_| AddrError::InvalidRoute(s.to_string()))
}

// ============================================================================
// Addresses and subnets
// ============================================================================

/// Parse a dotted-quad IPv4 address.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr> {
    s.parse()
        .map_err(|_| AddrError::InvalidAddress(s.to_string()))
}

/// Parse a subnet given as a dotted mask, a bare prefix length, or `/N`.
///
/// Returns the prefix length.
pub fn parse_subnet(s: &str) -> Result<u8> {
    let s = s.trim();
    let bare = s.strip_prefix('/').unwrap_or(s);

    if !bare.is_empty() && bare.bytes().all(|b| b.is_ascii_digit()) {
        let prefix: u8 = bare
            .parse()
            .map_err(|_| AddrError::InvalidPrefix(s.to_string()))?;
        if prefix > 32 {
            return Err(AddrError::InvalidPrefix(format!(
                "{} exceeds maximum 32 for IPv4",
                prefix
            )));
        }
        return Ok(prefix);
    }

    let mask = parse_ipv4(s).map_err(|_| AddrError::InvalidMask(s.to_string()))?;
    mask_to_prefix(mask)
}

/// Convert a contiguous netmask to its prefix length.
pub fn mask_to_prefix(mask: Ipv4Addr) -> Result<u8> {
    let bits = u32::from(mask);
    if bits.count_ones() != bits.leading_ones() {
        return Err(AddrError::InvalidMask(mask.to_string()));
    }
    Ok(bits.leading_ones() as u8)
}

/// Convert a prefix length to a netmask.
pub fn prefix_to_mask(prefix_len: u8) -> Option<Ipv4Addr> {
    match prefix_len {
        0 => Some(Ipv4Addr::UNSPECIFIED),
        1..=32 => Some(Ipv4Addr::from(!0u32 << (32 - prefix_len))),
        _ => None,
    }
}

/// Check if an IPv4 address is in a given prefix.
pub fn ipv4_in_prefix(addr: Ipv4Addr, prefix_addr: Ipv4Addr, prefix_len: u8) -> bool {
    if prefix_len == 0 {
        return true;
    }
    if prefix_len > 32 {
        return false;
    }

    let mask = !0u32 << (32 - prefix_len);
    let addr_bits = u32::from(addr);
    let prefix_bits = u32::from(prefix_addr);

    (addr_bits & mask) == (prefix_bits & mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_single() {
        let routes = parse_route_list("192.168.1.0/24").unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].octets, [192, 168, 1, 0]);
        assert_eq!(routes[0].prefix_len, 24);
    }

    #[test]
    fn test_parse_route_list() {
        let routes = parse_route_list("192.168.1.0/24,10.0.0.0/8").unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[1].to_string(), "10.0.0.0/8");

        // Whitespace after the comma, as produced when seeding an edit
        let routes = parse_route_list("192.168.1.0/24, \t10.0.0.0/8").unwrap();
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn test_parse_route_list_rejects() {
        assert!(parse_route_list("").is_err());
        assert!(parse_route_list("192.168.1.0").is_err());
        assert!(parse_route_list("192.168.1.0/24,").is_err());
        assert!(parse_route_list("192.168.1.0/24 ,10.0.0.0/8").is_err());
        assert!(parse_route_list(" 192.168.1.0/24").is_err());
        assert!(parse_route_list("192.168.1/24").is_err());
        assert!(parse_route_list("1921.168.1.0/24").is_err());
        assert!(parse_route_list("192.168.1.0/124").is_err());
        assert!(parse_route_list("a.b.c.d/8").is_err());
    }

    #[test]
    fn test_parse_route_list_whitespace_after_comma() {
        assert_eq!(parse_route_list("10.0.0.0/8,\t 1.1.1.0/24").unwrap().len(), 2);
        assert!(parse_route_list("10.0.0.0/8,\n1.1.1.0/24").is_ok());
        // Non-ASCII spaces are not separators
        assert!(matches!(
            parse_route_list("10.0.0.0/8,\u{a0}1.1.1.0/24"),
            Err(AddrError::InvalidRoute(_))
        ));
    }

    #[test]
    fn test_parse_route_list_is_lenient_on_range() {
        let routes = parse_route_list("999.1.1.1/99").unwrap();
        assert!(!routes[0].is_in_range());
        assert_eq!(routes[0].to_network(), None);

        let route = parse_route("10.1.0.0/16").unwrap();
        assert!(route.is_in_range());
        assert_eq!(route.to_network(), Some((Ipv4Addr::new(10, 1, 0, 0), 16)));
    }

    #[test]
    fn test_parse_ipv4() {
        assert_eq!(parse_ipv4("10.0.0.5").unwrap(), Ipv4Addr::new(10, 0, 0, 5));
        assert!(parse_ipv4("10.0.0").is_err());
        assert!(parse_ipv4("::1").is_err());
    }

    #[test]
    fn test_parse_subnet() {
        assert_eq!(parse_subnet("255.255.255.0").unwrap(), 24);
        assert_eq!(parse_subnet("24").unwrap(), 24);
        assert_eq!(parse_subnet("/16").unwrap(), 16);
        assert_eq!(parse_subnet("0.0.0.0").unwrap(), 0);

        assert!(parse_subnet("255.0.255.0").is_err());
        assert!(parse_subnet("33").is_err());
        assert!(parse_subnet("300").is_err());
        assert!(parse_subnet("").is_err());
    }

    #[test]
    fn test_prefix_to_mask() {
        assert_eq!(prefix_to_mask(24), Some(Ipv4Addr::new(255, 255, 255, 0)));
        assert_eq!(prefix_to_mask(0), Some(Ipv4Addr::UNSPECIFIED));
        assert_eq!(prefix_to_mask(32), Some(Ipv4Addr::BROADCAST));
        assert_eq!(prefix_to_mask(33), None);
    }

    #[test]
    fn test_ipv4_in_prefix() {
        let net = Ipv4Addr::new(10, 0, 0, 0);
        assert!(ipv4_in_prefix(Ipv4Addr::new(10, 0, 0, 1), net, 24));
        assert!(!ipv4_in_prefix(Ipv4Addr::new(10, 0, 1, 1), net, 24));
        assert!(ipv4_in_prefix(Ipv4Addr::new(192, 0, 2, 1), net, 0));
    }
}
