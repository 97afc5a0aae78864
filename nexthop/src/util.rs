use std::net::IpAddr;

/// Folds an IPv4-mapped IPv6 address back into plain IPv4, other addresses pass through.
///
/// # Examples
///
/// ```
/// use std::net::IpAddr;
/// let mapped: IpAddr = "::ffff:10.16.0.3".parse().unwrap();
/// assert_eq!(nexthop::util::canonical(mapped), "10.16.0.3".parse::<IpAddr>().unwrap());
///
/// let v6: IpAddr = "2001:db8::1".parse().unwrap();
/// assert_eq!(nexthop::util::canonical(v6), v6);
/// ```
pub fn canonical(ip: IpAddr) -> IpAddr {
    ip.to_canonical()
}

/// Width of the address family in bits
///
/// ```
/// assert_eq!(nexthop::util::address_bits(&"8.8.8.8".parse().unwrap()), 32);
/// assert_eq!(nexthop::util::address_bits(&"::1".parse().unwrap()), 128);
/// ```
pub fn address_bits(ip: &IpAddr) -> u8 {
    match ip {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}
