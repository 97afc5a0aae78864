use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::str::FromStr;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::feedback::PrefixError;
use crate::util::{address_bits, canonical};

/// A network address plus mask length. Host bits are always cleared, so two prefixes naming the
/// same network compare equal. Serialised in CIDR notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct Prefix(IpNet);

impl Prefix {
    pub fn new(addr: IpAddr, len: u8) -> Result<Self, PrefixError> {
        IpNet::new(addr, len)
            .map(|net| Prefix(net.trunc()))
            .map_err(|_| PrefixError::MaskLength {
                addr,
                len,
                max: address_bits(&addr),
            })
    }

    /// `0.0.0.0/0`
    pub fn ipv4_default() -> Self {
        Prefix(IpNet::V4(Ipv4Net::default()))
    }

    /// `::/0`
    pub fn ipv6_default() -> Self {
        Prefix(IpNet::V6(Ipv6Net::default()))
    }

    pub fn network(&self) -> IpAddr {
        self.0.network()
    }

    pub fn mask_len(&self) -> u8 {
        self.0.prefix_len()
    }

    /// Rank used by longest-prefix-match, higher is more specific
    pub fn specificity(&self) -> u8 {
        self.0.prefix_len()
    }

    pub fn is_default(&self) -> bool {
        self.0.prefix_len() == 0
    }

    /// Whether `ip` lies inside this network. An address never matches a prefix of the other
    /// family, except that IPv4-mapped IPv6 addresses are treated as IPv4.
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.0.contains(&canonical(*ip))
    }
}

impl From<IpNet> for Prefix {
    fn from(net: IpNet) -> Self {
        Prefix(net.trunc())
    }
}

impl From<IpAddr> for Prefix {
    /// host route (/32 or /128)
    fn from(addr: IpAddr) -> Self {
        Prefix(IpNet::from(addr))
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(net) = IpNet::from_str(s) {
            return Ok(net.into());
        }
        IpAddr::from_str(s)
            .map(Prefix::from)
            .map_err(|_| PrefixError::Parse {
                value: s.to_string(),
            })
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn host_bits_are_cleared() {
        let prefix: Prefix = "192.168.0.5/24".parse().unwrap();
        assert_eq!(prefix.to_string(), "192.168.0.0/24");
        assert_eq!(prefix, "192.168.0.0/24".parse().unwrap());
        assert_eq!(prefix.network(), ip("192.168.0.0"));
    }

    #[test]
    fn containment() {
        let prefix: Prefix = "10.16.0.0/24".parse().unwrap();
        assert!(prefix.contains(&ip("10.16.0.3")));
        assert!(prefix.contains(&ip("10.16.0.255")));
        assert!(!prefix.contains(&ip("10.16.1.0")));
        assert!(!prefix.contains(&ip("2001:db8::1")));
        assert!(prefix.contains(&ip("::ffff:10.16.0.3")));
    }

    #[test]
    fn default_route_contains_everything_in_its_family() {
        let v4 = Prefix::ipv4_default();
        assert!(v4.is_default());
        assert_eq!(v4.specificity(), 0);
        assert!(v4.contains(&ip("8.8.8.8")));
        assert!(v4.contains(&ip("255.255.255.255")));
        assert!(!v4.contains(&ip("::1")));

        let v6 = Prefix::ipv6_default();
        assert_eq!(v6.to_string(), "::/0");
        assert!(v6.contains(&ip("2001:db8::1")));
    }

    #[test]
    fn mask_length_is_bounded_by_family() {
        assert_eq!(
            Prefix::new(ip("10.0.0.0"), 33),
            Err(PrefixError::MaskLength {
                addr: ip("10.0.0.0"),
                len: 33,
                max: 32
            })
        );
        assert!(Prefix::new(ip("2001:db8::"), 64).is_ok());
        assert!("10.0.0.0/40".parse::<Prefix>().is_err());
    }

    #[test]
    fn bare_address_is_a_host_route() {
        let prefix: Prefix = "10.60.0.5".parse().unwrap();
        assert_eq!(prefix.mask_len(), 32);
        assert!(prefix.contains(&ip("10.60.0.5")));
        assert!(!prefix.contains(&ip("10.60.0.6")));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            "not-a-prefix".parse::<Prefix>(),
            Err(PrefixError::Parse {
                value: "not-a-prefix".to_string()
            })
        );
    }

    #[test]
    fn serialises_as_cidr_string() {
        let prefix: Prefix = "10.60.0.0/24".parse().unwrap();
        assert_eq!(serde_json::to_string(&prefix).unwrap(), "\"10.60.0.0/24\"");
        let back: Prefix = serde_json::from_str("\"10.60.0.9/24\"").unwrap();
        assert_eq!(back, prefix);
    }
}
