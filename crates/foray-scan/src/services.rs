//! Static lookup from port numbers to well-known service names.

/// Well-known TCP service name for a port, if the table knows it
#[must_use]
pub fn name_for(port: u16) -> Option<&'static str> {
    SERVICE_NAMES
        .iter()
        .find(|(p, _)| *p == port)
        .map(|(_, name)| *name)
}

// Well-known TCP services, aligned with the IANA registry names
const SERVICE_NAMES: [(u16, &str); 24] = [
    (21, "ftp"),
    (22, "ssh"),
    (23, "telnet"),
    (25, "smtp"),
    (53, "domain"),
    (80, "http"),
    (110, "pop3"),
    (111, "sunrpc"),
    (139, "netbios-ssn"),
    (143, "imap"),
    (443, "https"),
    (445, "microsoft-ds"),
    (465, "smtps"),
    (587, "submission"),
    (993, "imaps"),
    (995, "pop3s"),
    (1433, "ms-sql-s"),
    (3306, "mysql"),
    (3389, "ms-wbt-server"),
    (5432, "postgresql"),
    (5900, "vnc"),
    (6379, "redis"),
    (8080, "http-alt"),
    (8443, "https-alt"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ports() {
        assert_eq!(name_for(80), Some("http"));
        assert_eq!(name_for(443), Some("https"));
        assert_eq!(name_for(22), Some("ssh"));
        assert_eq!(name_for(3306), Some("mysql"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(name_for(9999), None);
        assert_eq!(name_for(0), None);
    }

    #[test]
    fn test_common_scan_ports_are_named() {
        use crate::enumerate::PortSpec;
        for port in PortSpec::Common.to_ports() {
            assert!(name_for(port).is_some(), "port {port} missing a name");
        }
    }
}
