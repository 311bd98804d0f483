/// Second-level suffixes under which registrants get the third label.
///
/// A deliberately small stand-in for the public suffix list.
const TWO_LEVEL_SUFFIXES: [&str; 11] = [
    "co.in", "co.uk", "org.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.jp",
    "com.br", "com.mx",
];

/// Collapse a hostname to the part its registrant controls.
///
/// `www.example.co.uk` becomes `example.co.uk`, `sub.example.com` becomes
/// `example.com`.
pub fn registrable_domain(hostname: &str) -> String {
    let lowered = hostname.to_ascii_lowercase();
    let host = lowered.strip_prefix("www.").unwrap_or(&lowered);
    let parts = host.split('.').filter(|p| !p.is_empty()).collect::<Vec<_>>();
    if parts.len() <= 2 {
        return host.to_string();
    }

    let last_two = parts[parts.len() - 2..].join(".");
    if TWO_LEVEL_SUFFIXES.contains(&last_two.as_str()) {
        return parts[parts.len() - 3..].join(".");
    }
    last_two
}

/// The final label of a domain, if any.
pub fn top_level_label(domain: &str) -> Option<&str> {
    domain.split('.').filter(|p| !p.is_empty()).next_back()
}
