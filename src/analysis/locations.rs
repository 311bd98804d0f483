use std::collections::HashMap;

use serde::Serialize;

use super::aggregate::DomainCounts;
use super::domain::top_level_label;
use super::session::DomainCount;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub city: &'static str,
    pub lat: f64,
    pub lng: f64,
}

const fn at(city: &'static str, lat: f64, lng: f64) -> Location {
    Location { city, lat, lng }
}

const SAN_FRANCISCO: Location = at("San Francisco", 37.7749, -122.4194);
const MOUNTAIN_VIEW: Location = at("Mountain View", 37.422, -122.0841);
const BANGALORE: Location = at("Bangalore", 12.9716, 77.5946);

/// Headquarters of a handful of very common domains.
const KNOWN_DOMAIN_LOCATIONS: &[(&str, Location)] = &[
    ("medium.com", SAN_FRANCISCO),
    ("youtube.com", MOUNTAIN_VIEW),
    ("google.com", MOUNTAIN_VIEW),
    ("google.co.in", BANGALORE),
    ("twitter.com", SAN_FRANCISCO),
    ("x.com", SAN_FRANCISCO),
    ("reddit.com", SAN_FRANCISCO),
    ("amazon.com", at("Seattle", 47.6062, -122.3321)),
    ("amazon.in", BANGALORE),
    ("wikipedia.org", SAN_FRANCISCO),
    ("github.com", SAN_FRANCISCO),
];

/// Capital cities for the country TLDs we bother to place.
const CCTLD_LOCATIONS: &[(&str, Location)] = &[
    ("in", at("New Delhi", 28.6139, 77.209)),
    ("lk", at("Colombo", 6.9271, 79.8612)),
    ("uk", at("London", 51.5074, -0.1278)),
    ("fr", at("Paris", 48.8566, 2.3522)),
    ("de", at("Berlin", 52.52, 13.405)),
    ("jp", at("Tokyo", 35.6762, 139.6503)),
    ("ca", at("Ottawa", 45.4215, -75.6972)),
    ("au", at("Canberra", -35.2809, 149.13)),
    ("br", at("Brasília", -15.7939, -47.8828)),
    ("mx", at("Mexico City", 19.4326, -99.1332)),
];

/// Domains that resolved to the same city.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteredLocation {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub domains: Vec<DomainCount>,
    pub total_count: usize,
}

/// Illustrative placement only: an exact domain match first, then the
/// domain's two-letter country TLD.
pub fn estimate_location(domain: &str) -> Option<Location> {
    if let Some((_, known)) = KNOWN_DOMAIN_LOCATIONS.iter().find(|(d, _)| *d == domain) {
        return Some(*known);
    }

    let tld = top_level_label(domain)?;
    if tld.len() != 2 {
        return None;
    }
    CCTLD_LOCATIONS
        .iter()
        .find(|(code, _)| *code == tld)
        .map(|(_, location)| *location)
}

/// City clusters, busiest first, plus the number of domains that were placed.
pub fn cluster_locations(domain_counts: &DomainCounts) -> (Vec<ClusteredLocation>, usize) {
    let mut clusters: Vec<ClusteredLocation> = Vec::new();
    let mut by_city: HashMap<&'static str, usize> = HashMap::new();
    let mut mapped_domains = 0;

    for (domain, count) in domain_counts.iter() {
        let Some(location) = estimate_location(domain) else {
            continue;
        };
        mapped_domains += 1;

        let idx = *by_city.entry(location.city).or_insert_with(|| {
            clusters.push(ClusteredLocation {
                city: location.city.to_string(),
                lat: location.lat,
                lng: location.lng,
                domains: Vec::new(),
                total_count: 0,
            });
            clusters.len() - 1
        });
        let cluster = &mut clusters[idx];
        cluster.domains.push(DomainCount {
            domain: domain.to_string(),
            count,
        });
        cluster.total_count += count;
    }

    clusters.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    (clusters, mapped_domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_domains_win_over_country_tlds() {
        assert_eq!(estimate_location("google.co.in").unwrap().city, "Bangalore");
        assert_eq!(estimate_location("scroll.in").unwrap().city, "New Delhi");
        assert_eq!(estimate_location("bbc.co.uk").unwrap().city, "London");
    }

    #[test]
    fn unknown_domains_are_not_placed() {
        assert!(estimate_location("example.com").is_none());
        assert!(estimate_location("example.nl").is_none());
    }

    #[test]
    fn clusters_merge_domains_by_city_and_sort_by_total() {
        let counts = [
            "github.com",
            "amazon.com",
            "amazon.com",
            "amazon.com",
            "medium.com",
            "medium.com",
            "example.com",
            "lemonde.fr",
        ]
        .into_iter()
        .collect::<DomainCounts>();

        let (clusters, mapped) = cluster_locations(&counts);
        assert_eq!(mapped, 4);
        let cities = clusters.iter().map(|c| c.city.as_str()).collect::<Vec<_>>();
        assert_eq!(cities, vec!["San Francisco", "Seattle", "Paris"]);
        assert_eq!(clusters[0].total_count, 3);
        assert_eq!(clusters[0].domains.len(), 2);
        assert_eq!(clusters[0].domains[0].domain, "github.com");
    }
}
