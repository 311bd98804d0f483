use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use url::Url;

/// Anything that starts with an http(s) scheme and runs until whitespace,
/// a quote or an angle bracket.
static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)https?://[^\s"'<>]+"#).unwrap());

const AMP_PREFIX: &str = "/amp/s/";

/// Pull every URL-looking substring out of free-form text, in order.
///
/// Duplicates are kept. Trailing `)`, `]`, `,`, `.` and `;` are stripped so
/// links pasted inside prose or markdown come out clean.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .filter_map(|m| {
            let cleaned = strip_trailing_punctuation(m.as_str().trim());
            if cleaned.is_empty() {
                None
            } else {
                Some(cleaned.to_string())
            }
        })
        .collect()
}

fn strip_trailing_punctuation(raw: &str) -> &str {
    raw.trim_end_matches([')', ']', ',', '.', ';'])
}

/// Parse and canonicalise one candidate URL.
///
/// Returns `None` when the candidate does not parse; callers drop those
/// silently.
pub fn normalize_url(raw: &str) -> Option<Url> {
    let parsed = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(err) => {
            debug!("dropping unparseable url {raw:?}: {err}");
            return None;
        }
    };

    let mut url = unwrap_google_amp(parsed);
    url.set_fragment(None);
    strip_tracking_params(&mut url);
    Some(url)
}

/// `https://www.google.com/amp/s/example.com/story` points at
/// `https://example.com/story`.
fn unwrap_google_amp(url: Url) -> Url {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !host.contains("google.") {
        return url;
    }
    let Some(rest) = url.path().strip_prefix(AMP_PREFIX) else {
        return url;
    };

    let mut target = rest.to_string();
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        target.push('#');
        target.push_str(fragment);
    }
    if !target.starts_with("http://") && !target.starts_with("https://") {
        target = format!("https://{target}");
    }

    match Url::parse(&target) {
        Ok(unwrapped) => unwrapped,
        Err(err) => {
            debug!("keeping amp wrapper for {url}: {err}");
            url
        }
    }
}

fn strip_tracking_params(url: &mut Url) {
    if url.query().is_none() {
        return;
    }

    let kept_params = url
        .query_pairs()
        .filter_map(|(k, v)| {
            if is_tracking_query_param(&k) {
                None
            } else {
                Some((k.into_owned(), v.into_owned()))
            }
        })
        .collect::<Vec<_>>();
    if kept_params.is_empty() {
        url.set_query(None);
    } else {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (k, v) in kept_params {
            serializer.append_pair(&k, &v);
        }
        url.set_query(Some(&serializer.finish()));
    }
}

pub fn is_tracking_query_param(param: &str) -> bool {
    let name = param.to_ascii_lowercase();
    if name.starts_with("utm_") {
        return true;
    }
    matches!(
        name.as_str(),
        "gclid"
            | "fbclid"
            | "igshid"
            | "mc_cid"
            | "mc_eid"
            | "ref"
            | "ref_src"
            | "source"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_urls_from_prose_and_markdown() {
        let text = "Read [this](https://example.com/a). Also see https://foo.dev/b, \
                    and (https://bar.io/c);\nftp://nope.org";
        assert_eq!(
            extract_urls(text),
            vec![
                "https://example.com/a",
                "https://foo.dev/b",
                "https://bar.io/c",
            ]
        );
    }

    #[test]
    fn extraction_keeps_duplicates_and_order() {
        let text = "https://a.com https://b.com https://a.com";
        assert_eq!(
            extract_urls(text),
            vec!["https://a.com", "https://b.com", "https://a.com"]
        );
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        assert_eq!(extract_urls("HTTPS://Example.com/x"), vec!["HTTPS://Example.com/x"]);
    }

    #[test]
    fn no_urls_is_an_empty_list() {
        assert!(extract_urls("nothing to see here").is_empty());
    }

    #[test]
    fn strips_tracking_params_and_fragment() {
        let url = normalize_url("https://example.com/page?utm_source=x&id=5#frag").unwrap();
        assert_eq!(url.as_str(), "https://example.com/page?id=5");
    }

    #[test]
    fn drops_query_entirely_when_only_tracking_remains() {
        let url =
            normalize_url("https://example.com/?UTM_Medium=mail&fbclid=abc&ref=hn").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn keeps_remaining_params_in_order() {
        let url = normalize_url("https://example.com/s?b=2&source=tw&a=1").unwrap();
        assert_eq!(url.query(), Some("b=2&a=1"));
    }

    #[test]
    fn unwraps_google_amp_links() {
        let url = normalize_url("https://www.google.com/amp/s/www.bbc.com/news/world?utm_term=a")
            .unwrap();
        assert_eq!(url.as_str(), "https://www.bbc.com/news/world");
    }

    #[test]
    fn amp_prefix_on_other_hosts_is_left_alone() {
        let url = normalize_url("https://example.com/amp/s/other.com/x").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn malformed_urls_are_dropped() {
        assert!(normalize_url("https://").is_none());
        assert!(normalize_url("not a url").is_none());
    }

    #[test]
    fn tracking_param_names_are_case_insensitive() {
        assert!(is_tracking_query_param("GCLID"));
        assert!(is_tracking_query_param("utm_whatever"));
        assert!(!is_tracking_query_param("q"));
        assert!(!is_tracking_query_param("referrer"));
    }
}
