use url::Url;

use super::categories::CategoryId;

const JOBS_DOMAINS: &[&str] = &[
    "greenhouse.io",
    "lever.co",
    "otta.com",
    "wellfound.com",
    "angel.co",
    "indeed.com",
    "glassdoor.com",
    "ziprecruiter.com",
    "otter.work",
    "talentify.io",
    "workatastartup.com",
    "remoteok.io",
    "weworkremotely.com",
    "hired.com",
];

const EVENTS_DOMAINS: &[&str] = &[
    "lu.ma",
    "luma.com",
    "eventbrite.com",
    "meetup.com",
    "ti.to",
    "hopin.com",
    "splashthat.com",
];

const TRAVEL_DOMAINS: &[&str] = &[
    "tripadvisor.com",
    "booking.com",
    "airbnb.com",
    "hotels.com",
    "skyscanner.com",
    "kayak.com",
    "lonelyplanet.com",
];

const TOOLS_DOMAINS: &[&str] = &[
    "github.com",
    "notion.so",
    "notion.site",
    "figma.com",
    "cal.com",
    "chat.openai.com",
    "openai.com",
    "claude.ai",
    "cursor.com",
    "linear.app",
    "vercel.com",
    "netlify.com",
    "heroku.com",
    "railway.app",
    "miro.com",
    "whimsical.com",
    "excalidraw.com",
    "loom.com",
    "slack.com",
    "discord.com",
    "airtable.com",
    "amplitude.com",
    "mixpanel.com",
    "segment.com",
    "hotjar.com",
    "webflow.com",
    "framer.com",
    "retool.com",
    "supabase.com",
    "firebase.google.com",
    "stackoverflow.com",
    "codepen.io",
    "replit.com",
    "codesandbox.io",
    "npmjs.com",
    "bundlephobia.com",
    "caniuse.com",
    "typescriptlang.org",
];

const DESIGN_DOMAINS: &[&str] = &[
    "uxdesign.cc",
    "dribbble.com",
    "behance.net",
    "awwwards.com",
    "designernews.co",
    "dezeen.com",
    "itsnicethat.com",
    "creativeboom.com",
    "printmag.com",
    "eyeondesign.aiga.org",
    "designweek.co.uk",
    "designobserver.com",
    "core77.com",
    "yankodesign.com",
    "fastcompany.com",
    "commarts.com",
    "typeroom.eu",
    "fontsinuse.com",
    "typographica.org",
    "smashingmagazine.com",
    "alistapart.com",
    "cssdesignawards.com",
    "designspiration.com",
    "abduzeedo.com",
    "swiss-miss.com",
    "the-brandidentity.com",
    "bfrnd.com",
    "thecollectiveshift.com",
    "spec.fm",
    "nngroup.com",
    "lawsofux.com",
    "refactoringui.com",
    "ui.dev",
    "uxplanet.org",
    "uxtools.co",
    "designsystems.com",
    "storybook.js.org",
    "mobbin.com",
    "pageflows.com",
    "nobl.io",
    "leaddev.com",
];

const NEWS_DOMAINS: &[&str] = &[
    "bbc.com",
    "bbc.co.uk",
    "reuters.com",
    "livemint.com",
    "economictimes.com",
    "theatlantic.com",
    "bloomberg.com",
    "nytimes.com",
    "washingtonpost.com",
    "theguardian.com",
    "wired.com",
    "arstechnica.com",
    "theverge.com",
    "techcrunch.com",
    "cnn.com",
    "axios.com",
    "apnews.com",
    "npr.org",
    "qz.com",
    "vox.com",
    "slate.com",
    "newyorker.com",
    "propublica.org",
    "technologyreview.com",
    "hbr.org",
    "ft.com",
    "economist.com",
    "restofworld.org",
    "dhakatribune.com",
    "firstpost.com",
    "scroll.in",
    "thehindu.com",
    "ndtv.com",
    "moneycontrol.com",
    "protocol.com",
    "semafor.com",
    "puck.news",
    "platformer.news",
];

const SOCIAL_DOMAINS: &[&str] = &[
    "twitter.com",
    "x.com",
    "t.co",
    "reddit.com",
    "instagram.com",
    "linkedin.com",
    "facebook.com",
    "threads.net",
    "mastodon.social",
    "bsky.app",
    "hacker-news.firebaseio.com",
    "news.ycombinator.com",
    "producthunt.com",
];

const VIDEO_DOMAINS: &[&str] = &[
    "youtube.com",
    "vimeo.com",
    "twitch.tv",
    "dailymotion.com",
    "bandcamp.com",
];

const READING_DOMAINS: &[&str] = &[
    "medium.com",
    "substack.com",
    "wordpress.com",
    "wikipedia.org",
    "dev.to",
    "beehiiv.com",
    "goodreads.com",
    "bookshop.org",
    "brainpickings.org",
    "themarginalian.org",
    "ribbonfarm.com",
    "astralcodexten.com",
    "slatestarcodex.com",
    "farnamstreetblog.com",
    "fs.blog",
    "lesswrong.com",
    "waitbutwhy.com",
    "aeon.co",
    "longreads.com",
    "lithub.com",
    "tor.com",
    "lrb.co.uk",
    "theparisreview.org",
    "granta.com",
    "interestingengineering.com",
    "nautil.us",
    "theconversation.com",
    "psyche.co",
    "perell.com",
    "alexdanco.com",
    "raptitude.com",
    "austinkleon.com",
    "invertedpassion.com",
    "pragmaticengineer.com",
    "stratechery.com",
    "eugenewei.com",
    "matthewstrom.com",
    "ben-evans.com",
    "paulgraham.com",
    "sethgodin.com",
    "calnewport.com",
    "lennysnewsletter.com",
    "platformmag.com",
    "noidea.dog",
    "stfj.net",
    "thomasbyttebier.be",
    "pxjournal.org",
];

const SHOPPING_DOMAINS: &[&str] = &[
    "etsy.com",
    "ebay.com",
    "walmart.com",
    "target.com",
    "shopify.com",
    "steampowered.com",
    "shopartshop.com",
    "upwithpaper.com",
];

/// TLDs that usually front a personal or studio site.
const PERSONAL_TLDS: &[&str] = &[
    "io", "co", "me", "cc", "ee", "dev", "xyz", "art", "page", "site", "cool", "work", "land",
    "studio", "agency",
];

/// Page names that read like a personal site's own pages.
const PERSONAL_PAGE_NAMES: &[&str] = &["about", "info", "stamps", "films"];

/// First labels longer than this are treated as an established platform.
const MAX_PERSONAL_LABEL_LEN: usize = 12;

const MAX_PERSONAL_SLUG_LEN: usize = 20;

fn in_set(set: &[&str], domain: &str) -> bool {
    set.contains(&domain)
}

/// Assign exactly one category to a normalized URL.
///
/// The rules run in a fixed order and the first match wins. Several
/// predicates overlap (an `amazon.in/jobs/...` URL is jobs, not shopping),
/// so reordering them changes results.
pub fn classify_category(url: &Url, domain: &str) -> CategoryId {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let path = url.path().to_lowercase();

    if path.ends_with(".pdf") {
        return CategoryId::Reading;
    }

    if in_set(JOBS_DOMAINS, domain)
        || path.contains("/jobs")
        || path.contains("/careers")
        || path.contains("/hiring")
    {
        return CategoryId::Jobs;
    }

    if in_set(EVENTS_DOMAINS, domain) {
        return CategoryId::Events;
    }

    if in_set(TRAVEL_DOMAINS, domain) || domain.ends_with(".lk") {
        return CategoryId::Travel;
    }

    if domain.starts_with("amazon.")
        || in_set(SHOPPING_DOMAINS, domain)
        || path.contains("/dp/")
        || path.contains("/product/")
        || path.contains("/cart")
    {
        return CategoryId::Shopping;
    }

    if in_set(TOOLS_DOMAINS, domain) {
        return CategoryId::Tools;
    }

    if in_set(DESIGN_DOMAINS, domain)
        || domain.ends_with(".design")
        || path.contains("/design/")
        || path.ends_with("/design")
    {
        return CategoryId::Design;
    }

    if in_set(NEWS_DOMAINS, domain) {
        return CategoryId::News;
    }

    if in_set(VIDEO_DOMAINS, domain)
        || host.ends_with(".youtube.com")
        || domain == "open.spotify.com"
        || domain == "spotify.com"
    {
        return CategoryId::Video;
    }

    if in_set(SOCIAL_DOMAINS, domain) {
        return CategoryId::Social;
    }

    if is_reading(&host, &path, domain) {
        return CategoryId::Reading;
    }

    if is_portfolio_path(&host, &path) {
        return CategoryId::Portfolios;
    }

    if looks_like_personal_site(&path, domain) {
        return CategoryId::Portfolios;
    }

    CategoryId::Other
}

fn is_reading(host: &str, path: &str, domain: &str) -> bool {
    in_set(READING_DOMAINS, domain)
        || host.ends_with(".medium.com")
        || host.ends_with(".substack.com")
        || host.contains("wordpress.com")
        || host.contains("blogspot.")
        || path.contains("/blog/")
        || (path.contains("/blog") && path.split('/').count() <= 3)
        || path.contains("/writing/")
        || path.contains("/essay")
        || path.contains("/article/")
}

fn is_portfolio_path(host: &str, path: &str) -> bool {
    path.contains("/portfolio")
        || path.contains("/case-stud")
        || path == "/work"
        || path.starts_with("/work/")
        || path.contains("/projects")
        || path == "/about"
        || (path == "/"
            && (host.contains("studio") || host.contains("agency") || host.contains("creative")))
}

/// Homepages and shallow pages on small domains are usually somebody's site.
fn looks_like_personal_site(path: &str, domain: &str) -> bool {
    let segments = path.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>();

    let personal_tld = domain
        .rsplit_once('.')
        .is_some_and(|(_, tld)| PERSONAL_TLDS.contains(&tld));
    if segments.is_empty() && personal_tld {
        return true;
    }

    let first_label_len = domain.split('.').next().map_or(0, str::len);
    if segments.len() > 1 || first_label_len > MAX_PERSONAL_LABEL_LEN {
        return false;
    }

    let segment = segments.first().copied().unwrap_or_default();
    segment.is_empty()
        || PERSONAL_PAGE_NAMES.contains(&segment)
        || (is_slug(segment) && segment.len() < MAX_PERSONAL_SLUG_LEN)
}

fn is_slug(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
}
