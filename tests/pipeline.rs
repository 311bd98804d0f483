use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use exhume::AnalysisError;
use exhume::analysis::{
    AnalysisStep, AnalyzeOptions, ArchetypeId, CategoryId, StepDelay, analyze, analyze_paced,
    analyze_with_progress,
};
use exhume::app::data_io::{export_to_file, write_csv};
use exhume::app::types::DataFormat;

fn numbered(count: usize, template: impl Fn(usize) -> String) -> String {
    (0..count).map(template).collect::<Vec<_>>().join("\n")
}

fn mixed_pile() -> String {
    [
        "Reading list:",
        "- [Ownership](https://doc.rust-lang.org/book/ch04-01-what-is-ownership.html)",
        "https://medium.com/@someone/why-tabs-multiply-9f8e?utm_source=twitter",
        "https://www.nytimes.com/2024/01/01/world/story.html",
        "https://www.amazon.in/dp/B0ABC123/",
        "https://boards.greenhouse.io/acme/jobs/42",
        "https://www.google.com/search?q=how+many+tabs+is+too+many",
        "https://www.reddit.com/r/rust/comments/abc/",
        "https://github.com/rust-lang/rust/issues/1",
        "https://github.com/rust-lang/rust/pulls",
        "https://github.com/tokio-rs/tokio",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://lu.ma/some-meetup",
        "https://www.booking.com/hotel/lk/galle.html",
        "https://dribbble.com/shots/123",
    ]
    .join("\n")
}

#[test]
fn text_without_urls_is_rejected() {
    for text in ["", "no links here", "ftp://files.example.com/x", "www.example.com"] {
        assert_eq!(analyze(text).unwrap_err(), AnalysisError::NoUrls);
    }
}

#[test]
fn every_tab_lands_in_exactly_one_group() {
    let session = analyze(&mixed_pile()).unwrap();
    let grouped: usize = session.category_groups.iter().map(|g| g.count).sum();
    assert_eq!(grouped, session.tabs.len());
    assert_eq!(session.stats.total_tabs, session.tabs.len());
    for group in &session.category_groups {
        assert_eq!(group.count, group.tabs.len());
        assert!(group.tabs.iter().all(|tab| tab.category == group.category.id));
    }
}

#[test]
fn unique_domains_match_distinct_tab_domains() {
    let session = analyze(&mixed_pile()).unwrap();
    let distinct = session
        .tabs
        .iter()
        .map(|tab| tab.domain.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(session.stats.unique_domains, distinct.len());
    assert_eq!(session.stats.repeat_domains, 1);
    assert_eq!(session.stats.unresolved_searches, 1);
}

#[test]
fn mixed_pile_is_classified_rule_by_rule() {
    let session = analyze(&mixed_pile()).unwrap();
    let category_of = |needle: &str| {
        session
            .tabs
            .iter()
            .find(|tab| tab.url.contains(needle))
            .map(|tab| tab.category)
    };
    assert_eq!(category_of("medium.com"), Some(CategoryId::Reading));
    assert_eq!(category_of("nytimes.com"), Some(CategoryId::News));
    assert_eq!(category_of("amazon.in"), Some(CategoryId::Shopping));
    assert_eq!(category_of("greenhouse.io"), Some(CategoryId::Jobs));
    assert_eq!(category_of("reddit.com"), Some(CategoryId::Social));
    assert_eq!(category_of("tokio-rs"), Some(CategoryId::Tools));
    assert_eq!(category_of("youtube.com"), Some(CategoryId::Video));
    assert_eq!(category_of("lu.ma"), Some(CategoryId::Events));
    assert_eq!(category_of("booking.com"), Some(CategoryId::Travel));
    assert_eq!(category_of("dribbble.com"), Some(CategoryId::Design));
}

#[test]
fn tracking_params_never_reach_the_session() {
    let session = analyze(&mixed_pile()).unwrap();
    assert!(session.tabs.iter().all(|tab| !tab.url.contains("utm_")));
    assert!(
        session
            .tabs
            .iter()
            .any(|tab| tab.url == "https://medium.com/@someone/why-tabs-multiply-9f8e")
    );
}

#[test]
fn analysis_is_deterministic() {
    let text = mixed_pile();
    assert_eq!(analyze(&text).unwrap(), analyze(&text).unwrap());
}

#[test]
fn jobs_path_outranks_shopping_domain() {
    let session = analyze("https://amazon.in/jobs/123").unwrap();
    assert_eq!(session.tabs[0].category, CategoryId::Jobs);
    assert_eq!(session.stats.top_categories[0].id, CategoryId::Jobs);
}

#[test]
fn small_piles_are_unburdened() {
    let text = numbered(5, |i| format!("https://www.reddit.com/r/sub{i}"));
    let session = analyze(&text).unwrap();
    assert_eq!(session.personality.archetype, ArchetypeId::Unburdened);
    assert_eq!(session.personality.title, "The Unburdened");
}

#[test]
fn thousand_tab_piles_are_mortab() {
    let text = numbered(1200, |i| format!("https://site{}.com/page/{i}", i % 40));
    let session = analyze(&text).unwrap();
    assert_eq!(session.stats.total_tabs, 1200);
    assert_eq!(session.personality.archetype, ArchetypeId::Mortab);
    assert!(
        session
            .grim_report
            .verdict
            .starts_with("Time failed somewhere past tab 600.")
    );
}

#[test]
fn overrides_switch_exactly_at_ten_and_one_thousand_tabs() {
    let archetype_for = |count: usize| {
        let text = numbered(count, |i| format!("https://site{}.com/page/{i}", i % 7));
        analyze(&text).unwrap().personality.archetype
    };
    assert_eq!(archetype_for(9), ArchetypeId::Unburdened);
    assert!(!archetype_for(10).is_override());
    assert!(!archetype_for(999).is_override());
    assert_eq!(archetype_for(1000), ArchetypeId::Mortab);
}

#[test]
fn reading_heavy_pile_with_a_clear_top_domain() {
    let mut urls = vec![
        "https://medium.com/@x/a".to_string(),
        "https://medium.com/@x/b".to_string(),
        "https://github.com/foo".to_string(),
    ];
    urls.extend((0..8).map(|i| format!("https://writer{i}.org/blog/post-{i}")));
    let session = analyze(&urls.join("\n")).unwrap();

    let top = session.stats.top_domain.as_ref().unwrap();
    assert_eq!(top.domain, "medium.com");
    assert_eq!(top.count, 2);
    assert_eq!(session.category_count(CategoryId::Reading), 10);
    assert_eq!(session.category_count(CategoryId::Tools), 1);
    assert_eq!(session.stats.top_categories[0].id, CategoryId::Reading);
    assert!(!session.personality.archetype.is_override());
    assert!(session.personality.title.ends_with("of the Shadows"));
}

#[test]
fn progress_reports_every_step_in_order() {
    let mut seen = Vec::new();
    analyze_with_progress("https://github.com/a", |step| seen.push(step)).unwrap();
    assert_eq!(seen, AnalysisStep::ALL.to_vec());
}

#[tokio::test]
async fn paced_analysis_matches_the_synchronous_run() {
    let steps = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&steps);
    let options = AnalyzeOptions::immediate().on_step(move |step: AnalysisStep| {
        recorder.lock().unwrap().push(step.index());
    });

    let text = mixed_pile();
    let paced = analyze_paced(&text, options).await.unwrap();
    assert_eq!(paced, analyze(&text).unwrap());
    assert_eq!(*steps.lock().unwrap(), (0..=6).collect::<Vec<_>>());
}

#[tokio::test]
async fn paced_analysis_fails_fast_without_urls() {
    let options = AnalyzeOptions::default().with_step_delay(StepDelay::Adaptive);
    let err = analyze_paced("nothing", options).await.unwrap_err();
    assert_eq!(err, AnalysisError::NoUrls);
}

#[test]
fn csv_export_writes_a_header_and_one_row_per_tab() {
    let session = analyze(&mixed_pile()).unwrap();
    let file = tempfile::NamedTempFile::new().unwrap();
    write_csv(file.reopen().unwrap(), &session.tabs).unwrap();

    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["url", "domain", "category", "category_label", "title"]
    );
    let rows = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(rows.len(), session.tabs.len());
    assert_eq!(&rows[0][0], session.tabs[0].url.as_str());
    assert_eq!(&rows[0][2], session.tabs[0].category.key());
}

#[test]
fn json_export_to_file_round_trips_through_serde() {
    let session = analyze(&mixed_pile()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    export_to_file(path.to_str().unwrap(), &session, DataFormat::Json).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["tabs"].as_array().unwrap().len(), session.tabs.len());
    assert_eq!(value["categoryGroups"].as_array().unwrap().len(), 12);
    assert_eq!(value["grimReport"]["ratio"], session.grim_report.ratio.as_str());
}
