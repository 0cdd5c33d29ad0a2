use placerank::{
    domain::{
        shared::{
            geo::{Coordinates, Scope},
            pagination::{PAGE_SIZE, PageRequest, PaginatedResponse},
        },
        tag::value_objects::{RANKING_PHRASES, TagName},
    },
    infrastructure::security::sanitizer::{MAX_VOTE_TAG_LENGTH, sanitize, sanitize_tag_list},
};

#[test]
fn every_ranking_phrase_composes_a_tag() {
    for phrase in RANKING_PHRASES {
        let name = TagName::compose(phrase, "Coffee").expect("phrase should be accepted");
        assert_eq!(name.as_str(), format!("{} Coffee", phrase));
    }
}

#[test]
fn tag_keyword_enforces_length_bounds() {
    assert!(TagName::compose("Best", "Tea").is_ok());
    assert!(TagName::compose("Best", "Te").is_err());
    assert!(TagName::compose("Best", &"a".repeat(21)).is_err());
}

#[test]
fn vote_tag_sanitization_truncates_before_lookup() {
    let long = format!("Best {}", "x".repeat(40));
    assert_eq!(sanitize(&long, MAX_VOTE_TAG_LENGTH).chars().count(), MAX_VOTE_TAG_LENGTH);
}

#[test]
fn submitted_tags_are_capped_at_six() {
    let tags: Vec<String> = (0..10).map(|i| format!("Best Tag {}", i)).collect();
    assert_eq!(sanitize_tag_list(&tags).len(), 6);
}

#[test]
fn pagination_defaults_are_safe_and_stable() {
    let p = PageRequest::default();
    assert_eq!(p.page, 1);
    assert_eq!(p.offset(), 0);
    assert_eq!(p.limit(), PAGE_SIZE);

    let page = PaginatedResponse::from_overfetch(vec![0; 21], p);
    assert!(page.has_more);
    assert_eq!(page.items.len(), 20);
}

#[test]
fn scope_requires_context_for_narrow_geographies() {
    assert_eq!(Scope::parse(Some("world"), Some("IN"), None, None), Ok(Scope::World));
    assert!(Scope::parse(Some("country"), None, None, None).is_err());
    assert_eq!(
        Scope::parse(Some("city"), Some("de"), Some(52.52), Some(13.4)),
        Ok(Scope::City {
            country_code: "DE".into(),
            center: Coordinates { lat: 52.52, lng: 13.4 },
        })
    );
}
