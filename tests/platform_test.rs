use profile_urls::platform::{
    classify_profile_url, get_custom_domain_from_email, get_github_uri, get_linkedin_username,
    get_twitter_username, get_wikipedia_uri, is_github_url, is_twitter_url, is_well_known_platform_domain,
    Platform, ProfileType,
};

#[test]
fn test_profile_scenarios() {
    assert_eq!(get_twitter_username("https://x.com/fiatlucy").as_deref(), Some("fiatlucy"));
    assert_eq!(
        get_linkedin_username("https://www.linkedin.com/in/username/foo/bar", None).as_deref(),
        Some("in/username")
    );
    assert_eq!(
        get_linkedin_username("https://www.linkedin.com/company/acme", Some(ProfileType::Person)),
        None
    );
    assert_eq!(
        get_wikipedia_uri("https://de.wikipedia.org/wiki/Elon_Musk").as_deref(),
        Some("en.wikipedia.org/wiki/Elon_Musk")
    );
    assert!(!is_twitter_url("https://twitter.com//"));
}

#[test]
fn test_github_username_length_limit() {
    let url = "https://github.com/too-long-username-that-exceeds-39-characters";
    assert!(is_github_url(url));
    assert_eq!(get_github_uri(url), None);
    assert_eq!(get_github_uri("github.com/rust-lang").as_deref(), Some("github.com/rust-lang"));
}

#[test]
fn test_email_scenarios() {
    assert_eq!(get_custom_domain_from_email("foo@bob.com").as_deref(), Some("bob.com"));
    assert_eq!(get_custom_domain_from_email("foo@GMAIL.com"), None);
    assert_eq!(get_custom_domain_from_email("foo@yahoo.co.uk"), None);
    assert_eq!(get_custom_domain_from_email("foo@bar.baz."), None);
}

#[test]
fn test_classification_and_well_known_agree_on_platform_hosts() {
    let inputs = [
        "https://twitter.com/jack",
        "https://www.linkedin.com/in/someone",
        "https://github.com/octocat",
        "https://www.crunchbase.com/person/someone",
        "https://www.wikidata.org/wiki/Q42",
        "https://en.wikipedia.org/wiki/Rust",
        "https://gravatar.com/someone",
    ];

    for (input, platform) in inputs.iter().zip(Platform::ALL) {
        let matched = classify_profile_url(input).expect("profile URL should classify");
        assert_eq!(matched.platform, platform, "{}", input);
        assert!(is_well_known_platform_domain(input), "{}", input);
    }
}
