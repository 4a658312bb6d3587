//! Social-media domain allowlist.

/// Domains a citation URL must contain to count as a social-media match.
pub const SOCIAL_DOMAINS: [&str; 12] = [
    "facebook.com",
    "fb.com",
    "instagram.com",
    "instagr.am",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "tiktok.com",
    "reddit.com",
    "pinterest.com",
    "snapchat.com",
    "threads.net",
];

/// Case-insensitive substring match against [`SOCIAL_DOMAINS`].
///
/// The whole URL is searched, not just the host.
pub fn is_social_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    SOCIAL_DOMAINS.iter().any(|domain| lower.contains(domain))
}
