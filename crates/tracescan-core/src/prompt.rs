//! The fixed "deep privacy scan" instruction sent alongside the image.

use crate::locale::Locale;

/// Platforms the model is told to search.
const TARGET_PLATFORMS: &str = "Facebook, Instagram, X, TikTok, LinkedIn, Reddit";

/// Build the search instruction for the given report language.
pub fn build_prompt(locale: Locale) -> String {
    format!(
        r#"You are now operating in "Deep Privacy Scan" mode.
Task: search for this image across every corner of the social networks ({platforms}). Search social platforms only; ignore general websites.

Special focus:
1. Look for any "traces" of this image, even in old posts or in groups that may have been archived.
2. Look for impersonating or fake accounts that may use this image as a profile picture (profile pictures are always public, even when the account is private).
3. Look for mentions or links that point to this image appearing in external content.
4. Explain to the user that you cannot technically access private, locked or encrypted accounts, and that you are searching for leaks or archived copies of these images.

Note: if you find links from social platforms, list them precisely. If you find none, explain the technical reasons why the image may not appear (such as strong privacy settings).
Language: respond in {language}."#,
        platforms = TARGET_PLATFORMS,
        language = locale.language_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_scoped_to_social_platforms() {
        let prompt = build_prompt(Locale::Arabic);
        assert!(prompt.contains("Facebook"));
        assert!(prompt.contains("social platforms only"));
    }

    #[test]
    fn test_prompt_disclaims_private_access() {
        let prompt = build_prompt(Locale::English);
        assert!(prompt.contains("cannot technically access private"));
    }

    #[test]
    fn test_prompt_requests_language() {
        assert!(build_prompt(Locale::Arabic).contains("respond in Arabic"));
        assert!(build_prompt(Locale::English).contains("respond in English"));
    }
}
