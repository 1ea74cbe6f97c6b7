//! GitHub username validation

/// Longest username GitHub accepts
pub const MAX_USERNAME_LEN: usize = 39;

/// Check a GitHub username: ASCII alphanumerics separated by single hyphens,
/// no leading or trailing hyphen, at most 39 characters.
pub fn is_valid_username(username: &str) -> bool {
    if username.is_empty() || username.len() > MAX_USERNAME_LEN {
        return false;
    }

    let bytes = username.as_bytes();
    if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
        return false;
    }

    bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        && !username.contains("--")
}

/// Extract the username from a profile URL such as `https://github.com/octocat`
pub fn username_from_url(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("github.com/")?;
    let name = rest.split(['/', '?', '#']).next()?;

    (!name.is_empty()).then_some(name)
}

/// Accept either a bare username or a profile URL
pub fn normalize_username(input: &str) -> Option<&str> {
    let input = input.trim();
    let candidate = username_from_url(input).unwrap_or(input);

    is_valid_username(candidate).then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_usernames() {
        assert!(is_valid_username("octocat"));
        assert!(is_valid_username("a"));
        assert!(is_valid_username("rust-lang"));
        assert!(is_valid_username(&"a".repeat(39)));
    }

    #[test]
    fn rejects_malformed_usernames() {
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("-octocat"));
        assert!(!is_valid_username("octocat-"));
        assert!(!is_valid_username("octo--cat"));
        assert!(!is_valid_username("octo_cat"));
        assert!(!is_valid_username("octo/cat"));
        assert!(!is_valid_username(&"a".repeat(40)));
    }

    #[test]
    fn extracts_username_from_profile_urls() {
        assert_eq!(username_from_url("https://github.com/octocat"), Some("octocat"));
        assert_eq!(username_from_url("github.com/octocat/"), Some("octocat"));
        assert_eq!(username_from_url("https://github.com/octocat/hello-world"), Some("octocat"));
        assert_eq!(username_from_url("https://github.com/"), None);
        assert_eq!(username_from_url("octocat"), None);
    }

    #[test]
    fn normalizes_input() {
        assert_eq!(normalize_username(" octocat "), Some("octocat"));
        assert_eq!(normalize_username("https://github.com/octocat"), Some("octocat"));
        assert_eq!(normalize_username("not a user"), None);
    }
}
