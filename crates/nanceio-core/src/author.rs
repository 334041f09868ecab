//! The blog author's profile.
//!
//! Fixed at compile time; the bio card and feed metadata read from [`AUTHOR`].

/// Static author profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorProfile {
    /// Display name.
    pub name: &'static str,

    /// Handle used as the photo's alt text.
    pub handle: &'static str,

    /// City the author lives and works in.
    pub location: &'static str,

    /// Site-relative path of the profile photo.
    pub photo: &'static str,

    /// Twitter profile URL.
    pub twitter: &'static str,

    /// GitHub profile URL.
    pub github: &'static str,
}

/// The site's author.
pub const AUTHOR: AuthorProfile = AuthorProfile {
    name: "Jared Nance",
    handle: "jaredcnance",
    location: "Kansas City",
    photo: "/profile-pic.png",
    twitter: "https://twitter.com/jaredcnance",
    github: "https://github.com/jaredcnance",
};

impl Default for AuthorProfile {
    fn default() -> Self {
        AUTHOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_site_author() {
        assert_eq!(AuthorProfile::default(), AUTHOR);
        assert!(AUTHOR.twitter.ends_with(AUTHOR.handle));
        assert!(AUTHOR.github.ends_with(AUTHOR.handle));
    }
}
