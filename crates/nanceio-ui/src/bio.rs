//! Author bio card.

use nanceio_core::AuthorProfile;

use crate::style::{inline_style, rhythm};

/// Bio card: the author's photo next to a short paragraph with social links.
///
/// Renders the same block every time; sizing is fixed in vertical rhythm units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bio {
    profile: AuthorProfile,
}

impl Bio {
    /// Create a bio card for the given profile.
    #[must_use]
    pub fn new(profile: &AuthorProfile) -> Self {
        Self { profile: *profile }
    }

    /// The profile this card renders.
    #[must_use]
    pub fn profile(&self) -> &AuthorProfile {
        &self.profile
    }

    /// Render the card as an HTML fragment.
    #[must_use]
    pub fn render(&self) -> String {
        let p = &self.profile;

        let container_style = inline_style([
            ("display", "flex".to_string()),
            ("margin-bottom", rhythm(2.5)),
        ]);
        let image_style = inline_style([
            ("margin-right", rhythm(0.5)),
            ("margin-bottom", "0".to_string()),
            ("margin-top", rhythm(0.9)),
            ("width", rhythm(5.0)),
            ("height", rhythm(5.0)),
            ("border-radius", "50%".to_string()),
        ]);

        format!(
            r#"<div class="bio" style="{container_style}">
    <img src="{photo}" alt="{handle}" style="{image_style}">
    <p>My name is <strong>{name}</strong>, I live and work in {location}. I enjoy building things and sharing what I learn along the way. You can follow me on <a href="{twitter}">Twitter</a> or <a href="{github}">GitHub</a></p>
</div>"#,
            photo = p.photo,
            handle = p.handle,
            name = p.name,
            location = p.location,
            twitter = p.twitter,
            github = p.github,
        )
    }
}

#[cfg(test)]
mod tests {
    use nanceio_core::AUTHOR;

    use super::*;

    fn hrefs(html: &str) -> Vec<&str> {
        html.split("<a href=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .collect()
    }

    #[test]
    fn test_bio_has_exactly_two_social_links() {
        let html = Bio::default().render();
        assert_eq!(
            hrefs(&html),
            vec![
                "https://twitter.com/jaredcnance",
                "https://github.com/jaredcnance"
            ]
        );
        assert_eq!(html.matches("<a ").count(), 2);
    }

    #[test]
    fn test_bio_mentions_name_and_city() {
        let html = Bio::default().render();
        assert!(html.contains("<strong>Jared Nance</strong>"));
        assert!(html.contains("Kansas City"));
    }

    #[test]
    fn test_bio_photo() {
        let html = Bio::new(&AUTHOR).render();
        assert!(html.contains(r#"src="/profile-pic.png""#));
        assert!(html.contains(r#"alt="jaredcnance""#));
        assert!(html.contains("width: 8.75rem;"));
        assert!(html.contains("border-radius: 50%;"));
    }

    #[test]
    fn test_bio_render_is_stable() {
        let bio = Bio::default();
        assert_eq!(bio.render(), bio.render());
        assert_eq!(bio.profile(), &AUTHOR);
    }
}
