//! Inline style helpers shared by the components.

/// Base line height in `rem`; one unit of vertical rhythm.
pub const BASE_LINE_HEIGHT_REM: f64 = 1.75;

/// Vertical rhythm: `n` base line heights, as a CSS length.
///
/// ```
/// assert_eq!(nanceio_ui::rhythm(1.0), "1.75rem");
/// assert_eq!(nanceio_ui::rhythm(0.5), "0.875rem");
/// ```
pub fn rhythm(n: f64) -> String {
    let rem = (n * BASE_LINE_HEIGHT_REM * 10_000.0).round() / 10_000.0;
    format!("{rem}rem")
}

/// Render `(property, value)` pairs as an inline `style` attribute value.
pub fn inline_style<'a, I, V>(declarations: I) -> String
where
    I: IntoIterator<Item = (&'a str, V)>,
    V: AsRef<str>,
{
    declarations
        .into_iter()
        .map(|(property, value)| format!("{property}: {};", value.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}
