//! Deterministic asset filenames.

use apod_core::Quality;

// `#` would start a URL fragment when the name is used as a link.
const HYPHENATED: [char; 11] = [' ', '?', '\\', '/', '+', '%', '!', ',', ';', ':', '#'];

/// Make a title safe for use in a filename.
///
/// Upper-cases the title, turns path and punctuation characters into
/// hyphens and drops apostrophes.
///
/// # Examples
///
/// ```
/// use apod_gallery::normalize_title;
///
/// assert_eq!(normalize_title("Jupiter's Moons: A Night?"), "JUPITERS-MOONS--A-NIGHT-");
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| *c != '\'')
        .map(|c| if HYPHENATED.contains(&c) { '-' } else { c })
        .collect::<String>()
        .to_uppercase()
}

/// `Nasa-APOD-{date}-{quality}-{title}.jpg`
pub fn asset_file_name(date: &str, quality: Quality, title: &str) -> String {
    format!("Nasa-APOD-{}-{}-{}.jpg", date, quality, normalize_title(title))
}
