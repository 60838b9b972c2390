//! Image resolution tiers.

/// Resolution tier of a downloaded or uploaded image.
///
/// The string form doubles as the asset subdirectory name and the
/// `{quality}` slot of the asset filename.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
pub enum Quality {
    /// Standard resolution (`url`)
    #[strum(serialize = "SD")]
    Standard,
    /// High resolution (`hdurl`)
    #[strum(serialize = "HD")]
    High,
}
