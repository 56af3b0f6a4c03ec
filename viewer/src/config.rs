use slippi_spectator::PlaybackTuning;

/// Asset locations that we need in a few places.
#[derive(Debug)]
pub struct AssetPathsConfig {
    /// Base URL of the static host serving per-character animation tables,
    /// without a trailing slash.
    pub animations_base_url: String,
}

/// Core viewer parameters that we need provided by the embedding shell.
#[derive(Debug)]
pub struct Config {
    pub assets: AssetPathsConfig,
    pub playback: PlaybackTuning,
}
