use ephemeris::AdaptiveSamplingParameters;
use serde::Deserialize;

/// Settings for a [`Universe`](crate::Universe)
///
/// # Examples
///
/// ```
/// use frame_tree::UniverseConfig;
///
/// let config: UniverseConfig = serde_json::from_str(r#"{ "maxFrameDepth": 16 }"#).unwrap();
/// assert_eq!(config.max_frame_depth, 16);
/// assert_eq!(config.sampling.max_step, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseConfig {
    /// Longest chain of frames followed when resolving a position
    #[serde(default = "default_max_frame_depth")]
    pub max_frame_depth: usize,

    /// Parameters for trajectory sampling
    #[serde(default)]
    pub sampling: AdaptiveSamplingParameters,
}

fn default_max_frame_depth() -> usize {
    64
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            max_frame_depth: default_max_frame_depth(),
            sampling: AdaptiveSamplingParameters::default(),
        }
    }
}
