//! Cloud layer extraction from sky-condition text
//!
//! Matches a coverage keyword followed, after a run of letters and non-word
//! characters, by a height and the unit "feet". Text that does not match is
//! skipped. Fragments (separated by `;` or newlines) are scanned one at a
//! time so a fragment without a height cannot borrow the next one's.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use crate::app::models::{CloudLayer, Coverage};

static LAYER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<cover>few|scattered|broken|overcast)[a-z\W]+?(?P<height>[0-9]+)\Wfeet")
        .expect("cloud layer pattern is valid")
});

/// Parse all cloud layers, sorted by (height, coverage rank)
pub fn parse_cloud_layers(sky: &str) -> Vec<CloudLayer> {
    let mut layers: Vec<CloudLayer> = sky
        .split(['\n', ';'])
        .flat_map(|fragment| LAYER_RE.captures_iter(fragment))
        .filter_map(|caps| {
            let coverage = caps["cover"].parse::<Coverage>().ok()?;
            let height_feet = caps["height"].parse::<u32>().ok()?;
            Some(CloudLayer::new(coverage, height_feet))
        })
        .collect();

    layers.sort();
    trace!("Parsed {} cloud layers from '{}'", layers.len(), sky);
    layers
}
