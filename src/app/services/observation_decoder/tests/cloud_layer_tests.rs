//! Tests for cloud layer parsing and ordering

use rstest::rstest;

use crate::app::models::{CloudLayer, Coverage};
use crate::app::services::metar_report::MetarReport;
use crate::app::services::metar_report::tests::reference_time;
use crate::app::services::observation_decoder::{decode_report, parse_cloud_layers};

#[rstest]
#[case("")]
#[case("clear")]
#[case("no significant clouds")]
#[case("indefinite ceiling, vertical visibility to 300 feet")]
#[case("cumulus at 3000 feet")]
fn test_no_coverage_keyword_yields_no_layers(#[case] sky: &str) {
    assert!(parse_cloud_layers(sky).is_empty());
}

#[test]
fn test_layers_sorted_by_height_then_rank() {
    let layers = parse_cloud_layers(
        "overcast at 8000 feet; broken clouds at 1200 feet; a few clouds at 1200 feet; overcast at 1200 feet",
    );

    assert_eq!(
        layers,
        vec![
            CloudLayer::new(Coverage::Overcast, 1200),
            CloudLayer::new(Coverage::Broken, 1200),
            CloudLayer::new(Coverage::Few, 1200),
            CloudLayer::new(Coverage::Overcast, 8000),
        ]
    );
}

#[test]
fn test_lower_broken_sorts_before_higher_overcast() {
    let layers = parse_cloud_layers("overcast at 2500 feet\n     broken clouds at 900 feet");

    assert_eq!(layers[0], CloudLayer::new(Coverage::Broken, 900));
    assert_eq!(layers[1], CloudLayer::new(Coverage::Overcast, 2500));
}

#[test]
fn test_sorting_is_idempotent() {
    let mut layers = parse_cloud_layers(
        "scattered clouds at 4000 feet; a few clouds at 2000 feet; overcast at 4000 feet",
    );
    let once = layers.clone();
    layers.sort();
    assert_eq!(layers, once);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let layers = parse_cloud_layers("Scattered clouds at 4000 feet; OVERCAST at 9000 FEET");

    assert_eq!(
        layers,
        vec![
            CloudLayer::new(Coverage::Scattered, 4000),
            CloudLayer::new(Coverage::Overcast, 9000),
        ]
    );
}

#[test]
fn test_fragment_without_height_is_excluded() {
    let layers = parse_cloud_layers("broken clouds at unknown height; a few clouds at 3500 feet");

    assert_eq!(layers, vec![CloudLayer::new(Coverage::Few, 3500)]);
}

#[test]
fn test_cloud_types_between_keyword_and_height() {
    let layers = parse_cloud_layers("broken cumulonimbus at 2000 feet; a few towering cumulus at 1500 feet");

    assert_eq!(
        layers,
        vec![
            CloudLayer::new(Coverage::Few, 1500),
            CloudLayer::new(Coverage::Broken, 2000),
        ]
    );
}

#[test]
fn test_few_scattered_broken_from_raw_report() {
    let report =
        MetarReport::parse_at("EGLL 161150Z 24012KT 9999 FEW035 SCT090 BKN150 15/08 Q1013", reference_time())
            .unwrap();

    let decoded = decode_report(&report);

    assert_eq!(
        decoded.observation.cloud_layers(),
        &[
            CloudLayer::new(Coverage::Few, 3500),
            CloudLayer::new(Coverage::Scattered, 9000),
            CloudLayer::new(Coverage::Broken, 15000),
        ]
    );
}
