use super::*;

#[test]
fn station_is_normalized_and_validated() {
    assert_eq!(Station::new("kabr").unwrap().as_str(), "KABR");
    assert_eq!(Station::new("ABR").unwrap().as_str(), "ABR");
    assert!(Station::new("AB").is_err());
    assert!(Station::new("K/BR").is_err());
    assert!(Station::new("").is_err());
}

#[test]
fn product_must_be_supported() {
    assert_eq!(Product::new("n0r").unwrap().as_str(), "N0R");
    let err = Product::new("XYZ").unwrap_err();
    assert!(matches!(err, RadarError::InvalidParameter(_)));
}

#[test]
fn range_parses_exact_names() {
    assert_eq!("Short".parse::<Range>().unwrap(), Range::Short);
    assert_eq!("Long".parse::<Range>().unwrap(), Range::Long);
    assert!("short".parse::<Range>().is_err());
    assert!("Medium".parse::<Range>().is_err());
}

#[test]
fn overlay_names_map_to_file_stems() {
    assert_eq!(Overlay::Cities.file_stem(), "City");
    assert_eq!(Overlay::RangeRings.file_stem(), "RangeRing");
    assert_eq!("Highways".parse::<Overlay>().unwrap(), Overlay::Highways);
    assert!("Roads".parse::<Overlay>().is_err());
    assert_eq!(
        Overlay::DRAW_ORDER,
        [
            Overlay::County,
            Overlay::Highways,
            Overlay::Cities,
            Overlay::RangeRings
        ]
    );
}

#[test]
fn base_map_only_accepts_topo() {
    assert_eq!("Topo".parse::<BaseMap>().unwrap(), BaseMap::Topo);
    assert!("Satellite".parse::<BaseMap>().is_err());
}

#[test]
fn region_parse_is_case_insensitive() {
    assert_eq!("hawaii".parse::<Region>().unwrap(), Region::Hawaii);
    assert_eq!("NAT".parse::<Region>().unwrap(), Region::Nat);
    assert_eq!(Region::PacSouthwest.code(), "PACSOUTHWEST");
    assert!("ATLANTIS".parse::<Region>().is_err());
}

#[test]
fn frame_limit_rejects_negative_and_clamps() {
    assert!(FrameLimit::new(-1).is_err());
    let limit = FrameLimit::new(2).unwrap();
    assert_eq!(limit.effective(1), 1);
    assert_eq!(limit.effective(10), 2);
    assert_eq!(FrameLimit::new(0).unwrap().effective(10), 0);
}

#[test]
fn station_deserializes_through_validation() {
    let s: Station = serde_json::from_str("\"kabr\"").unwrap();
    assert_eq!(s.as_str(), "KABR");
    assert!(serde_json::from_str::<Station>("\"x\"").is_err());
}
