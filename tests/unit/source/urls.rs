use super::*;

fn abr() -> Station {
    Station::new("ABR").unwrap()
}

#[test]
fn base_and_layer_urls() {
    assert_eq!(
        url_base(BaseMap::Topo, &abr(), Range::Short),
        "http://radar.weather.gov/ridge/Overlays/Topo/Short/ABR_Topo_Short.jpg"
    );
    assert_eq!(
        url_layer(Overlay::Cities, &abr(), Range::Short),
        "http://radar.weather.gov/ridge/Overlays/Cities/Short/ABR_City_Short.gif"
    );
    assert_eq!(
        url_layer(Overlay::RangeRings, &abr(), Range::Long),
        "http://radar.weather.gov/ridge/Overlays/RangeRings/Long/ABR_RangeRing_Long.gif"
    );
}

#[test]
fn directory_urls_end_with_slash() {
    let product = Product::new("N0R").unwrap();
    assert_eq!(
        url_radar(&product, &abr()),
        "https://radar.weather.gov/ridge/RadarImg/N0R/ABR/"
    );
    assert_eq!(
        url_legend(&product, &abr()),
        "http://radar.weather.gov/ridge/Legend/N0R/ABR/"
    );
    assert_eq!(
        url_warning(&abr(), Range::Short),
        "http://radar.weather.gov/ridge/Warnings/Short/ABR/"
    );
    assert!(URL_MOSAIC.ends_with('/'));
}

#[test]
fn lite_url_selects_loop_or_still() {
    let product = Product::new("N0R").unwrap();
    assert!(url_lite(&product, &abr(), true).ends_with("/N0R/ABR_loop.gif"));
    assert!(url_lite(&product, &abr(), false).ends_with("/N0R/ABR_0.gif"));
}

#[test]
fn join_concatenates() {
    assert_eq!(join("http://h/dir/", "a_b_c.gif"), "http://h/dir/a_b_c.gif");
}
