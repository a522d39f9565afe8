use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RadarError::invalid_parameter("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        RadarError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RadarError::alignment("x")
            .to_string()
            .contains("alignment error:")
    );
    assert!(RadarError::encode("x").to_string().contains("encode error:"));
    assert!(
        RadarError::malformed_filename("abc")
            .to_string()
            .contains("malformed filename: 'abc'")
    );
}

#[test]
fn fetch_and_listing_name_the_url() {
    let err = RadarError::fetch("http://x/a.gif", anyhow::anyhow!("HTTP 404"));
    let msg = err.to_string();
    assert!(msg.starts_with("fetch error"));
    assert!(msg.contains("http://x/a.gif"));
    assert!(msg.contains("HTTP 404"));

    let err = RadarError::listing("http://x/", anyhow::anyhow!("timed out"));
    assert!(err.to_string().starts_with("listing error"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RadarError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
