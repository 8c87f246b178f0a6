use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StarmapError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StarmapError::navigation("x")
            .to_string()
            .contains("navigation error:")
    );
    assert!(
        StarmapError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StarmapError::persistence("x")
            .to_string()
            .contains("persistence error:")
    );
    assert!(
        StarmapError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StarmapError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
