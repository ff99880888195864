use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlipbookError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlipbookError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        FlipbookError::capture("x")
            .to_string()
            .contains("capture error:")
    );
    assert!(
        FlipbookError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        FlipbookError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlipbookError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
