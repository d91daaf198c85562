use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        DocmotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        DocmotionError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        DocmotionError::timeline("x")
            .to_string()
            .contains("timeline error:")
    );
    assert!(
        DocmotionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = DocmotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
