use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ChoroError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ChoroError::input("x").to_string().contains("input error:"));
    assert!(ChoroError::render("x").to_string().contains("render error:"));
    assert!(ChoroError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ChoroError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
