use atelier_ml::Style;

#[test]
fn catalog_is_ordered_and_stable() {
    let first = Style::catalog();
    let second = Style::catalog();

    assert_eq!(first, second);
    assert_eq!(first.len(), 7);
    assert_eq!(first.first(), Some(&Style::default_style()));
}

#[test]
fn identifiers_round_trip_through_display() -> anyhow::Result<()> {
    for style in Style::catalog() {
        assert_eq!(Style::parse(&style.to_string())?, style);
    }
    Ok(())
}
