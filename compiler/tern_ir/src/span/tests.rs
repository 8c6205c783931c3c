use super::*;

#[test]
fn test_span_merge() {
    let a = Span::new(3, 5);
    let b = Span::new(10, 12);
    assert_eq!(a.merge(b), Span::new(3, 12));
    assert_eq!(b.merge(a), Span::new(3, 12));
}

#[test]
fn test_span_from_range_round_trips() {
    let span = Span::from_range(4..9);
    assert_eq!(span.to_range(), 4..9);
    assert!(!span.is_empty());
    assert!(Span::point(7).is_empty());
}

#[test]
fn test_span_display() {
    assert_eq!(Span::new(1, 4).to_string(), "1..4");
}
