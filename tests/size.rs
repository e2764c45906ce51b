use rotalog::{format_size, parse_size};

#[test]
fn parse_size_units() {
    assert_eq!(parse_size("512"), Some(512));
    assert_eq!(parse_size("2048B"), Some(2048));
    assert_eq!(parse_size("64K"), Some(64 * 1024));
    assert_eq!(parse_size("64kb"), Some(64 * 1024));
    assert_eq!(parse_size("5M"), Some(5 * 1024 * 1024));
    assert_eq!(parse_size(" 1G "), Some(1024 * 1024 * 1024));
    assert_eq!(parse_size("1.5K"), Some(1536));
}

#[test]
fn parse_size_invalid() {
    assert_eq!(parse_size("abc"), None);
    assert_eq!(parse_size(""), None);
    assert_eq!(parse_size("-1K"), None);
}

#[test]
fn format_size_units() {
    assert_eq!(format_size(100), "100 B");
    assert_eq!(format_size(1024), "1.00 KB");
    assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
}
