use netlistview::error::SourceLocationError;
use netlistview::source::{LineRemapper, SourceLocation, resolve_source};

#[test]
fn parses_file_and_line() {
    assert_eq!(
        SourceLocation::parse("rtl/cpu.v:42").unwrap(),
        SourceLocation::new("rtl/cpu.v", 42)
    );
    // Column part is ignored.
    assert_eq!(
        SourceLocation::parse("rtl/cpu.v:42.7-42.19").unwrap(),
        SourceLocation::new("rtl/cpu.v", 42)
    );
}

#[test]
fn windows_drive_letters_survive() {
    assert_eq!(
        SourceLocation::parse(r"C:\work\top.sv:8").unwrap(),
        SourceLocation::new(r"C:\work\top.sv", 8)
    );
}

#[test]
fn fallback_after_pipe() {
    // Primary line 0 means "unknown".
    assert_eq!(
        SourceLocation::parse("gen.v:0|orig.v:17").unwrap(),
        SourceLocation::new("orig.v", 17)
    );
    assert_eq!(
        SourceLocation::parse("garbage|orig.v:17").unwrap(),
        SourceLocation::new("orig.v", 17)
    );
    assert_eq!(
        SourceLocation::parse("gen.v:5|orig.v:17").unwrap(),
        SourceLocation::new("gen.v", 5)
    );
}

#[test]
fn errors() {
    assert_eq!(SourceLocation::parse("  "), Err(SourceLocationError::Empty));
    assert!(matches!(
        SourceLocation::parse("nofile"),
        Err(SourceLocationError::MissingLine(_))
    ));
    assert!(matches!(
        SourceLocation::parse("top.v:abc"),
        Err(SourceLocationError::InvalidLine(_))
    ));
    // Both halves broken: the primary error is reported.
    assert!(matches!(
        SourceLocation::parse("nofile|also bad"),
        Err(SourceLocationError::MissingLine(s)) if s == "nofile"
    ));
}

struct Generated;

impl LineRemapper for Generated {
    fn remap(&self, location: &SourceLocation) -> Option<SourceLocation> {
        (location.file.as_str().ends_with(".gen.v"))
            .then(|| SourceLocation::new("design.scala", location.line / 10))
    }
}

#[test]
fn remapper_applies_only_when_it_matches() {
    assert_eq!(
        resolve_source("a.gen.v:120", Some(&Generated)).unwrap(),
        SourceLocation::new("design.scala", 12)
    );
    assert_eq!(
        resolve_source("a.v:120", Some(&Generated)).unwrap(),
        SourceLocation::new("a.v", 120)
    );
    assert_eq!(
        resolve_source("a.v:3", None).unwrap(),
        SourceLocation::new("a.v", 3)
    );
    assert!(resolve_source("", Some(&Generated)).is_err());
}
