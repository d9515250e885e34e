use crate::header::TEXT_END;
use crate::{COMPILER_VERSION_CODE, FileHeader, FormatError, MAGIC_LINE};

#[test]
fn default_header_layout() {
    let bytes = FileHeader::default().to_bytes();

    assert_eq!(bytes.len(), 61);
    assert!(bytes.starts_with(MAGIC_LINE.as_bytes()));
    assert_eq!(
        &bytes[22..56],
        b"Compiled with SimObjects 0.1.3exp\n".as_slice()
    );
    assert_eq!(bytes[56], TEXT_END);
    assert_eq!(&bytes[57..], &[0xEB, 0x03, 0x00, 0x00]);
}

#[test]
fn write_to_matches_to_bytes() {
    let header = FileHeader::default();
    let mut out = Vec::new();

    let written = header.write_to(&mut out).unwrap();

    assert_eq!(written, 61);
    assert_eq!(out, header.to_bytes());
}

#[test]
fn parse_returns_root_offset() {
    let mut bytes = FileHeader::default().to_bytes();
    bytes.extend_from_slice(b"ROOT");

    let (header, root_offset) = FileHeader::parse(&bytes).unwrap();

    assert_eq!(header, FileHeader::default());
    assert_eq!(root_offset, 61);
    assert!(header.is_current());
}

#[test]
fn parse_accepts_other_version_strings() {
    let header = FileHeader {
        compiler: "60.3".to_string(),
        version_code: 1002,
    };

    let (parsed, root_offset) = FileHeader::parse(&header.to_bytes()).unwrap();

    assert_eq!(parsed.compiler, "60.3");
    assert_eq!(parsed.version_code, 1002);
    assert_eq!(root_offset, header.encoded_len());
    assert!(!parsed.is_current());
    assert_ne!(parsed.version_code, COMPILER_VERSION_CODE);
}

#[test]
fn parse_rejects_missing_magic() {
    let err = FileHeader::parse(b"PNG\r\n\x1a\n").unwrap_err();
    assert!(matches!(err, FormatError::InvalidMagic));
}

#[test]
fn parse_rejects_missing_terminator() {
    let err = FileHeader::parse(b"Simutrans object file\nCompiled with").unwrap_err();
    assert!(matches!(err, FormatError::TruncatedHeader));
}

#[test]
fn parse_rejects_truncated_version_code() {
    let bytes = FileHeader::default().to_bytes();
    let err = FileHeader::parse(&bytes[..59]).unwrap_err();
    assert!(matches!(err, FormatError::TruncatedHeader));
}
