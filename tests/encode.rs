use pretty_assertions::assert_eq;
use qrmatrix::{encode, EcLevel, EncodeError, ErrorKind, MaskPattern, Symbol, SymbolSpec, Version};

fn render(symbol: &Symbol) -> String {
    let mut out = String::new();
    for row in symbol.rows() {
        out.extend(row.iter().map(|&dark| if dark { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

fn spec<const N: usize>(
    version: Version,
    ec_level: EcLevel,
    mask: u8,
    blocks: [(usize, usize); N],
    ec_codewords: usize,
) -> SymbolSpec {
    SymbolSpec::new(
        version,
        ec_level,
        MaskPattern::new(mask).unwrap(),
        blocks,
        ec_codewords,
    )
    .unwrap()
}

#[test]
fn test_version1_medium() {
    let spec = spec(Version::V1, EcLevel::Medium, 2, [(16, 1)], 10);
    let symbol = encode(b"Hello, world!", &spec).unwrap();
    assert_eq!(render(&symbol), include_str!("golden/v1_medium_mask2.txt"));
}

#[test]
fn test_version2_low() {
    let spec = spec(Version::V2, EcLevel::Low, 7, [(34, 1)], 10);
    let symbol = encode(b"http://srv.prof-morii.net/~lab", &spec).unwrap();
    assert_eq!(symbol.width(), 25);
    assert_eq!(render(&symbol), include_str!("golden/v2_low_mask7.txt"));
}

#[test]
fn test_version5_quality_interleaved() {
    let spec = spec(Version::V5, EcLevel::Quality, 3, [(15, 2), (16, 2)], 72);
    let text = b"abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz";
    let symbol = encode(text, &spec).unwrap();
    assert_eq!(symbol.width(), 37);
    assert_eq!(render(&symbol), include_str!("golden/v5_quality_mask3.txt"));
}

#[test]
fn test_deterministic() {
    let spec = spec(Version::V4, EcLevel::High, 5, [(9, 4)], 64);
    let a = encode(b"same input", &spec).unwrap();
    let b = encode(b"same input", &spec).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_masks_differ_only_in_data() {
    let data = b"mask";
    let a = encode(data, &spec(Version::V1, EcLevel::Low, 0, [(19, 1)], 7)).unwrap();
    let b = encode(data, &spec(Version::V1, EcLevel::Low, 1, [(19, 1)], 7)).unwrap();
    assert!(a != b);
    // upper left position marker is never masked
    for row in 0..7 {
        for col in 0..7 {
            assert_eq!(a.is_dark(row, col), b.is_dark(row, col));
        }
    }
}

#[test]
fn test_format_prefix_readable() {
    for level in [EcLevel::Low, EcLevel::Medium, EcLevel::Quality, EcLevel::High] {
        let spec = spec(Version::V1, level, 6, [(9, 1)], 17);
        let symbol = encode(b"abc", &spec).unwrap();
        let prefix = [
            symbol.is_dark(8, 0),
            symbol.is_dark(8, 1),
            symbol.is_dark(8, 2),
            symbol.is_dark(8, 3),
            symbol.is_dark(8, 4),
        ];
        assert_eq!(
            qrmatrix::FormatInfo::from_prefix(prefix),
            (level, MaskPattern::Diamonds)
        );
    }
}

#[test]
fn test_errors() {
    let small = spec(Version::V1, EcLevel::High, 0, [(9, 1)], 17);
    let err = encode(&[b'x'; 10], &small).unwrap_err();
    assert_eq!(err, EncodeError::CapacityExceeded { bits: 96, capacity: 9 });
    assert_eq!(err.kind(), ErrorKind::DataOverflow);

    // the count field is checked before the capacity
    let err = encode(&[0u8; 256], &small).unwrap_err();
    assert_eq!(err, EncodeError::TextTooLong(256));
    assert_eq!(err.kind(), ErrorKind::DataOverflow);

    let err = SymbolSpec::new(
        Version::V6,
        EcLevel::Low,
        MaskPattern::Checkerboard,
        [(400, 1)],
        18,
    )
    .unwrap_err();
    assert_eq!(
        err,
        EncodeError::SymbolTooSmall {
            available: 1383,
            needed: 3344
        }
    );
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
