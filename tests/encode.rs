use proptest::prelude::*;
use qirust::bitstream::build_data_codewords;
use qirust::matrix::{Module, ModuleMatrix};
use qirust::reed_solomon::add_ecc_and_interleave;
use qirust::{tables, EncodeOptions, Mask, QrCode, QrCodeEcc, QrError, QrSegment, QrSegmentMode, Version};

const ALL_ECLS: [QrCodeEcc; 4] = [QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High];

// Reads the codeword stream back out of a symbol by walking the placement
// order over a grid holding only the function patterns.
fn read_codewords(qr: &QrCode) -> Vec<u8> {
    let grid = ModuleMatrix::with_function_patterns(qr.version(), qr.error_correction_level(), qr.mask());
    let size = qr.size();
    let mut bits = Vec::new();
    let mut upward = true;
    let mut right = size - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for x in [right, right - 1] {
                if grid.get(x as usize, y as usize) == Module::Unassigned {
                    bits.push(qr.get_module(x, y) ^ qr.mask().inverts(x as usize, y as usize));
                }
            }
        }
        upward = !upward;
        right -= 2;
    }
    bits.chunks_exact(8)
        .map(|byte| byte.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
        .collect()
}

fn assert_finder_at(qr: &QrCode, left: i32, top: i32) {
    for dy in 0..7 {
        for dx in 0..7 {
            let dist = (dx - 3i32).abs().max((dy - 3i32).abs());
            assert_eq!(qr.get_module(left + dx, top + dy), dist != 2, "finder at ({}, {})", left, top);
        }
    }
}

#[test]
fn test_hello_world_medium_mask_0() {
    let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Medium, Mask::new(0)).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Alphanumeric);
    assert_eq!(qr.version(), Version::new(1));
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.read_format_info(), Some((QrCodeEcc::Medium, Mask::new(0))));

    let text = qirust::encode("HELLO WORLD", QrCodeEcc::Medium, 0, "1", "0").unwrap();
    assert_eq!(text.lines().count(), 21);
    assert!(text.lines().all(|line| line.len() == 21));
}

#[test]
fn test_hello_world_known_grid() {
    // Data 20 5B 0B 78 D1 72 DC 4D 43 40 EC 11 EC 11 EC 11, ECC C4 23 27 77 EB D7 E7 E2 5D 17.
    let expected = [
        "#######...#.#.#######",
        "#.....#.###...#.....#",
        "#.###.#...#.#.#.###.#",
        "#.###.#...#.#.#.###.#",
        "#.###.#.#.###.#.###.#",
        "#.....#..###..#.....#",
        "#######.#.#.#.#######",
        ".....................",
        "#.#.#.#..#..#...#..#.",
        ".####...#..#....#...#",
        "...#######.#..#.##...",
        "####.#.##..###.#.###.",
        ".#..####.#.#..###.#.#",
        "........#.#...#...#.#",
        "#######.....#..#.##..",
        "#.....#..##...##.#...",
        "#.###.#.##..#.#######",
        "#.###.#...##.#.#...#.",
        "#.###.#.####.###.#..#",
        "#.....#....###...#.##",
        "#######.##.#.###....#",
    ];
    let text = qirust::encode("HELLO WORLD", QrCodeEcc::Medium, 0, "#", ".").unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), expected.len());
    for (y, (row, want)) in rows.iter().zip(expected.iter()).enumerate() {
        assert_eq!(row, want, "row {}", y);
    }
}

#[test]
fn test_empty_string_low_mask_1() {
    let qr = QrCode::encode_text("", QrCodeEcc::Low, Mask::new(1)).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Numeric);
    assert_eq!(qr.version(), Version::new(1));
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.read_format_info(), Some((QrCodeEcc::Low, Mask::new(1))));
    for i in 8..13 {
        assert_eq!(qr.get_module(6, i), i % 2 == 0);
        assert_eq!(qr.get_module(i, 6), i % 2 == 0);
    }
}

#[test]
fn test_numeric_capacity_boundary() {
    let qr = QrCode::encode_text(&"9".repeat(7089), QrCodeEcc::Low, Mask::new(0)).unwrap();
    assert_eq!(qr.version(), Version::MAX);
    assert_eq!(qr.size(), 177);

    let err = QrCode::encode_text(&"9".repeat(7090), QrCodeEcc::Low, Mask::new(0)).unwrap_err();
    assert!(matches!(err, QrError::CapacityExceeded { .. }));
    assert!(matches!(
        qirust::encode(&"9".repeat(7090), QrCodeEcc::Low, 0, "#", " "),
        Err(QrError::CapacityExceeded { .. })
    ));
}

#[test]
fn test_invalid_mask() {
    assert_eq!(qirust::encode("HELLO", QrCodeEcc::Low, 8, "#", " "), Err(QrError::InvalidMask(8)));
    let opts = EncodeOptions::new().with_mask(255);
    assert_eq!(qirust::encode_with("HELLO", &opts), Err(QrError::InvalidMask(255)));
}

#[test]
fn test_format_info_round_trips_all_combinations() {
    for ecl in ALL_ECLS {
        for m in 0..8 {
            let qr = QrCode::encode_text("01234", ecl, Mask::new(m)).unwrap();
            assert_eq!(qr.read_format_info(), Some((ecl, Mask::new(m))));
        }
    }
}

#[test]
fn test_version_info_round_trips() {
    for v in 7..=40u8 {
        let ver = Version::new(v);
        let countbits = usize::from(QrSegmentMode::Byte.num_char_count_bits(ver));
        // The longest byte payload that still fits forces exactly this version.
        let len = (tables::bit_capacity(ver, QrCodeEcc::Low) - 4 - countbits) / 8;
        let qr = QrCode::encode_binary(&vec![0x41; len], QrCodeEcc::Low, Mask::new(v % 8)).unwrap();
        assert_eq!(qr.version(), ver);
        assert_eq!(qr.read_version_info(), Some(ver));
    }
}

#[test]
fn test_finder_patterns_are_identical() {
    let digits = "8".repeat(500);
    let letters = "Z".repeat(1500);
    let inputs: [&str; 5] = ["", "HELLO WORLD", "hello, world", &digits, &letters];
    for (i, text) in inputs.iter().enumerate() {
        for ecl in ALL_ECLS {
            let qr = QrCode::encode_text(text, ecl, Mask::new((i * 3) as u8 % 8)).unwrap();
            let far = qr.size() - 7;
            assert_finder_at(&qr, 0, 0);
            assert_finder_at(&qr, far, 0);
            assert_finder_at(&qr, 0, far);
            assert!(qr.get_module(8, qr.size() - 8));
        }
    }
}

#[test]
fn test_placed_codewords_read_back() {
    let cases = [
        ("HELLO WORLD", QrCodeEcc::Medium, 0),
        ("https://example.com/?q=\u{e9}t\u{e9}", QrCodeEcc::High, 5),
        ("31415926535897932384626433832795", QrCodeEcc::Quartile, 6),
        ("THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG 0123456789 $%*+-./:", QrCodeEcc::Low, 7),
    ];
    for (text, ecl, m) in cases {
        let qr = QrCode::encode_text(text, ecl, Mask::new(m)).unwrap();
        let seg = QrSegment::from_text(text);
        let data = build_data_codewords(&seg, qr.version(), ecl).unwrap();
        let expected = add_ecc_and_interleave(&data, qr.version(), ecl).unwrap();
        assert_eq!(read_codewords(&qr), expected, "{:?}", text);
    }
}

#[test]
fn test_large_symbol_reads_back() {
    let text = "Lorem ipsum dolor sit amet, ".repeat(40);
    let qr = QrCode::encode_text(&text, QrCodeEcc::Medium, Mask::new(3)).unwrap();
    assert!(qr.version().value() >= 20);
    let data = build_data_codewords(&QrSegment::from_text(&text), qr.version(), QrCodeEcc::Medium).unwrap();
    let expected = add_ecc_and_interleave(&data, qr.version(), QrCodeEcc::Medium).unwrap();
    assert_eq!(read_codewords(&qr), expected);
    assert_eq!(qr.read_version_info(), Some(qr.version()));
}

#[test]
fn test_byte_mode_counts_utf8_octets() {
    // 17 two-octet characters need 34 octets, beyond the 28 data codewords of version 2-M.
    let text = "\u{e9}".repeat(17);
    let qr = QrCode::encode_text(&text, QrCodeEcc::Medium, Mask::new(0)).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Byte);
    assert_eq!(qr.version(), Version::new(3));
}

proptest! {
    #[test]
    fn encoding_is_deterministic(text in "\\PC{0,80}", m in 0u8..8) {
        let a = QrCode::encode_text(&text, QrCodeEcc::Quartile, Mask::new(m)).unwrap();
        let b = QrCode::encode_text(&text, QrCodeEcc::Quartile, Mask::new(m)).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.size(), i32::from(a.version().value()) * 4 + 17);
    }

    #[test]
    fn digit_strings_are_numeric(text in "[0-9]{0,200}") {
        let qr = QrCode::encode_text(&text, QrCodeEcc::Low, Mask::new(0)).unwrap();
        prop_assert_eq!(qr.mode(), QrSegmentMode::Numeric);
    }

    #[test]
    fn one_lowercase_letter_forces_byte_mode(prefix in "[0-9]{0,50}", suffix in "[0-9A-Z]{0,50}", c in "[a-z#]") {
        let text = format!("{}{}{}", prefix, c, suffix);
        prop_assert_eq!(QrSegment::classify(&text), QrSegmentMode::Byte);
    }
}
