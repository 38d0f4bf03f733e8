//! Golden symbols checked module by module
//!
//! The reference matrices were produced by an independent encoder and read
//! back to the expected codewords. Each symbol is encoded with a forced mask,
//! so any change to codeword placement, masking or format bits shows up here.

use qrsmith::mask::penalty_score;
use qrsmith::{EncodeOptions, Mask, QrCode, QrCodeEcc, Version};

// "HELLO WORLD", Alphanumeric, 1-Q, mask 6
const HELLO_WORLD_1Q_MASK6: [&str; 21] = [
    "#######....#..#######",
    "#.....#.##..#.#.....#",
    "#.###.#..#.##.#.###.#",
    "#.###.#.#####.#.###.#",
    "#.###.#.##.#..#.###.#",
    "#.....#..#..#.#.....#",
    "#######.#.#.#.#######",
    "........##.##........",
    ".#.####.##..###.##.#.",
    "#.####.#....####.###.",
    "..#.#.##...#..##.....",
    "#.##.#...#.##...##...",
    "##.########.###.#####",
    "........#...#..#.#...",
    "#######..##..##..####",
    "#.....#.#.#..#..#.###",
    "#.###.#.##.#..#...###",
    "#.###.#.#.###...#.#..",
    "#.###.#..#....#....##",
    "#.....#.###..###..##.",
    "#######..#.#.......#.",
];

// "Hello, World!", Byte, 7-M, mask 3
const HELLO_WORLD_7M_MASK3: [&str; 45] = [
    "#######.#..##.#####..#..#....#..##..#.#######",
    "#.....#.##.#..#.#.####..###..#.#.#.#..#.....#",
    "#.###.#....###..#.##..#.#.#.#..#...#..#.###.#",
    "#.###.#.##.#.#.###.....#..#.######.##.#.###.#",
    "#.###.#...#.##...#.#######..##....###.#.###.#",
    "#.....#..#.#.##.#...#...##.#.#..##....#.....#",
    "#######.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#.#######",
    "........#..#........#...##.#..######.........",
    "#.##.###.###........#######.#.##.#....#..#.##",
    ".......#...#..#######.#.###..#.#...#....##..#",
    "#.#...##.#####..##..#.#.#.#..#..#####..######",
    "#.###..#.##.#...##..##..##.##..#.#.##.######.",
    "#..##.#.##.##..##.#.##.#.#.#.########.##..#.#",
    "####...##.#.#..#...#......##.#...###.#.#.#.##",
    "#..##.##.###.##.###..##.....##..#.##.#..##.#.",
    "#...##..##.##.#......#.#####..#..#..#..#..##.",
    ".##...##.....##...####.#...##...##.######...#",
    "##.#.......######..#..#...#.......##.#...###.",
    ".###.###..#..##.#.#....#....###....#.#..#..##",
    "#.###..##..###.##..#...##.##..#####..#.#..#..",
    ".##.#####.#...#.#..######...#.##....#####...#",
    ".####...##.##.#.#####...#....#.#..#.#...####.",
    "...##.#.##.##.#...###.#.###..#..#...#.#.#...#",
    "#.#.#...#.#..###..#.#...##..#..#..###...##...",
    "##.#######.#####.#.#######..#######.#####....",
    "#.####.#..#.####.#..##..#.#.##...#..#....#..#",
    ".##...#.......##.#####.#...#.#..#..##.####...",
    ".#...#..#.#..##.##...##.####.#.#.#..#..#..##.",
    "####..##..####....#..##....####.##.###..#..#.",
    "#....#..#.####.#####..#...#..##...#..#.#####.",
    "#.##..#.##.##..#..#.##.##...#.#.....#..#...##",
    "####...##.......##..##.#..##..#..####..##.#..",
    "...#.##....#..#...##..##....#.##...#.#..#...#",
    "..###..#####.#...#..#...#....#....##.#..#.##.",
    "....#.###.##...#.#######.##..#.##...#.#.#...#",
    ".####..##.#.##..##..#..##.#.#..#..#.#..#.....",
    "#..##.###.##....#..######.#.#####...#######..",
    "........#.#..###.####...##..##.....##...#.#.#",
    "#######.#.#...###..##.#.##.#.#..###.#.#.#...#",
    "#.....#.##.#...##.#.#...###..#.#..#.#...###.#",
    "#.###.#...#.##..###.#####....##.#..#########.",
    "#.###.#.#..##.#####..#..#.#####..###..######.",
    "#.###.#.#.#.#.....#..#.#...#..#..##.#.##.....",
    "#.....#..#..###.....###...##.#..###..#.#..#.#",
    "#######.###..###.#..#.......##..#....#..#....",
];

fn hello_1q() -> EncodeOptions {
    EncodeOptions::new().with_error(QrCodeEcc::Quartile)
}

fn hello_7m() -> EncodeOptions {
    EncodeOptions::new()
        .with_version(Version::new(7))
        .with_error(QrCodeEcc::Medium)
}

fn assert_modules(qr: &QrCode, expected: &[&str]) {
    assert_eq!(qr.size(), expected.len());
    for (y, (row, line)) in qr.to_rows().iter().zip(expected).enumerate() {
        let line: Vec<bool> = line.bytes().map(|b| b == b'#').collect();
        for (x, (&dark, &want)) in row.iter().zip(&line).enumerate() {
            assert_eq!(dark, want, "module ({x}, {y})");
        }
        assert_eq!(row.len(), line.len(), "row {y}");
    }
}

#[test]
fn test_golden_version_1() {
    let qr = QrCode::encode("HELLO WORLD", &hello_1q().with_mask(Mask::new(6))).unwrap();
    assert_eq!(qr.designator(), "1-Q");
    assert_eq!(qr.mask(), Mask::new(6));
    assert_modules(&qr, &HELLO_WORLD_1Q_MASK6);
}

#[test]
fn test_golden_version_7() {
    let qr = QrCode::encode("Hello, World!", &hello_7m().with_mask(Mask::new(3))).unwrap();
    assert_eq!(qr.designator(), "7-M");
    assert_eq!(qr.mask(), Mask::new(3));
    assert_modules(&qr, &HELLO_WORLD_7M_MASK3);
}

#[test]
fn test_penalty_per_mask_version_1() {
    let expected = [1027, 1110, 1146, 1041, 1139, 1116, 1034, 1078];
    for (mask, &score) in (0u8..8).zip(&expected) {
        let qr = QrCode::encode("HELLO WORLD", &hello_1q().with_mask(Mask::new(mask))).unwrap();
        assert_eq!(penalty_score(qr.matrix()), score, "mask {mask}");
    }

    let qr = QrCode::encode("HELLO WORLD", &hello_1q()).unwrap();
    assert_eq!(qr.mask(), Mask::new(0));
}

#[test]
fn test_penalty_per_mask_version_7() {
    let expected = [1857, 2204, 2005, 1880, 2058, 2150, 2077, 2107];
    for (mask, &score) in (0u8..8).zip(&expected) {
        let qr = QrCode::encode("Hello, World!", &hello_7m().with_mask(Mask::new(mask))).unwrap();
        assert_eq!(penalty_score(qr.matrix()), score, "mask {mask}");
    }

    let qr = QrCode::encode("Hello, World!", &hello_7m()).unwrap();
    assert_eq!(qr.mask(), Mask::new(0));
}
