//! Static reference tables from ISO/IEC 18004.
//!
//! Everything here is read-only data indexed by version and error correction
//! level; the lookup functions below are the only way the encoder reads it.

use crate::qrcode::{QrCodeEcc, Version};

/// Error correction block layout for one version and level.
///
/// Each triple is `(block_count, total_codewords_per_block, data_codewords_per_block)`.
pub type RsBlockSpec = &'static [(u8, u8, u8)];

/// Returns the block layout for the given version and level.
pub fn rs_blocks(ver: Version, ecl: QrCodeEcc) -> RsBlockSpec {
    RS_BLOCKS[usize::from(ver.value()) - 1][ecl.ordinal()]
}

/// Returns the number of data bits a symbol of this version and level can carry.
pub fn bit_capacity(ver: Version, ecl: QrCodeEcc) -> usize {
    usize::from(BIT_CAPACITY[ecl.ordinal()][usize::from(ver.value())])
}

/// Returns the number of data codewords summed over all blocks.
pub fn data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    rs_blocks(ver, ecl)
        .iter()
        .map(|&(count, _, data)| usize::from(count) * usize::from(data))
        .sum()
}

/// Returns the number of data and error correction codewords summed over all blocks.
pub fn total_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    rs_blocks(ver, ecl)
        .iter()
        .map(|&(count, total, _)| usize::from(count) * usize::from(total))
        .sum()
}

/// Returns the alignment pattern centre coordinates, ascending. Empty for version 1.
pub fn alignment_pattern_positions(ver: Version) -> &'static [u8] {
    ALIGNMENT_PATTERN_POSITIONS[usize::from(ver.value()) - 1]
}

/// Returns the cached generator polynomial of the given degree, if there is one.
///
/// Coefficients are listed from the highest degree down; the leading one is always 1.
pub fn cached_generator(degree: usize) -> Option<&'static [u8]> {
    GENERATOR_POLYNOMIALS
        .iter()
        .find(|&&(d, _)| d == degree)
        .map(|&(_, poly)| poly)
}

// Index: [ecl.ordinal()][version]
static BIT_CAPACITY: [[u16; 41]; 4] = [
    [
        0, 152, 272, 440, 640, 864, 1088, 1248, 1552, 1856, 2192, 2592, 2960, 3424, 3688, 4184,
        4712, 5176, 5768, 6360, 6888, 7456, 8048, 8752, 9392, 10208, 10960, 11744, 12248, 13048,
        13880, 14744, 15640, 16568, 17528, 18448, 19472, 20528, 21616, 22496, 23648,
    ], // Low
    [
        0, 128, 224, 352, 512, 688, 864, 992, 1232, 1456, 1728, 2032, 2320, 2672, 2920, 3320, 3624,
        4056, 4504, 5016, 5352, 5712, 6256, 6880, 7312, 8000, 8496, 9024, 9544, 10136, 10984,
        11640, 12328, 13048, 13800, 14496, 15312, 15936, 16816, 17728, 18672,
    ], // Medium
    [
        0, 104, 176, 272, 384, 496, 608, 704, 880, 1056, 1232, 1440, 1648, 1952, 2088, 2360, 2600,
        2936, 3176, 3560, 3880, 4096, 4544, 4912, 5312, 5744, 6032, 6464, 6968, 7288, 7880, 8264,
        8920, 9368, 9848, 10288, 10832, 11408, 12016, 12656, 13328,
    ], // Quartile
    [
        0, 72, 128, 208, 288, 368, 480, 528, 688, 800, 976, 1120, 1264, 1440, 1576, 1784, 2024,
        2264, 2504, 2728, 3080, 3248, 3536, 3712, 4112, 4304, 4768, 5024, 5288, 5608, 5960, 6344,
        6760, 7208, 7688, 7888, 8432, 8768, 9136, 9776, 10208,
    ], // High
];

// Index: [version - 1][ecl.ordinal()]
static RS_BLOCKS: [[RsBlockSpec; 4]; 40] = [
    // Version 1
    [
        &[(1, 26, 19)],
        &[(1, 26, 16)],
        &[(1, 26, 13)],
        &[(1, 26, 9)],
    ],
    // Version 2
    [
        &[(1, 44, 34)],
        &[(1, 44, 28)],
        &[(1, 44, 22)],
        &[(1, 44, 16)],
    ],
    // Version 3
    [
        &[(1, 70, 55)],
        &[(1, 70, 44)],
        &[(2, 35, 17)],
        &[(2, 35, 13)],
    ],
    // Version 4
    [
        &[(1, 100, 80)],
        &[(2, 50, 32)],
        &[(2, 50, 24)],
        &[(4, 25, 9)],
    ],
    // Version 5
    [
        &[(1, 134, 108)],
        &[(2, 67, 43)],
        &[(2, 33, 15), (2, 34, 16)],
        &[(2, 33, 11), (2, 34, 12)],
    ],
    // Version 6
    [
        &[(2, 86, 68)],
        &[(4, 43, 27)],
        &[(4, 43, 19)],
        &[(4, 43, 15)],
    ],
    // Version 7
    [
        &[(2, 98, 78)],
        &[(4, 49, 31)],
        &[(2, 32, 14), (4, 33, 15)],
        &[(4, 39, 13), (1, 40, 14)],
    ],
    // Version 8
    [
        &[(2, 121, 97)],
        &[(2, 60, 38), (2, 61, 39)],
        &[(4, 40, 18), (2, 41, 19)],
        &[(4, 40, 14), (2, 41, 15)],
    ],
    // Version 9
    [
        &[(2, 146, 116)],
        &[(3, 58, 36), (2, 59, 37)],
        &[(4, 36, 16), (4, 37, 17)],
        &[(4, 36, 12), (4, 37, 13)],
    ],
    // Version 10
    [
        &[(2, 86, 68), (2, 87, 69)],
        &[(4, 69, 43), (1, 70, 44)],
        &[(6, 43, 19), (2, 44, 20)],
        &[(6, 43, 15), (2, 44, 16)],
    ],
    // Version 11
    [
        &[(4, 101, 81)],
        &[(1, 80, 50), (4, 81, 51)],
        &[(4, 50, 22), (4, 51, 23)],
        &[(3, 36, 12), (8, 37, 13)],
    ],
    // Version 12
    [
        &[(2, 116, 92), (2, 117, 93)],
        &[(6, 58, 36), (2, 59, 37)],
        &[(4, 46, 20), (6, 47, 21)],
        &[(7, 42, 14), (4, 43, 15)],
    ],
    // Version 13
    [
        &[(4, 133, 107)],
        &[(8, 59, 37), (1, 60, 38)],
        &[(8, 44, 20), (4, 45, 21)],
        &[(12, 33, 11), (4, 34, 12)],
    ],
    // Version 14
    [
        &[(3, 145, 115), (1, 146, 116)],
        &[(4, 64, 40), (5, 65, 41)],
        &[(11, 36, 16), (5, 37, 17)],
        &[(11, 36, 12), (5, 37, 13)],
    ],
    // Version 15
    [
        &[(5, 109, 87), (1, 110, 88)],
        &[(5, 65, 41), (5, 66, 42)],
        &[(5, 54, 24), (7, 55, 25)],
        &[(11, 36, 12), (7, 37, 13)],
    ],
    // Version 16
    [
        &[(5, 122, 98), (1, 123, 99)],
        &[(7, 73, 45), (3, 74, 46)],
        &[(15, 43, 19), (2, 44, 20)],
        &[(3, 45, 15), (13, 46, 16)],
    ],
    // Version 17
    [
        &[(1, 135, 107), (5, 136, 108)],
        &[(10, 74, 46), (1, 75, 47)],
        &[(1, 50, 22), (15, 51, 23)],
        &[(2, 42, 14), (17, 43, 15)],
    ],
    // Version 18
    [
        &[(5, 150, 120), (1, 151, 121)],
        &[(9, 69, 43), (4, 70, 44)],
        &[(17, 50, 22), (1, 51, 23)],
        &[(2, 42, 14), (19, 43, 15)],
    ],
    // Version 19
    [
        &[(3, 141, 113), (4, 142, 114)],
        &[(3, 70, 44), (11, 71, 45)],
        &[(17, 47, 21), (4, 48, 22)],
        &[(9, 39, 13), (16, 40, 14)],
    ],
    // Version 20
    [
        &[(3, 135, 107), (5, 136, 108)],
        &[(3, 67, 41), (13, 68, 42)],
        &[(15, 54, 24), (5, 55, 25)],
        &[(15, 43, 15), (10, 44, 16)],
    ],
    // Version 21
    [
        &[(4, 144, 116), (4, 145, 117)],
        &[(17, 68, 42)],
        &[(17, 50, 22), (6, 51, 23)],
        &[(19, 46, 16), (6, 47, 17)],
    ],
    // Version 22
    [
        &[(2, 139, 111), (7, 140, 112)],
        &[(17, 74, 46)],
        &[(7, 54, 24), (16, 55, 25)],
        &[(34, 37, 13)],
    ],
    // Version 23
    [
        &[(4, 151, 121), (5, 152, 122)],
        &[(4, 75, 47), (14, 76, 48)],
        &[(11, 54, 24), (14, 55, 25)],
        &[(16, 45, 15), (14, 46, 16)],
    ],
    // Version 24
    [
        &[(6, 147, 117), (4, 148, 118)],
        &[(6, 73, 45), (14, 74, 46)],
        &[(11, 54, 24), (16, 55, 25)],
        &[(30, 46, 16), (2, 47, 17)],
    ],
    // Version 25
    [
        &[(8, 132, 106), (4, 133, 107)],
        &[(8, 75, 47), (13, 76, 48)],
        &[(7, 54, 24), (22, 55, 25)],
        &[(22, 45, 15), (13, 46, 16)],
    ],
    // Version 26
    [
        &[(10, 142, 114), (2, 143, 115)],
        &[(19, 74, 46), (4, 75, 47)],
        &[(28, 50, 22), (6, 51, 23)],
        &[(33, 46, 16), (4, 47, 17)],
    ],
    // Version 27
    [
        &[(8, 152, 122), (4, 153, 123)],
        &[(22, 73, 45), (3, 74, 46)],
        &[(8, 53, 23), (26, 54, 24)],
        &[(12, 45, 15), (28, 46, 16)],
    ],
    // Version 28
    [
        &[(3, 147, 117), (10, 148, 118)],
        &[(3, 73, 45), (23, 74, 46)],
        &[(4, 54, 24), (31, 55, 25)],
        &[(11, 45, 15), (31, 46, 16)],
    ],
    // Version 29
    [
        &[(7, 146, 116), (7, 147, 117)],
        &[(21, 73, 45), (7, 74, 46)],
        &[(1, 53, 23), (37, 54, 24)],
        &[(19, 45, 15), (26, 46, 16)],
    ],
    // Version 30
    [
        &[(5, 145, 115), (10, 146, 116)],
        &[(19, 75, 47), (10, 76, 48)],
        &[(15, 54, 24), (25, 55, 25)],
        &[(23, 45, 15), (25, 46, 16)],
    ],
    // Version 31
    [
        &[(13, 145, 115), (3, 146, 116)],
        &[(2, 74, 46), (29, 75, 47)],
        &[(42, 54, 24), (1, 55, 25)],
        &[(23, 45, 15), (28, 46, 16)],
    ],
    // Version 32
    [
        &[(17, 145, 115)],
        &[(10, 74, 46), (23, 75, 47)],
        &[(10, 54, 24), (35, 55, 25)],
        &[(19, 45, 15), (35, 46, 16)],
    ],
    // Version 33
    [
        &[(17, 145, 115), (1, 146, 116)],
        &[(14, 74, 46), (21, 75, 47)],
        &[(29, 54, 24), (19, 55, 25)],
        &[(11, 45, 15), (46, 46, 16)],
    ],
    // Version 34
    [
        &[(13, 145, 115), (6, 146, 116)],
        &[(14, 74, 46), (23, 75, 47)],
        &[(44, 54, 24), (7, 55, 25)],
        &[(59, 46, 16), (1, 47, 17)],
    ],
    // Version 35
    [
        &[(12, 151, 121), (7, 152, 122)],
        &[(12, 75, 47), (26, 76, 48)],
        &[(39, 54, 24), (14, 55, 25)],
        &[(22, 45, 15), (41, 46, 16)],
    ],
    // Version 36
    [
        &[(6, 151, 121), (14, 152, 122)],
        &[(6, 75, 47), (34, 76, 48)],
        &[(46, 54, 24), (10, 55, 25)],
        &[(2, 45, 15), (64, 46, 16)],
    ],
    // Version 37
    [
        &[(17, 152, 122), (4, 153, 123)],
        &[(29, 74, 46), (14, 75, 47)],
        &[(49, 54, 24), (10, 55, 25)],
        &[(24, 45, 15), (46, 46, 16)],
    ],
    // Version 38
    [
        &[(4, 152, 122), (18, 153, 123)],
        &[(13, 74, 46), (32, 75, 47)],
        &[(48, 54, 24), (14, 55, 25)],
        &[(42, 45, 15), (32, 46, 16)],
    ],
    // Version 39
    [
        &[(20, 147, 117), (4, 148, 118)],
        &[(40, 75, 47), (7, 76, 48)],
        &[(43, 54, 24), (22, 55, 25)],
        &[(10, 45, 15), (67, 46, 16)],
    ],
    // Version 40
    [
        &[(19, 148, 118), (6, 149, 119)],
        &[(18, 75, 47), (31, 76, 48)],
        &[(34, 54, 24), (34, 55, 25)],
        &[(20, 45, 15), (61, 46, 16)],
    ],
];

static ALIGNMENT_PATTERN_POSITIONS: [&[u8]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

static GENERATOR_POLYNOMIALS: [(usize, &[u8]); 13] = [
    (7, &[1, 127, 122, 154, 164, 11, 68, 117]),
    (10, &[1, 216, 194, 159, 111, 199, 94, 95, 113, 157, 193]),
    (13, &[1, 137, 73, 227, 17, 177, 17, 52, 13, 46, 43, 83, 132, 120]),
    (15, &[1, 29, 196, 111, 163, 112, 74, 10, 105, 105, 139, 132, 151, 32, 134, 26]),
    (16, &[1, 59, 13, 104, 189, 68, 209, 30, 8, 163, 65, 41, 229, 98, 50, 36, 59]),
    (17, &[1, 119, 66, 83, 120, 119, 22, 197, 83, 249, 41, 143, 134, 85, 53, 125, 99, 79]),
    (18, &[1, 239, 251, 183, 113, 149, 175, 199, 215, 240, 220, 73, 82, 173, 75, 32, 67, 217, 146]),
    (
        20,
        &[
            1, 152, 185, 240, 5, 111, 99, 6, 220, 112, 150, 69, 36, 187, 22, 228, 198, 121, 121,
            165, 174,
        ],
    ),
    (
        22,
        &[
            1, 89, 179, 131, 176, 182, 244, 19, 189, 69, 40, 28, 137, 29, 123, 67, 253, 86, 218,
            230, 26, 145, 245,
        ],
    ),
    (
        24,
        &[
            1, 122, 118, 169, 70, 178, 237, 216, 102, 115, 150, 229, 73, 130, 72, 61, 43, 206, 1,
            237, 247, 127, 217, 144, 117,
        ],
    ),
    (
        26,
        &[
            1, 246, 51, 183, 4, 136, 98, 199, 152, 77, 56, 206, 24, 145, 40, 209, 117, 233, 42,
            135, 68, 70, 144, 146, 77, 43, 94,
        ],
    ),
    (
        28,
        &[
            1, 252, 9, 28, 13, 18, 251, 208, 150, 103, 174, 100, 41, 167, 12, 247, 56, 117, 119,
            233, 127, 181, 100, 121, 147, 176, 74, 58, 197,
        ],
    ),
    (
        30,
        &[
            1, 212, 246, 77, 73, 195, 192, 75, 98, 5, 70, 103, 177, 22, 217, 138, 51, 181, 246, 72,
            25, 18, 46, 228, 74, 216, 195, 11, 106, 130, 150,
        ],
    ),
];
