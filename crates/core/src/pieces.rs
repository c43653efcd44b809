//! Pieces module - Tetromino catalog and mask rotation
//!
//! Every shape is a flat 4x4 mask (16 cells, row-major). Rotation never
//! copies or recomputes a mask: [`rotate`] maps a local coordinate to the
//! index that should be read for the requested quarter turn.

use crate::types::{PieceId, MASK_SIZE, PIECE_COUNT};

/// Flat 4x4 cell mask, `true` = filled
pub type PieceMask = [bool; MASK_SIZE * MASK_SIZE];

const fn parse_mask(src: &[u8; 16]) -> PieceMask {
    let mut out = [false; 16];
    let mut i = 0;
    while i < 16 {
        out[i] = src[i] == b'X';
        i += 1;
    }
    out
}

/// The seven shapes, indexed by [`PieceId`]
static CATALOG: [PieceMask; PIECE_COUNT] = [
    parse_mask(b"..X...X...X...X."),
    parse_mask(b"..X..XX...X....."),
    parse_mask(b".....XX..XX....."),
    parse_mask(b"..X..XX..X......"),
    parse_mask(b".X...XX...X....."),
    parse_mask(b".X...X...XX....."),
    parse_mask(b"..X...X..XX....."),
];

/// Map local cell `(px, py)` under `r` quarter turns to an index into a mask.
///
/// `r` is taken modulo 4, so negative values are fine.
///
/// ```text
///  r=0            r=1            r=2            r=3
///  0  1  2  3    12  8  4  0    15 14 13 12     3  7 11 15
///  4  5  6  7    13  9  5  1    11 10  9  8     2  6 10 14
///  8  9 10 11    14 10  6  2     7  6  5  4     1  5  9 13
/// 12 13 14 15    15 11  7  3     3  2  1  0     0  4  8 12
/// ```
#[inline]
pub fn rotate(px: usize, py: usize, r: i32) -> usize {
    assert!(
        px < MASK_SIZE && py < MASK_SIZE,
        "mask coordinate out of range: ({px}, {py})"
    );
    match r.rem_euclid(4) {
        0 => py * 4 + px,
        1 => 12 + py - px * 4,
        2 => 15 - py * 4 - px,
        _ => 3 - py + px * 4,
    }
}

/// The raw, unrotated mask of a piece
pub fn mask(id: PieceId) -> &'static PieceMask {
    &CATALOG[id.index()]
}

/// Whether local cell `(px, py)` of `id` is filled at rotation `r`
#[inline]
pub fn mask_cell(id: PieceId, px: usize, py: usize, r: i32) -> bool {
    CATALOG[id.index()][rotate(px, py, r)]
}

/// Iterate the local `(x, y)` of every filled cell of `id` at rotation `r`
pub fn cells(id: PieceId, r: i32) -> impl Iterator<Item = (i32, i32)> {
    (0..MASK_SIZE).flat_map(move |py| {
        (0..MASK_SIZE)
            .filter(move |&px| mask_cell(id, px, py, r))
            .map(move |px| (px as i32, py as i32))
    })
}
