//! Skeleton registry for the glyph builders.
//!
//! Every supported rune maps to a list of strokes over a 5×7 grid. A stroke
//! is a polyline of `(column, row)` points: column 0..=4 left to right, row
//! 0..=6 top to bottom. Consecutive points become edges; a single-point
//! stroke contributes an isolated vertex (the dot of `i` and `j`).

type Strokes = &'static [&'static [(u8, u8)]];

/// Position tokens for the five columns, left to right.
pub(super) const HORIZONTAL: [&str; 5] = ["L", "LC", "C", "RC", "R"];

/// Position tokens for the seven rows, top to bottom.
pub(super) const VERTICAL: [&str; 7] = ["T", "PT", "UM", "M", "PM", "UB", "B"];

/// The stroke list for a rune, or `None` when the rune has no glyph.
pub(super) fn strokes(glyph: char) -> Option<Strokes> {
    let strokes: Strokes = match glyph {
        'A' => &[
            &[(0, 6), (0, 4), (0, 2), (2, 0), (4, 2), (4, 4), (4, 6)],
            &[(0, 4), (4, 4)],
        ],
        'B' => &[
            &[(0, 0), (0, 3), (0, 6)],
            &[(0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)],
            &[(0, 3), (3, 3), (4, 4), (4, 5), (3, 6), (0, 6)],
        ],
        'C' => &[&[(4, 1), (3, 0), (1, 0), (0, 1), (0, 5), (1, 6), (3, 6), (4, 5)]],
        'D' => &[&[(0, 0), (0, 6), (2, 6), (4, 4), (4, 2), (2, 0), (0, 0)]],
        'E' => &[&[(4, 0), (0, 0), (0, 3), (0, 6), (4, 6)], &[(0, 3), (3, 3)]],
        'F' => &[&[(4, 0), (0, 0), (0, 3), (0, 6)], &[(0, 3), (3, 3)]],
        'G' => &[&[
            (4, 1),
            (3, 0),
            (1, 0),
            (0, 1),
            (0, 5),
            (1, 6),
            (3, 6),
            (4, 5),
            (4, 3),
            (2, 3),
        ]],
        'H' => &[
            &[(0, 0), (0, 3), (0, 6)],
            &[(4, 0), (4, 3), (4, 6)],
            &[(0, 3), (4, 3)],
        ],
        'I' => &[
            &[(1, 0), (2, 0), (3, 0)],
            &[(2, 0), (2, 6)],
            &[(1, 6), (2, 6), (3, 6)],
        ],
        'J' => &[&[(3, 0), (3, 5), (2, 6), (1, 6), (0, 5)]],
        'K' => &[
            &[(0, 0), (0, 3), (0, 6)],
            &[(4, 0), (0, 3)],
            &[(0, 3), (4, 6)],
        ],
        'L' => &[&[(0, 0), (0, 6), (4, 6)]],
        'M' => &[&[(0, 6), (0, 0), (2, 3), (4, 0), (4, 6)]],
        'N' => &[&[(0, 6), (0, 0), (4, 6), (4, 0)]],
        'O' => &[&[
            (1, 0),
            (3, 0),
            (4, 1),
            (4, 5),
            (3, 6),
            (1, 6),
            (0, 5),
            (0, 1),
            (1, 0),
        ]],
        'P' => &[&[(0, 6), (0, 3), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)]],
        'Q' => &[
            &[
                (1, 0),
                (3, 0),
                (4, 1),
                (4, 5),
                (3, 6),
                (1, 6),
                (0, 5),
                (0, 1),
                (1, 0),
            ],
            &[(3, 6), (4, 6)],
        ],
        'R' => &[
            &[(0, 6), (0, 3), (0, 0), (3, 0), (4, 1), (4, 2), (3, 3), (0, 3)],
            &[(3, 3), (4, 6)],
        ],
        'S' => &[&[
            (4, 1),
            (3, 0),
            (1, 0),
            (0, 1),
            (0, 2),
            (1, 3),
            (3, 3),
            (4, 4),
            (4, 5),
            (3, 6),
            (1, 6),
            (0, 5),
        ]],
        'T' => &[&[(0, 0), (2, 0), (4, 0)], &[(2, 0), (2, 6)]],
        'U' => &[&[(0, 0), (0, 5), (1, 6), (3, 6), (4, 5), (4, 0)]],
        'V' => &[&[(0, 0), (2, 6), (4, 0)]],
        'W' => &[&[(0, 0), (1, 6), (2, 3), (3, 6), (4, 0)]],
        'X' => &[&[(0, 0), (2, 3), (4, 6)], &[(4, 0), (2, 3), (0, 6)]],
        'Y' => &[&[(0, 0), (2, 3), (4, 0)], &[(2, 3), (2, 6)]],
        'Z' => &[&[(0, 0), (4, 0), (0, 6), (4, 6)]],

        'a' => &[
            &[(4, 2), (1, 2), (0, 3), (0, 5), (1, 6), (4, 6)],
            &[(4, 2), (4, 6)],
        ],
        'b' => &[
            &[(0, 0), (0, 2), (0, 6)],
            &[(0, 2), (3, 2), (4, 3), (4, 5), (3, 6), (0, 6)],
        ],
        'c' => &[&[(4, 3), (3, 2), (1, 2), (0, 3), (0, 5), (1, 6), (3, 6), (4, 5)]],
        'd' => &[
            &[(4, 0), (4, 2), (4, 6)],
            &[(4, 2), (1, 2), (0, 3), (0, 5), (1, 6), (4, 6)],
        ],
        'e' => &[&[
            (0, 4),
            (4, 4),
            (4, 3),
            (3, 2),
            (1, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (1, 6),
            (3, 6),
            (4, 5),
        ]],
        'f' => &[
            &[(4, 1), (3, 0), (2, 1), (2, 3), (2, 6)],
            &[(1, 3), (2, 3), (3, 3)],
        ],
        'g' => &[
            &[(4, 2), (1, 2), (0, 3), (0, 4), (1, 5), (4, 5)],
            &[(4, 2), (4, 5), (4, 6), (1, 6), (0, 5)],
        ],
        'h' => &[&[(0, 0), (0, 3), (0, 6)], &[(0, 3), (2, 2), (4, 3), (4, 6)]],
        'i' => &[&[(2, 1)], &[(2, 3), (2, 6)]],
        'j' => &[&[(3, 1)], &[(3, 3), (3, 5), (2, 6), (1, 6), (0, 5)]],
        'k' => &[
            &[(0, 0), (0, 4), (0, 6)],
            &[(3, 2), (0, 4)],
            &[(0, 4), (3, 6)],
        ],
        'l' => &[&[(2, 0), (2, 5), (3, 6)]],
        'm' => &[
            &[(0, 6), (0, 2), (1, 2), (2, 3), (2, 6)],
            &[(2, 3), (3, 2), (4, 3), (4, 6)],
        ],
        'n' => &[&[(0, 2), (0, 3), (0, 6)], &[(0, 3), (2, 2), (4, 3), (4, 6)]],
        'o' => &[&[
            (1, 2),
            (3, 2),
            (4, 3),
            (4, 5),
            (3, 6),
            (1, 6),
            (0, 5),
            (0, 3),
            (1, 2),
        ]],
        'p' => &[
            &[(0, 2), (0, 4), (0, 6)],
            &[(0, 2), (3, 2), (4, 3), (3, 4), (0, 4)],
        ],
        'q' => &[
            &[(4, 2), (4, 4), (4, 6)],
            &[(4, 2), (1, 2), (0, 3), (1, 4), (4, 4)],
        ],
        'r' => &[&[(0, 2), (0, 3), (0, 6)], &[(0, 3), (1, 2), (3, 2), (4, 3)]],
        's' => &[&[(4, 2), (1, 2), (0, 3), (1, 4), (3, 4), (4, 5), (3, 6), (0, 6)]],
        't' => &[
            &[(2, 0), (2, 2), (2, 5), (3, 6), (4, 5)],
            &[(1, 2), (2, 2), (3, 2)],
        ],
        'u' => &[&[(0, 2), (0, 5), (1, 6), (3, 6), (4, 5), (4, 2)]],
        'v' => &[&[(0, 2), (2, 6), (4, 2)]],
        'w' => &[&[(0, 2), (1, 6), (2, 4), (3, 6), (4, 2)]],
        'x' => &[&[(0, 2), (2, 4), (4, 6)], &[(4, 2), (2, 4), (0, 6)]],
        'y' => &[&[(0, 2), (2, 4)], &[(4, 2), (2, 4), (0, 6)]],
        'z' => &[&[(0, 2), (4, 2), (0, 6), (4, 6)]],

        '0' => &[&[
            (1, 0),
            (3, 0),
            (4, 1),
            (4, 5),
            (3, 6),
            (1, 6),
            (0, 5),
            (0, 1),
            (1, 0),
        ]],
        '1' => &[&[(1, 1), (2, 0), (2, 6)], &[(1, 6), (2, 6), (3, 6)]],
        '2' => &[&[(0, 1), (1, 0), (3, 0), (4, 1), (4, 2), (0, 6), (4, 6)]],
        '3' => &[
            &[(0, 1), (1, 0), (3, 0), (4, 1), (4, 2), (3, 3), (1, 3)],
            &[(3, 3), (4, 4), (4, 5), (3, 6), (1, 6), (0, 5)],
        ],
        '4' => &[
            &[(3, 0), (0, 4)],
            &[(0, 4), (3, 4), (4, 4)],
            &[(3, 0), (3, 4), (3, 6)],
        ],
        '5' => &[&[
            (4, 0),
            (0, 0),
            (0, 3),
            (3, 3),
            (4, 4),
            (4, 5),
            (3, 6),
            (1, 6),
            (0, 5),
        ]],
        '6' => &[&[
            (4, 1),
            (3, 0),
            (1, 0),
            (0, 1),
            (0, 3),
            (0, 5),
            (1, 6),
            (3, 6),
            (4, 5),
            (4, 4),
            (3, 3),
            (0, 3),
        ]],
        '7' => &[&[(0, 0), (4, 0), (1, 6)]],
        '8' => &[
            &[
                (1, 0),
                (3, 0),
                (4, 1),
                (4, 2),
                (3, 3),
                (1, 3),
                (0, 2),
                (0, 1),
                (1, 0),
            ],
            &[(1, 3), (0, 4), (0, 5), (1, 6), (3, 6), (4, 5), (4, 4), (3, 3)],
        ],
        '9' => &[&[
            (0, 5),
            (1, 6),
            (3, 6),
            (4, 5),
            (4, 3),
            (4, 1),
            (3, 0),
            (1, 0),
            (0, 1),
            (0, 2),
            (1, 3),
            (4, 3),
        ]],
        _ => return None,
    };
    Some(strokes)
}
