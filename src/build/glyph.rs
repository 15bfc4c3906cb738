//! Glyph emitters: letters, words, digits, and numbers as skeleton graphs.
//!
//! Vertex identifiers follow the public contract
//! `"<glyph>_<horizontal>_<vertical>"` with the position alphabets of
//! [`glyph_data`]. Scoped composition namespaces every identifier as
//! `"<scope>::<position>::<canonical>"`, which is what permits repeated
//! glyphs; without a scope a repeated glyph would collide with itself and is
//! rejected.

use super::{connect, glyph_data, Config};
use crate::error::{Error, Result};
use crate::graph::Graph;

/// Namespace separator for scoped glyph composition. Part of the public
/// contract.
pub const SCOPE_SEPARATOR: &str = "::";

fn canonical_token(glyph: char, (col, row): (u8, u8)) -> String {
    format!(
        "{glyph}_{}_{}",
        glyph_data::HORIZONTAL[col as usize],
        glyph_data::VERTICAL[row as usize]
    )
}

/// Emit every glyph of `text` in order. Whitespace is ignored; `letters`
/// selects the accepted charset (alphabetic vs digits).
pub(super) fn emit(
    graph: &Graph,
    cfg: &mut Config,
    text: &str,
    scope: &str,
    letters: bool,
) -> Result<()> {
    let mut position = 0usize;
    for glyph in text.chars() {
        if glyph.is_whitespace() {
            continue;
        }
        let accepted = if letters {
            glyph.is_ascii_alphabetic()
        } else {
            glyph.is_ascii_digit()
        };
        if !accepted {
            return Err(Error::OptionViolation(format!(
                "glyph {glyph:?} is outside the accepted charset"
            )));
        }
        let strokes = glyph_data::strokes(glyph).ok_or_else(|| {
            Error::OptionViolation(format!("no skeleton registered for glyph {glyph:?}"))
        })?;

        let id_of = |point: (u8, u8)| {
            let token = canonical_token(glyph, point);
            if scope.is_empty() {
                token
            } else {
                format!("{scope}{SCOPE_SEPARATOR}{position}{SCOPE_SEPARATOR}{token}")
            }
        };

        if scope.is_empty() {
            // canonical ids repeat per glyph, so a second emission collides
            let probe = id_of(strokes[0][0]);
            if graph.has_vertex(&probe) {
                return Err(Error::OptionViolation(format!(
                    "glyph {glyph:?} emitted twice without a scope"
                )));
            }
        }

        for stroke in strokes {
            for &point in *stroke {
                graph.add_vertex(&id_of(point))?;
            }
        }
        for stroke in strokes {
            for pair in stroke.windows(2) {
                connect(graph, cfg, &id_of(pair[0]), &id_of(pair[1]))?;
            }
        }
        position += 1;
    }
    Ok(())
}
