//! Horizontal glyph advances for the builtin fonts.
//!
//! Values are the `WX` entries of the Adobe Core 14 AFM files, in thousandths
//! of an em, for the printable ASCII range. Accented Latin-1 letters share
//! their base letter's advance. Anything else gets a full em, which is at
//! least as wide as every glyph these fonts can draw.

use crate::config::BodyFont;

/// Advance used for code points without a table entry.
pub const FALLBACK_ADVANCE: u16 = 1000;

/// `' '..='~'` in Times-Roman.
#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 333, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

/// `' '..='~'` in Helvetica.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

const COURIER_ADVANCE: u16 = 600;

/// Advance of `c` in `font`, in thousandths of an em.
pub fn advance(font: BodyFont, c: char) -> u16 {
    if font == BodyFont::Courier {
        return COURIER_ADVANCE;
    }

    match (font, c) {
        (BodyFont::TimesRoman, 'Æ') => return 889,
        (BodyFont::TimesRoman, 'æ') => return 667,
        (BodyFont::TimesRoman, 'ß') => return 500,
        (BodyFont::Helvetica, 'Æ') => return 1000,
        (BodyFont::Helvetica, 'æ') => return 889,
        (BodyFont::Helvetica, 'ß') => return 611,
        _ => {}
    }

    let Some(base) = fold_latin1(c) else {
        return FALLBACK_ADVANCE;
    };
    let table = match font {
        BodyFont::Helvetica => &HELVETICA,
        _ => &TIMES_ROMAN,
    };
    table[(base as usize) - 0x20]
}

/// Width of `text` set in `font` at `font_size`, in points.
pub fn text_width(font: BodyFont, font_size: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance(font, c))).sum();
    units as f32 * font_size / 1000.0
}

/// Map a Latin-1 code point onto the printable-ASCII glyph of the same width.
fn fold_latin1(c: char) -> Option<char> {
    Some(match c {
        ' '..='~' => c,
        '\u{A0}' => ' ',
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        '×' | '÷' => '+',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'Þ' => 'P',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ð' | 'ò'..='ö' | 'ø' => 'o',
        'ñ' => 'n',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'þ' => 'p',
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_afm_samples() {
        assert_eq!(advance(BodyFont::TimesRoman, ' '), 250);
        assert_eq!(advance(BodyFont::TimesRoman, '0'), 500);
        assert_eq!(advance(BodyFont::TimesRoman, 'W'), 944);
        assert_eq!(advance(BodyFont::TimesRoman, 'i'), 278);
        assert_eq!(advance(BodyFont::TimesRoman, '~'), 541);
    }

    #[test]
    fn helvetica_afm_samples() {
        assert_eq!(advance(BodyFont::Helvetica, '@'), 1015);
        assert_eq!(advance(BodyFont::Helvetica, 'M'), 833);
        assert_eq!(advance(BodyFont::Helvetica, 'l'), 222);
    }

    #[test]
    fn courier_is_monospaced() {
        for c in ['i', 'W', '0', 'é', '😀'] {
            assert_eq!(advance(BodyFont::Courier, c), 600);
        }
    }

    #[test]
    fn accented_letters_use_base_width() {
        assert_eq!(
            advance(BodyFont::TimesRoman, 'í'),
            advance(BodyFont::TimesRoman, 'i')
        );
        assert_eq!(
            advance(BodyFont::Helvetica, 'Ñ'),
            advance(BodyFont::Helvetica, 'N')
        );
    }

    #[test]
    fn unmapped_code_points_take_a_full_em() {
        assert_eq!(advance(BodyFont::TimesRoman, '😀'), FALLBACK_ADVANCE);
        assert_eq!(advance(BodyFont::Helvetica, '¶'), FALLBACK_ADVANCE);
    }

    #[test]
    fn text_width_sums_advances() {
        // 10 digits × 500 units × 11pt / 1000
        assert!((text_width(BodyFont::TimesRoman, 11.0, "0123456789") - 55.0).abs() < 1e-3);
        assert_eq!(text_width(BodyFont::Courier, 10.0, ""), 0.0);
    }
}
