//! Glyph metrics of the built-in Helvetica faces (AFM widths, 1/1000 em).

use super::styles::FontWeight;

/// Advance widths of `' '..='~'` in Helvetica.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Advance widths of `' '..='~'` in Helvetica-Bold.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width of glyphs missing from both tables.
const FALLBACK: u16 = 556;

/// Characters outside ASCII that the WinAnsi encoding of the built-in fonts can show.
const WIN_ANSI_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Whether a built-in font can display `c`. Anything else is dropped from the PDF.
pub fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{a0}'..='\u{ff}') || WIN_ANSI_EXTRAS.contains(c)
}

/// Advance width of one glyph in 1/1000 em.
pub fn glyph_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let ascii = |c: char| table[c as usize - ' ' as usize];

    match c {
        ' '..='~' => ascii(c),
        // Accented i is built on the dotless i, wider than 'i' in the regular face
        'í' | 'ì' | 'î' | 'ï' => 278,
        '…' | '—' | '‰' | '™' | 'Œ' | 'œ' => 1000,
        '–' | '€' => 556,
        '‘' | '’' | '‚' => match weight {
            FontWeight::Regular => 222,
            FontWeight::Bold => 278,
        },
        '“' | '”' | '„' => match weight {
            FontWeight::Regular => 333,
            FontWeight::Bold => 500,
        },
        '•' => 350,
        'º' => 365,
        'ª' => 370,
        '\u{a0}' => ascii(' '),
        _ if !is_win_ansi(c) => 0,
        _ => base_letter(c).map(ascii).unwrap_or(FALLBACK),
    }
}

/// ASCII letter an accented Latin-1 letter is drawn from; accents do not change the advance.
fn base_letter(c: char) -> Option<char> {
    let base = match c {
        'à'..='å' => 'a',
        'À'..='Å' => 'A',
        'ç' => 'c',
        'Ç' => 'C',
        'è'..='ë' => 'e',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ò'..='ö' => 'o',
        'Ò'..='Ö' => 'O',
        'ù'..='ü' => 'u',
        'Ù'..='Ü' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'š' => 's',
        'Š' => 'S',
        'ž' => 'z',
        'Ž' => 'Z',
        _ => return None,
    };
    Some(base)
}
