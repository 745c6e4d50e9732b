//! 3x5 bitmap font for scores and overlays

use super::{PixelBuf, Rgb, SHADOW};

const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;
/// Horizontal advance per character, in font pixels
const ADVANCE: i32 = GLYPH_W + 1;

// Each row is three bits, most significant on the left.
#[rustfmt::skip]
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b011, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 5]; 26] = [
    [0b010, 0b101, 0b111, 0b101, 0b101], // A
    [0b110, 0b101, 0b110, 0b101, 0b110], // B
    [0b011, 0b100, 0b100, 0b100, 0b011], // C
    [0b110, 0b101, 0b101, 0b101, 0b110], // D
    [0b111, 0b100, 0b110, 0b100, 0b111], // E
    [0b111, 0b100, 0b110, 0b100, 0b100], // F
    [0b011, 0b100, 0b101, 0b101, 0b011], // G
    [0b101, 0b101, 0b111, 0b101, 0b101], // H
    [0b111, 0b010, 0b010, 0b010, 0b111], // I
    [0b001, 0b001, 0b001, 0b101, 0b010], // J
    [0b101, 0b101, 0b110, 0b101, 0b101], // K
    [0b100, 0b100, 0b100, 0b100, 0b111], // L
    [0b101, 0b111, 0b111, 0b101, 0b101], // M
    [0b110, 0b101, 0b101, 0b101, 0b101], // N
    [0b010, 0b101, 0b101, 0b101, 0b010], // O
    [0b110, 0b101, 0b110, 0b100, 0b100], // P
    [0b010, 0b101, 0b101, 0b110, 0b011], // Q
    [0b110, 0b101, 0b110, 0b101, 0b101], // R
    [0b011, 0b100, 0b010, 0b001, 0b110], // S
    [0b111, 0b010, 0b010, 0b010, 0b010], // T
    [0b101, 0b101, 0b101, 0b101, 0b111], // U
    [0b101, 0b101, 0b101, 0b101, 0b010], // V
    [0b101, 0b101, 0b111, 0b111, 0b101], // W
    [0b101, 0b101, 0b010, 0b101, 0b101], // X
    [0b101, 0b101, 0b010, 0b010, 0b010], // Y
    [0b111, 0b001, 0b010, 0b100, 0b111], // Z
];

const BANG: [u8; 5] = [0b010, 0b010, 0b010, 0b000, 0b010];
const COLON: [u8; 5] = [0b000, 0b010, 0b000, 0b010, 0b000];

fn glyph(ch: char) -> Option<&'static [u8; 5]> {
    match ch {
        '0'..='9' => Some(&DIGITS[ch as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[ch as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[ch as usize - 'a' as usize]),
        '!' => Some(&BANG),
        ':' => Some(&COLON),
        _ => None,
    }
}

/// Width in buffer pixels of `text` drawn at `size`
pub fn text_width(text: &str, size: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        return 0;
    }
    (n * ADVANCE - 1) * size
}

pub fn text_height(size: i32) -> i32 {
    GLYPH_H * size
}

/// Draw `text` with its top edge at `y`, horizontally centred on `cx`.
/// Each font pixel becomes a `size` x `size` block with a drop shadow.
pub fn draw_text(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, size: i32, fg: Rgb) {
    let size = size.max(1);
    let x0 = cx - text_width(text, size) / 2;
    for pass in [true, false] {
        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = glyph(ch) else { continue };
            let gx = x0 + i as i32 * ADVANCE * size;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (0b100 >> col) == 0 {
                        continue;
                    }
                    let px = gx + col * size;
                    let py = y + row as i32 * size;
                    if pass {
                        buf.fill_rect(px + size.max(2) / 2, py + size.max(2) / 2, size, size, SHADOW);
                    } else {
                        buf.fill_rect(px, py, size, size, fg);
                    }
                }
            }
        }
    }
}

pub fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, size: i32, fg: Rgb) {
    draw_text(buf, cx, y, &n.to_string(), size, fg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{LETTERBOX, WHITE};

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", 1), 0);
        assert_eq!(text_width("7", 1), 3);
        assert_eq!(text_width("GAME OVER", 1), 35);
        assert_eq!(text_width("12", 2), 14);
    }

    #[test]
    fn test_every_printed_char_has_glyph() {
        for ch in "FLAPPY PRESS SPACE GAME OVER! BEST: SCORE R 0123456789".chars() {
            assert!(ch == ' ' || glyph(ch).is_some(), "missing glyph {ch:?}");
        }
    }

    #[test]
    fn test_draw_one() {
        let mut buf = PixelBuf::new(10, 10);
        draw_number(&mut buf, 4, 0, 1, 1, WHITE);
        // "1" is 3 wide, centred on 4 starts at x=3; its top row is .#.
        assert_eq!(buf.get(4, 0), WHITE);
        assert_eq!(buf.get(3, 0), LETTERBOX);
        assert_eq!(buf.get(3, 4), WHITE);
    }
}
