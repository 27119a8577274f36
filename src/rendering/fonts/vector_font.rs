use std::collections::HashMap;
use glam::vec2;
use maplit::hashmap;
use crate::rendering::bresenham::LineStripRasterizer;
use crate::rendering::fonts::font_align::{HorizontalAlignment, VerticalAlignment};
use crate::rendering::surface::{BufferProviderMut, SizedSurface};
use crate::rendering::transform::Transform;

/// Open polylines on a 4x6 grid, y pointing down
type Glyph = &'static [&'static [(i8, i8)]];

const GLYPH_WIDTH: i32 = 4;
const GLYPH_HEIGHT: i32 = 6;
const GLYPH_SPACING: i32 = 2;
const LINE_SPACING: i32 = 3;

const GLYPH_A: Glyph = &[&[(0, 6), (0, 2), (2, 0), (4, 2), (4, 6)], &[(0, 3), (4, 3)]];
const GLYPH_B: Glyph = &[
    &[(0, 0), (0, 6), (3, 6), (4, 5), (4, 4), (3, 3), (0, 3)],
    &[(0, 0), (3, 0), (4, 1), (4, 2), (3, 3)]
];
const GLYPH_C: Glyph = &[&[(4, 0), (0, 0), (0, 6), (4, 6)]];
const GLYPH_D: Glyph = &[&[(0, 0), (0, 6), (2, 6), (4, 4), (4, 2), (2, 0), (0, 0)]];
const GLYPH_E: Glyph = &[&[(4, 0), (0, 0), (0, 6), (4, 6)], &[(0, 3), (3, 3)]];
const GLYPH_F: Glyph = &[&[(4, 0), (0, 0), (0, 6)], &[(0, 3), (3, 3)]];
const GLYPH_G: Glyph = &[&[(4, 0), (0, 0), (0, 6), (4, 6), (4, 3), (2, 3)]];
const GLYPH_H: Glyph = &[&[(0, 0), (0, 6)], &[(4, 0), (4, 6)], &[(0, 3), (4, 3)]];
const GLYPH_I: Glyph = &[&[(0, 0), (4, 0)], &[(2, 0), (2, 6)], &[(0, 6), (4, 6)]];
const GLYPH_J: Glyph = &[&[(4, 0), (4, 6), (0, 6), (0, 4)]];
const GLYPH_K: Glyph = &[&[(0, 0), (0, 6)], &[(4, 0), (0, 3), (4, 6)]];
const GLYPH_L: Glyph = &[&[(0, 0), (0, 6), (4, 6)]];
const GLYPH_M: Glyph = &[&[(0, 6), (0, 0), (2, 2), (4, 0), (4, 6)]];
const GLYPH_N: Glyph = &[&[(0, 6), (0, 0), (4, 6), (4, 0)]];
const GLYPH_O: Glyph = &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)]];
const GLYPH_P: Glyph = &[&[(0, 6), (0, 0), (4, 0), (4, 3), (0, 3)]];
const GLYPH_Q: Glyph = &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)], &[(2, 4), (4, 6)]];
const GLYPH_R: Glyph = &[&[(0, 6), (0, 0), (4, 0), (4, 3), (0, 3), (4, 6)]];
const GLYPH_S: Glyph = &[&[(4, 0), (0, 0), (0, 3), (4, 3), (4, 6), (0, 6)]];
const GLYPH_T: Glyph = &[&[(0, 0), (4, 0)], &[(2, 0), (2, 6)]];
const GLYPH_U: Glyph = &[&[(0, 0), (0, 6), (4, 6), (4, 0)]];
const GLYPH_V: Glyph = &[&[(0, 0), (2, 6), (4, 0)]];
const GLYPH_W: Glyph = &[&[(0, 0), (1, 6), (2, 3), (3, 6), (4, 0)]];
const GLYPH_X: Glyph = &[&[(0, 0), (4, 6)], &[(4, 0), (0, 6)]];
const GLYPH_Y: Glyph = &[&[(0, 0), (2, 3), (4, 0)], &[(2, 3), (2, 6)]];
const GLYPH_Z: Glyph = &[&[(0, 0), (4, 0), (0, 6), (4, 6)]];

const GLYPH_0: Glyph = &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)], &[(4, 0), (0, 6)]];
const GLYPH_1: Glyph = &[&[(1, 1), (2, 0), (2, 6)], &[(1, 6), (3, 6)]];
const GLYPH_2: Glyph = &[&[(0, 0), (4, 0), (4, 3), (0, 3), (0, 6), (4, 6)]];
const GLYPH_3: Glyph = &[&[(0, 0), (4, 0), (4, 6), (0, 6)], &[(1, 3), (4, 3)]];
const GLYPH_4: Glyph = &[&[(0, 0), (0, 3), (4, 3)], &[(4, 0), (4, 6)]];
const GLYPH_5: Glyph = &[&[(4, 0), (0, 0), (0, 2), (4, 3), (4, 6), (0, 6)]];
const GLYPH_6: Glyph = &[&[(4, 0), (0, 0), (0, 6), (4, 6), (4, 3), (0, 3)]];
const GLYPH_7: Glyph = &[&[(0, 0), (4, 0), (4, 6)]];
const GLYPH_8: Glyph = &[&[(0, 0), (4, 0), (4, 6), (0, 6), (0, 0)], &[(0, 3), (4, 3)]];
const GLYPH_9: Glyph = &[&[(4, 3), (0, 3), (0, 0), (4, 0), (4, 6), (0, 6)]];

const GLYPH_COLON: Glyph = &[&[(2, 1), (2, 2)], &[(2, 4), (2, 5)]];
const GLYPH_PERIOD: Glyph = &[&[(2, 5), (2, 6)]];
const GLYPH_EXCLAMATION: Glyph = &[&[(2, 0), (2, 4)], &[(2, 5), (2, 6)]];
const GLYPH_MINUS: Glyph = &[&[(1, 3), (3, 3)]];
const GLYPH_QUESTION: Glyph = &[&[(0, 0), (4, 0), (4, 3), (2, 3), (2, 4)], &[(2, 5), (2, 6)]];

pub trait TextDrawer<Destination> {
    fn draw_text(
        &self, destination: &mut Destination,
        x: i32, y: i32, text: &str,
        color: u8
    );

    #[allow(clippy::too_many_arguments)]
    fn draw_text_in_box(
        &self, destination: &mut Destination,
        x: i32, y: i32,
        box_width: usize, box_height: usize,
        horizontal_alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
        text: &str,
        color: u8
    );
}

/// Stroke font drawn with line strips. Lowercase letters are drawn as uppercase,
/// unknown characters as a question mark.
pub struct VectorFont {
    scale: f32,
    glyphs: HashMap<char, Glyph>
}

impl VectorFont {
    pub fn new(scale: f32) -> Self {
        let glyphs = hashmap! {
            'A' => GLYPH_A, 'B' => GLYPH_B, 'C' => GLYPH_C, 'D' => GLYPH_D,
            'E' => GLYPH_E, 'F' => GLYPH_F, 'G' => GLYPH_G, 'H' => GLYPH_H,
            'I' => GLYPH_I, 'J' => GLYPH_J, 'K' => GLYPH_K, 'L' => GLYPH_L,
            'M' => GLYPH_M, 'N' => GLYPH_N, 'O' => GLYPH_O, 'P' => GLYPH_P,
            'Q' => GLYPH_Q, 'R' => GLYPH_R, 'S' => GLYPH_S, 'T' => GLYPH_T,
            'U' => GLYPH_U, 'V' => GLYPH_V, 'W' => GLYPH_W, 'X' => GLYPH_X,
            'Y' => GLYPH_Y, 'Z' => GLYPH_Z,
            '0' => GLYPH_0, '1' => GLYPH_1, '2' => GLYPH_2, '3' => GLYPH_3,
            '4' => GLYPH_4, '5' => GLYPH_5, '6' => GLYPH_6, '7' => GLYPH_7,
            '8' => GLYPH_8, '9' => GLYPH_9,
            ':' => GLYPH_COLON,
            '.' => GLYPH_PERIOD,
            '!' => GLYPH_EXCLAMATION,
            '-' => GLYPH_MINUS,
            '?' => GLYPH_QUESTION
        };
        Self { scale, glyphs }
    }

    fn units(&self, amount: i32) -> i32 {
        (amount as f32 * self.scale).round() as i32
    }

    fn glyph_advance(&self) -> i32 {
        self.units(GLYPH_WIDTH + GLYPH_SPACING)
    }

    pub fn line_height(&self) -> i32 {
        self.units(GLYPH_HEIGHT + LINE_SPACING)
    }

    pub fn glyph_height(&self) -> i32 {
        self.units(GLYPH_HEIGHT)
    }

    fn get_glyph(&self, chr: char) -> Glyph {
        self.glyphs
            .get(&chr.to_ascii_uppercase())
            .copied()
            .unwrap_or(GLYPH_QUESTION)
    }

    /// Width of a run of glyphs without the trailing spacing
    pub fn measure_word_width(&self, word: &str) -> i32 {
        let count = word.chars().count() as i32;
        if count == 0 {
            0
        } else {
            count * self.glyph_advance() - self.units(GLYPH_SPACING)
        }
    }

    /// Bounding size of a text drawn with `draw_text`
    pub fn measure_text(&self, text: &str) -> (i32, i32) {
        let mut line_count = 0;
        let mut width = 0;
        for line in text.split('\n') {
            line_count += 1;
            width = width.max(self.measure_word_width(line));
        }
        (width, line_count * self.line_height() - self.units(LINE_SPACING))
    }

    fn draw_glyph(
        &self,
        destination: &mut (impl BufferProviderMut<u8> + SizedSurface),
        x: i32, y: i32,
        glyph: Glyph,
        color: u8
    ) {
        let transform = Transform::from_angle_translation_scale(
            0.0,
            vec2(x as f32, y as f32),
            self.scale
        );
        for stroke in glyph.iter() {
            LineStripRasterizer::create(destination)
                .with_color(color)
                .with_transform(transform)
                .rasterize_iter(false, stroke.iter().map(|&(px, py)| vec2(px as f32, py as f32)));
        }
    }
}

impl<Destination: BufferProviderMut<u8> + SizedSurface> TextDrawer<Destination> for VectorFont {
    fn draw_text(&self, destination: &mut Destination, x: i32, y: i32, text: &str, color: u8) {
        let mut current_x = x;
        let mut current_y = y;
        for c in text.chars() {
            match c {
                '\n' => {
                    current_x = x;
                    current_y += self.line_height();
                },
                c if c.is_whitespace() => current_x += self.glyph_advance(),
                c => {
                    self.draw_glyph(destination, current_x, current_y, self.get_glyph(c), color);
                    current_x += self.glyph_advance();
                }
            }
        }
    }

    fn draw_text_in_box(
        &self,
        destination: &mut Destination,
        x: i32, y: i32,
        box_width: usize, box_height: usize,
        horizontal_alignment: HorizontalAlignment,
        vertical_alignment: VerticalAlignment,
        text: &str,
        color: u8
    ) {
        struct LineInfo<'t> {
            words: Vec<&'t str>,
            empty_space: i32
        }

        let box_width = box_width as i32;
        let space_width = self.glyph_advance();
        let mut lines = Vec::new();

        for line in text.lines() {
            let mut current = LineInfo { words: Vec::new(), empty_space: box_width };
            let mut current_x = 0;
            for word in line.split_ascii_whitespace() {
                let word_width = self.measure_word_width(word);
                let next_x = if current.words.is_empty() {
                    word_width
                } else {
                    current_x + space_width + word_width
                };

                if next_x > box_width && !current.words.is_empty() {
                    lines.push(current);
                    current = LineInfo { words: vec![word], empty_space: box_width - word_width };
                    current_x = word_width;
                    continue;
                }
                current.words.push(word);
                current.empty_space = box_width - next_x;
                current_x = next_x;
            }
            lines.push(current);
        }

        let text_height = lines.len() as i32 * self.line_height() - self.units(LINE_SPACING);
        let mut current_y = y + match vertical_alignment {
            VerticalAlignment::Top => 0,
            VerticalAlignment::Center => (box_height as i32 - text_height) / 2,
            VerticalAlignment::Bottom => box_height as i32 - text_height
        };

        for LineInfo { words, empty_space } in lines.iter() {
            let mut current_x = x + match horizontal_alignment {
                HorizontalAlignment::Left => 0,
                HorizontalAlignment::Center => *empty_space / 2,
                HorizontalAlignment::Right => *empty_space
            };
            for (i, word) in words.iter().enumerate() {
                if i != 0 {
                    current_x += space_width;
                }
                self.draw_text(destination, current_x, current_y, word, color);
                current_x += self.measure_word_width(word);
            }
            current_y += self.line_height();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::RetroBlitContext;

    #[test]
    fn measures_words_without_trailing_spacing() {
        let font = VectorFont::new(1.0);
        assert_eq!(font.measure_word_width(""), 0);
        assert_eq!(font.measure_word_width("A"), 4);
        assert_eq!(font.measure_word_width("AB"), 10);
        assert_eq!(font.measure_text("AB\nCDE"), (16, 15));

        let font = VectorFont::new(2.0);
        assert_eq!(font.measure_word_width("AB"), 20);
    }

    #[test]
    fn draws_glyph_strokes_at_the_pen_position() {
        let font = VectorFont::new(1.0);
        let mut ctx = RetroBlitContext::new(16, 8);
        font.draw_text(&mut ctx, 1, 1, "T", 7);
        assert_eq!(ctx.get_pixel(1, 1), Some(7));
        assert_eq!(ctx.get_pixel(5, 1), Some(7));
        assert_eq!(ctx.get_pixel(3, 7), Some(7));
        assert_eq!(ctx.get_pixel(1, 7), Some(0));
    }

    #[test]
    fn lowercase_is_drawn_as_uppercase() {
        let font = VectorFont::new(1.0);
        let mut lower = RetroBlitContext::new(16, 8);
        let mut upper = RetroBlitContext::new(16, 8);
        font.draw_text(&mut lower, 0, 0, "go", 1);
        font.draw_text(&mut upper, 0, 0, "GO", 1);
        for y in 0..8 {
            for x in 0..16 {
                assert_eq!(lower.get_pixel(x, y), upper.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn centers_text_in_a_box() {
        let font = VectorFont::new(1.0);
        let mut ctx = RetroBlitContext::new(20, 20);
        font.draw_text_in_box(
            &mut ctx,
            0, 0, 20, 20,
            HorizontalAlignment::Center,
            VerticalAlignment::Center,
            "I",
            3
        );
        // 4x6 glyph in a 20x20 box starts at (8, 7)
        assert_eq!(ctx.get_pixel(8, 7), Some(3));
        assert_eq!(ctx.get_pixel(12, 7), Some(3));
        assert_eq!(ctx.get_pixel(10, 13), Some(3));
        assert_eq!(ctx.get_pixel(7, 7), Some(0));
    }

    #[test]
    fn wraps_words_that_do_not_fit() {
        let font = VectorFont::new(1.0);
        let mut ctx = RetroBlitContext::new(12, 20);
        font.draw_text_in_box(
            &mut ctx,
            0, 0, 12, 20,
            HorizontalAlignment::Left,
            VerticalAlignment::Top,
            "I I",
            1
        );
        // second word moves to the next line instead of x = 10
        assert_eq!(ctx.get_pixel(0, 9), Some(1));
        assert_eq!(ctx.get_pixel(10, 0), Some(0));
    }
}
