//! Flat-colored rectangles and a 5x7 bitmap font, emitted as NDC triangles.

use crate::renderer::Vertex;

pub const FONT_WIDTH: usize = 5;
pub const FONT_HEIGHT: usize = 7;

/// Axis-aligned rectangle in window pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl Rect {
    pub fn contains(&self, point: [f32; 2]) -> bool {
        point[0] >= self.min[0] && point[0] <= self.max[0] && point[1] >= self.min[1] && point[1] <= self.max[1]
    }

    pub fn width(&self) -> f32 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f32 {
        self.max[1] - self.min[1]
    }

    pub fn expand(&self, by: f32) -> Rect {
        Rect {
            min: [self.min[0] - by, self.min[1] - by],
            max: [self.max[0] + by, self.max[1] + by],
        }
    }
}

pub fn to_ndc(x: f32, width: f32) -> f32 {
    (x / width) * 2.0 - 1.0
}

pub fn to_ndc_y(y: f32, height: f32) -> f32 {
    1.0 - (y / height) * 2.0
}

pub fn push_rect(vertices: &mut Vec<Vertex>, rect: Rect, color: [f32; 3], window_size: [f32; 2]) {
    let [width, height] = window_size;
    let x0 = to_ndc(rect.min[0], width);
    let y0 = to_ndc_y(rect.min[1], height);
    let x1 = to_ndc(rect.max[0], width);
    let y1 = to_ndc_y(rect.max[1], height);

    for position in [[x0, y1], [x1, y1], [x0, y0], [x0, y0], [x1, y1], [x1, y0]] {
        vertices.push(Vertex { position, color });
    }
}

/// Outline of `rect` drawn inward with the given thickness.
pub fn push_frame(vertices: &mut Vec<Vertex>, rect: Rect, thickness: f32, color: [f32; 3], window_size: [f32; 2]) {
    let [x0, y0] = rect.min;
    let [x1, y1] = rect.max;
    let sides = [
        Rect { min: [x0, y0], max: [x1, y0 + thickness] },
        Rect { min: [x0, y1 - thickness], max: [x1, y1] },
        Rect { min: [x0, y0], max: [x0 + thickness, y1] },
        Rect { min: [x1 - thickness, y0], max: [x1, y1] },
    ];
    for side in sides {
        push_rect(vertices, side, color, window_size);
    }
}

/// Width of `text` in font pixels, before scaling.
pub fn text_pixel_width(text: &str) -> f32 {
    let mut units = 0.0;
    for ch in text.to_uppercase().chars() {
        if ch == ' ' || glyph_bits(ch).is_some() {
            units += (FONT_WIDTH as f32) + 1.0;
        }
    }
    (units - 1.0).max(0.0)
}

pub fn draw_text(vertices: &mut Vec<Vertex>, text: &str, origin: [f32; 2], scale: f32, color: [f32; 3], window_size: [f32; 2]) {
    let mut cursor_x = origin[0];
    for ch in text.to_uppercase().chars() {
        if let Some(rows) = glyph_bits(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..FONT_WIDTH {
                    if (bits >> (FONT_WIDTH - 1 - col)) & 1 == 1 {
                        let rect = Rect {
                            min: [cursor_x + col as f32 * scale, origin[1] + row as f32 * scale],
                            max: [cursor_x + (col as f32 + 1.0) * scale, origin[1] + (row as f32 + 1.0) * scale],
                        };
                        push_rect(vertices, rect, color, window_size);
                    }
                }
            }
        } else if ch != ' ' {
            continue;
        }
        cursor_x += (FONT_WIDTH as f32 + 1.0) * scale;
    }
}

/// Draws `text` centered inside `rect`.
pub fn draw_label(vertices: &mut Vec<Vertex>, text: &str, rect: Rect, scale: f32, color: [f32; 3], window_size: [f32; 2]) {
    let text_width = text_pixel_width(text) * scale;
    let text_height = FONT_HEIGHT as f32 * scale;
    let origin = [
        rect.min[0] + (rect.width() - text_width) * 0.5,
        rect.min[1] + (rect.height() - text_height) * 0.5,
    ];
    draw_text(vertices, text, origin, scale, color, window_size);
}

fn glyph_bits(ch: char) -> Option<[u8; FONT_HEIGHT]> {
    match ch {
        'A' => Some([0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'C' => Some([0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
        'D' => Some([0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110]),
        'E' => Some([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => Some([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'G' => Some([0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
        'I' => Some([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111]),
        'L' => Some([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        'M' => Some([0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
        'N' => Some([0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001]),
        'O' => Some([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'P' => Some([0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        'R' => Some([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'S' => Some([0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        'U' => Some([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'Z' => Some([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
        _ => None,
    }
}
