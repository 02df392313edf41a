use image::{GrayImage, Luma};
use imageproc::{
    drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut, draw_polygon_mut},
    point::Point,
    rect::Rect,
};

use super::{Shape, Symbol};

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

// Render
//------------------------------------------------------------------------------

impl Symbol {
    /// Rasterizes the geometry at `module_sz` pixels per module, quiet zone
    /// included. Text lines are not drawn.
    pub fn render(&self, module_sz: u32) -> GrayImage {
        let qz = self.quiet_zone() as f64;
        let scale = module_sz as f64;
        let px = |v: f64| ((v + qz) * scale).round() as i32;
        let w = (self.width() as u32 + 2 * self.quiet_zone() as u32) * module_sz;
        let h = (self.height() as u32 + 2 * self.quiet_zone() as u32) * module_sz;

        let mut canvas = GrayImage::from_pixel(w, h, PAPER);
        for shape in self.shapes() {
            match shape {
                Shape::Rect { x, y, width, height } => {
                    let (x0, y0) = (px(*x), px(*y));
                    let (rw, rh) = (px(x + width) - x0, px(y + height) - y0);
                    if rw > 0 && rh > 0 {
                        draw_filled_rect_mut(&mut canvas, Rect::at(x0, y0).of_size(rw as u32, rh as u32), INK);
                    }
                }
                Shape::Polygon(points) => {
                    let mut poly: Vec<Point<i32>> = points.iter().map(|&(x, y)| Point::new(px(x), px(y))).collect();
                    poly.dedup();
                    if poly.len() > 1 && poly.first() == poly.last() {
                        poly.pop();
                    }
                    if poly.len() >= 3 {
                        draw_polygon_mut(&mut canvas, &poly, INK);
                    }
                }
                Shape::Ellipse { cx, cy, rx, ry, dark } => {
                    let color = if *dark { INK } else { PAPER };
                    let (rx, ry) = ((rx * scale).round() as i32, (ry * scale).round() as i32);
                    draw_filled_ellipse_mut(&mut canvas, (px(*cx), px(*cy)), rx, ry, color);
                }
                Shape::Text { .. } => (),
            }
        }

        canvas
    }
}
