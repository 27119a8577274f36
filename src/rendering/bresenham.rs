use glam::{vec2, Vec2};
use crate::rendering::surface::{BufferProviderMut, SizedSurface};
use crate::rendering::transform::Transform;

fn plot_bresenham_circle(
    cx: i32, cy: i32, r: i32,
    mut plot_func: impl FnMut(i32, i32)
) {
    fn plot_all_octants(cx: i32, cy: i32, dx: i32, dy: i32, plot_func: &mut impl FnMut(i32, i32)) {
        plot_func(cx + dx, cy + dy);
        plot_func(cx + dx, cy - dy);
        plot_func(cx - dx, cy + dy);
        plot_func(cx - dx, cy - dy);
        plot_func(cx + dy, cy + dx);
        plot_func(cx + dy, cy - dx);
        plot_func(cx - dy, cy + dx);
        plot_func(cx - dy, cy - dx);
    }
    let mut d = 3 - r * 2;
    let mut x = 0;
    let mut y = r;
    plot_all_octants(cx, cy, x, y, &mut plot_func);
    while x < y {
        if d <= 0 {
            d += 6 + (x << 2);
        } else {
            d += 10 + ((x - y) << 2);
            y -= 1;
        }
        x += 1;
        plot_all_octants(cx, cy, x, y, &mut plot_func);
    }
}

fn plot_bresenham_line(x0: i32, y0: i32, x1: i32, y1: i32, mut plot_func: impl FnMut(i32, i32)) {
    if y0 == y1 {
        for x in x0.min(x1)..=x0.max(x1) { plot_func(x, y0); }
    } else if x0 == x1 {
        for y in y0.min(y1)..=y0.max(y1) { plot_func(x0, y); }
    } else {
        let (dx_abs, dy_abs) = ((x1 - x0).abs(), (y1 - y0).abs());
        let (dx2, dy2) = (dx_abs << 1, dy_abs << 1);
        if dx_abs >= dy_abs {
            let (x0, x1, y0, y1) = if x0 > x1 { (x1, x0, y1, y0) } else { (x0, x1, y0, y1) };
            let sign = if y0 < y1 { 1 } else { -1 };
            let mut y = y0;
            let mut d = dy2 - dx_abs;
            for x in x0..=x1 {
                plot_func(x, y);
                if d > 0 {
                    d -= dx2;
                    y += sign;
                }
                d += dy2;
            }
        } else {
            let (x0, x1, y0, y1) = if y0 > y1 { (x1, x0, y1, y0) } else { (x0, x1, y0, y1) };
            let sign = if x0 < x1 { 1 } else { -1 };
            let mut x = x0;
            let mut d = dx2 - dy_abs;
            for y in y0..=y1 {
                plot_func(x, y);
                if d > 0 {
                    d -= dy2;
                    x += sign;
                }
                d += dx2;
            }
        }
    }
}

#[inline(always)]
fn plot_clipped<T: Copy>(buffer: &mut [T], buffer_width: usize, x: i32, y: i32, color: T) {
    if buffer_width == 0 {
        return;
    }
    let buffer_height = buffer.len() / buffer_width;
    if (0..buffer_width as i32).contains(&x) && (0..buffer_height as i32).contains(&y) {
        buffer[x as usize + y as usize * buffer_width] = color;
    }
}

pub struct BresenhamCircleDrawer<'a, T: Copy> {
    buffer: &'a mut [T],
    buffer_width: usize,
    position: (i32, i32),
    radius: i32
}

impl<'a, T: Copy> BresenhamCircleDrawer<'a, T> {
    pub fn create(buffer_provider: &'a mut (impl BufferProviderMut<T> + SizedSurface)) -> Self {
        let buffer_width = buffer_provider.get_width();
        let buffer = buffer_provider.get_buffer_mut();
        Self {
            buffer,
            buffer_width,
            position: (0, 0),
            radius: 0
        }
    }

    pub fn with_position(self, position: (i32, i32)) -> Self {
        Self { position, ..self }
    }

    pub fn with_radius(self, radius: i32) -> Self {
        Self { radius, ..self }
    }

    pub fn draw(self, color: T) {
        let Self { buffer, buffer_width, position, radius } = self;
        plot_bresenham_circle(
            position.0,
            position.1,
            radius.max(0),
            |x, y| plot_clipped(&mut *buffer, buffer_width, x, y, color)
        )
    }
}

pub struct LineRasterizer<'a, T: Copy> {
    buffer: &'a mut [T],
    buffer_width: usize,
    from: (i32, i32),
    to: (i32, i32)
}

impl<'a, T: Copy> LineRasterizer<'a, T> {
    pub fn create_from_raw(buffer: &'a mut [T], buffer_width: usize) -> Self {
        Self {
            buffer,
            buffer_width,
            from: (0, 0),
            to: (0, 0)
        }
    }

    pub fn create(buffer_provider: &'a mut (impl BufferProviderMut<T> + SizedSurface)) -> Self {
        let buffer_width = buffer_provider.get_width();
        Self::create_from_raw(buffer_provider.get_buffer_mut(), buffer_width)
    }

    pub fn from(self, from: (i32, i32)) -> Self {
        Self { from, ..self }
    }

    pub fn to(self, to: (i32, i32)) -> Self {
        Self { to, ..self }
    }

    pub fn rasterize(self, color: T) {
        let Self { buffer, buffer_width, from, to } = self;
        plot_bresenham_line(
            from.0, from.1,
            to.0, to.1,
            |x, y| plot_clipped(&mut *buffer, buffer_width, x, y, color)
        )
    }
}

/// Polyline rasterizer. Points are transformed in float space and snapped to pixels afterwards.
pub struct LineStripRasterizer<'a, T: Copy + Default> {
    buffer: &'a mut [T],
    buffer_width: usize,
    transform: Transform,
    color: T
}

impl<'a, T: Copy + Default> LineStripRasterizer<'a, T> {
    pub fn create(buffer_provider: &'a mut (impl BufferProviderMut<T> + SizedSurface)) -> Self {
        let buffer_width = buffer_provider.get_width();
        let buffer = buffer_provider.get_buffer_mut();
        Self {
            buffer,
            buffer_width,
            transform: Transform::from_identity(),
            color: Default::default()
        }
    }

    pub fn with_color(self, color: T) -> Self {
        Self { color, ..self }
    }

    pub fn with_transform(self, transform: Transform) -> Self {
        Self { transform, ..self }
    }

    fn to_pixel(&self, point: Vec2) -> (i32, i32) {
        let p = self.transform.transform_point(point);
        (p.x.floor() as i32, p.y.floor() as i32)
    }

    pub fn rasterize_iter(mut self, closed: bool, points: impl IntoIterator<Item=Vec2>) {
        let mut first = None;
        let mut previous = None;
        for point in points {
            let current = self.to_pixel(point);
            match previous {
                None => first = Some(current),
                Some(previous) => {
                    LineRasterizer::create_from_raw(&mut *self.buffer, self.buffer_width)
                        .from(previous)
                        .to(current)
                        .rasterize(self.color);
                }
            }
            previous = Some(current);
        }
        if closed {
            if let (Some(first), Some(last)) = (first, previous) {
                if first != last {
                    LineRasterizer::create_from_raw(&mut *self.buffer, self.buffer_width)
                        .from(last)
                        .to(first)
                        .rasterize(self.color);
                }
            }
        }
    }

    pub fn rasterize_slice(self, closed: bool, points: &[(f32, f32)]) {
        self.rasterize_iter(closed, points.iter().map(|&(x, y)| vec2(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;
    use super::*;
    use crate::window::RetroBlitContext;

    fn lit_pixels(ctx: &RetroBlitContext, width: i16, height: i16) -> Vec<(i16, i16)> {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                if ctx.get_pixel(x, y) != Some(0) {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    #[test]
    fn circle_outline_leaves_the_center_empty() {
        let mut ctx = RetroBlitContext::new(16, 16);
        BresenhamCircleDrawer::create(&mut ctx)
            .with_position((8, 8))
            .with_radius(4)
            .draw(1);
        assert_eq!(ctx.get_pixel(8, 8), Some(0));
        assert_eq!(ctx.get_pixel(12, 8), Some(1));
        assert_eq!(ctx.get_pixel(4, 8), Some(1));
        assert_eq!(ctx.get_pixel(8, 4), Some(1));
        assert_eq!(ctx.get_pixel(8, 12), Some(1));
    }

    #[test]
    fn circle_is_clipped_by_the_buffer() {
        let mut ctx = RetroBlitContext::new(4, 4);
        BresenhamCircleDrawer::create(&mut ctx)
            .with_position((0, 0))
            .with_radius(10)
            .draw(1);
        assert!(lit_pixels(&ctx, 4, 4).is_empty());
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut ctx = RetroBlitContext::new(8, 8);
        LineRasterizer::create(&mut ctx)
            .from((1, 1))
            .to((5, 5))
            .rasterize(2);
        assert_eq!(lit_pixels(&ctx, 8, 8), vec![(1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]);
    }

    #[test]
    fn closed_strip_draws_the_returning_edge() {
        let points = [(1.0, 1.0), (5.0, 1.0), (5.0, 5.0)];

        let mut open = RetroBlitContext::new(8, 8);
        LineStripRasterizer::create(&mut open)
            .with_color(1)
            .rasterize_slice(false, &points);
        assert_eq!(open.get_pixel(3, 3), Some(0));

        let mut closed = RetroBlitContext::new(8, 8);
        LineStripRasterizer::create(&mut closed)
            .with_color(1)
            .rasterize_slice(true, &points);
        assert_eq!(closed.get_pixel(3, 3), Some(1));
    }

    #[test]
    fn strip_points_go_through_the_transform() {
        let mut ctx = RetroBlitContext::new(16, 16);
        LineStripRasterizer::create(&mut ctx)
            .with_color(3)
            .with_transform(Transform::from_angle_translation_scale(0.0, vec2(8.0, 8.0), 4.0))
            .rasterize_iter(false, [vec2(0.0, -1.0), vec2(0.0, 1.0)]);
        assert_eq!(ctx.get_pixel(8, 4), Some(3));
        assert_eq!(ctx.get_pixel(8, 12), Some(3));
        assert_eq!(ctx.get_pixel(9, 8), Some(0));
    }
}
