use crate::rendering::surface::{BufferProviderMut, SizedSurface};

pub fn fill_rectangle(
    dest: &mut (impl BufferProviderMut<u8> + SizedSurface),
    x: i16, y: i16,
    w: u16, h: u16,
    color: u8
) {
    let (dw, dh) = (dest.get_width(), dest.get_height());
    let mut w = w as i32;
    let mut h = h as i32;

    if x < 0 { w += x as i32; }
    if y < 0 { h += y as i32; }
    if w <= 0 || h <= 0 { return; }

    let x = x.max(0) as usize;
    let y = y.max(0) as usize;
    if x >= dw || y >= dh { return; }

    let right = (x + w as usize).min(dw);
    let bottom = (y + h as usize).min(dh);
    let buffer = dest.get_buffer_mut();

    for row in y..bottom {
        let stride = row * dw;
        for px in &mut buffer[stride + x..stride + right] {
            *px = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::surface::BufferProvider;
    use crate::window::RetroBlitContext;

    #[test]
    fn fills_only_the_rectangle() {
        let mut ctx = RetroBlitContext::new(4, 3);
        fill_rectangle(&mut ctx, 1, 1, 2, 1, 5);
        assert_eq!(ctx.get_buffer(), &[
            0, 0, 0, 0,
            0, 5, 5, 0,
            0, 0, 0, 0
        ]);
    }

    #[test]
    fn clips_against_every_edge() {
        let mut ctx = RetroBlitContext::new(3, 3);
        fill_rectangle(&mut ctx, -2, -2, 4, 4, 1);
        fill_rectangle(&mut ctx, 2, 2, 10, 10, 2);
        fill_rectangle(&mut ctx, 5, 0, 1, 1, 3);
        assert_eq!(ctx.get_buffer(), &[
            1, 1, 0,
            1, 1, 0,
            0, 0, 2
        ]);
    }
}
