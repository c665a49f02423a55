use image::Rgb;

use crate::raster::{Color, PixelBuffer};

const WHITE: Color = Rgb([255, 255, 255]);
const BLACK: Color = Rgb([0, 0, 0]);

// Whatever sits behind the terrain. Painted once, before any layer.
pub trait Backdrop {
    fn paint(&self, buffer: &mut PixelBuffer);
}

impl<B: Backdrop + ?Sized> Backdrop for &B {
    fn paint(&self, buffer: &mut PixelBuffer) {
        (**self).paint(buffer)
    }
}

// Solid colour over the whole buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill(pub Color);

impl Backdrop for Fill {
    fn paint(&self, buffer: &mut PixelBuffer) {
        for pixel in buffer.pixels_mut() {
            *pixel = self.0;
        }
    }
}

// Filled circle, clipped to the buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: (i64, i64),
    pub radius: i64,
    pub color: Color,
}

impl Backdrop for Disc {
    fn paint(&self, buffer: &mut PixelBuffer) {
        let (w, h) = (i64::from(buffer.width()), i64::from(buffer.height()));
        let r = self.radius.max(0);
        let (cx, cy) = self.center;

        for y in (cy - r).max(0)..(cy + r + 1).min(h) {
            for x in (cx - r).max(0)..(cx + r + 1).min(w) {
                let (dx, dy) = (x - cx, y - cy);
                if dx * dx + dy * dy <= r * r {
                    buffer.put_pixel(x as u32, y as u32, self.color);
                }
            }
        }
    }
}

// Black sky with a large moon in the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightSky {
    pub sky: Color,
    pub moon: Disc,
}

impl Default for NightSky {
    fn default() -> Self {
        Self {
            sky: BLACK,
            moon: Disc {
                center: (75, 75),
                radius: 50,
                color: WHITE,
            },
        }
    }
}

impl Backdrop for NightSky {
    fn paint(&self, buffer: &mut PixelBuffer) {
        Fill(self.sky).paint(buffer);
        self.moon.paint(buffer);
    }
}

// Sky in the palette's background colour with a small sun
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySky {
    pub sky: Color,
    pub sun: Disc,
}

impl DaySky {
    pub fn new(sky: Color) -> Self {
        Self {
            sky,
            sun: Disc {
                center: (75, 50),
                radius: 25,
                color: WHITE,
            },
        }
    }
}

impl Backdrop for DaySky {
    fn paint(&self, buffer: &mut PixelBuffer) {
        Fill(self.sky).paint(buffer);
        self.sun.paint(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disc_paints_circle_only() {
        let mut buf = PixelBuffer::from_pixel(11, 11, BLACK);
        Disc {
            center: (5, 5),
            radius: 3,
            color: WHITE,
        }
        .paint(&mut buf);
        assert_eq!(*buf.get_pixel(5, 5), WHITE);
        assert_eq!(*buf.get_pixel(8, 5), WHITE);
        assert_eq!(*buf.get_pixel(5, 2), WHITE);
        assert_eq!(*buf.get_pixel(8, 8), BLACK); // outside the radius diagonally
        assert_eq!(*buf.get_pixel(9, 5), BLACK);
    }

    #[test]
    fn disc_clips_at_edges() {
        let mut buf = PixelBuffer::from_pixel(4, 4, BLACK);
        Disc {
            center: (-1, 0),
            radius: 2,
            color: WHITE,
        }
        .paint(&mut buf);
        assert_eq!(*buf.get_pixel(0, 0), WHITE);
        assert_eq!(*buf.get_pixel(1, 0), WHITE);
        assert_eq!(*buf.get_pixel(3, 3), BLACK);
    }

    #[test]
    fn night_sky_has_moon_on_black() {
        let mut buf = PixelBuffer::from_pixel(200, 200, Rgb([9, 9, 9]));
        NightSky::default().paint(&mut buf);
        assert_eq!(*buf.get_pixel(75, 75), WHITE);
        assert_eq!(*buf.get_pixel(199, 199), BLACK);
    }

    #[test]
    fn day_sky_uses_given_background() {
        let tan = Rgb([240, 203, 163]);
        let mut buf = PixelBuffer::new(150, 100);
        DaySky::new(tan).paint(&mut buf);
        assert_eq!(*buf.get_pixel(75, 50), WHITE);
        assert_eq!(*buf.get_pixel(140, 90), tan);
    }
}
