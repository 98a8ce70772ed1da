use egui::{Color32, Pos2, Vec2};
use image::{Rgba, RgbaImage};

use super::display_list::{Blend, Dash, DrawOp, HANDLE_FILL, HANDLE_STROKE, HANDLE_STROKE_WIDTH};
use crate::geometry::distance_to_line_segment;

/// Software canvas the display list is rasterized into.
///
/// Pixels are straight (unpremultiplied) RGBA. Draw operations are given in
/// surface points and scaled by the device pixel ratio here, so the scene
/// itself never stores scaled coordinates.
pub struct Raster {
    image: RgbaImage,
    scale: f32,
}

impl Raster {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            scale,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }

    /// Pixel under a surface point, if it lies on the canvas.
    pub fn pixel_at(&self, pos: Pos2) -> Option<Rgba<u8>> {
        let x = (pos.x * self.scale).floor();
        let y = (pos.y * self.scale).floor();
        if x < 0.0 || y < 0.0 || x >= self.image.width() as f32 || y >= self.image.height() as f32 {
            return None;
        }
        Some(*self.image.get_pixel(x as u32, y as u32))
    }

    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    pub fn draw(&mut self, ops: &[DrawOp]) {
        for op in ops {
            match op {
                DrawOp::Path {
                    points,
                    closed,
                    width,
                    color,
                    dash,
                    blend,
                } => self.stroke_path(points, *closed, *width, *color, *dash, *blend),
                DrawOp::Dot {
                    center,
                    radius,
                    color,
                    blend,
                } => self.fill_disc(*center, *radius, *color, *blend),
                DrawOp::Handle { center, radius } => {
                    self.fill_disc(*center, *radius, HANDLE_FILL, Blend::SourceOver);
                    self.stroke_ring(*center, *radius, HANDLE_STROKE_WIDTH, HANDLE_STROKE);
                }
            }
        }
    }

    fn stroke_path(
        &mut self,
        points: &[Pos2],
        closed: bool,
        width: f32,
        color: Color32,
        dash: Option<Dash>,
        blend: Blend,
    ) {
        let scaled: Vec<Pos2> = points.iter().map(|p| self.to_device(*p)).collect();
        let mut segments: Vec<(Pos2, Pos2)> = scaled.windows(2).map(|w| (w[0], w[1])).collect();
        if closed && scaled.len() > 2 {
            segments.push((scaled[scaled.len() - 1], scaled[0]));
        }
        if let Some(dash) = dash {
            segments = dash_segments(&segments, dash.on * self.scale, dash.off * self.scale);
        }
        let half = (width * self.scale / 2.0).max(0.5);
        self.cover_segments(&segments, half, color, blend);
    }

    /// Coverage is the max over all segments, so joints are not blended twice.
    fn cover_segments(&mut self, segments: &[(Pos2, Pos2)], half: f32, color: Color32, blend: Blend) {
        let Some((x0, y0, x1, y1)) = self.clip_box(
            segments.iter().flat_map(|(a, b)| [*a, *b]),
            half + 1.0,
        ) else {
            return;
        };
        let w = (x1 - x0) as usize;
        let mut coverage = vec![0.0f32; w * (y1 - y0) as usize];

        for (a, b) in segments {
            let Some((sx0, sy0, sx1, sy1)) = self.clip_box([*a, *b].into_iter(), half + 1.0) else {
                continue;
            };
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let distance = distance_to_line_segment(center, *a, *b);
                    let c = (half + 0.5 - distance).clamp(0.0, 1.0);
                    let slot = &mut coverage[(y - y0) as usize * w + (x - x0) as usize];
                    *slot = slot.max(c);
                }
            }
        }

        for y in y0..y1 {
            for x in x0..x1 {
                let c = coverage[(y - y0) as usize * w + (x - x0) as usize];
                if c > 0.0 {
                    composite(self.image.get_pixel_mut(x, y), color, c, blend);
                }
            }
        }
    }

    fn fill_disc(&mut self, center: Pos2, radius: f32, color: Color32, blend: Blend) {
        let center = self.to_device(center);
        let radius = (radius * self.scale).max(0.5);
        let Some((x0, y0, x1, y1)) = self.clip_box(std::iter::once(center), radius + 1.0) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let distance = center.distance(Pos2::new(x as f32 + 0.5, y as f32 + 0.5));
                let c = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if c > 0.0 {
                    composite(self.image.get_pixel_mut(x, y), color, c, blend);
                }
            }
        }
    }

    fn stroke_ring(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        let center = self.to_device(center);
        let radius = radius * self.scale;
        let half = (width * self.scale / 2.0).max(0.5);
        let Some((x0, y0, x1, y1)) = self.clip_box(std::iter::once(center), radius + half + 1.0)
        else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let distance = center.distance(Pos2::new(x as f32 + 0.5, y as f32 + 0.5));
                let c = (half + 0.5 - (distance - radius).abs()).clamp(0.0, 1.0);
                if c > 0.0 {
                    composite(self.image.get_pixel_mut(x, y), color, c, Blend::SourceOver);
                }
            }
        }
    }

    fn to_device(&self, p: Pos2) -> Pos2 {
        Pos2::new(p.x * self.scale, p.y * self.scale)
    }

    /// Pixel box around the points grown by `pad`, clipped to the image.
    fn clip_box(&self, points: impl Iterator<Item = Pos2>, pad: f32) -> Option<(u32, u32, u32, u32)> {
        let mut min = Pos2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Pos2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min = min.min(p);
            max = max.max(p);
        }
        if !min.x.is_finite() || !max.x.is_finite() {
            return None;
        }
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = (min.x - pad).floor().clamp(0.0, w);
        let y0 = (min.y - pad).floor().clamp(0.0, h);
        let x1 = (max.x + pad).ceil().clamp(0.0, w);
        let y1 = (max.y + pad).ceil().clamp(0.0, h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Blends `color` at `coverage` into a straight-alpha pixel.
fn composite(pixel: &mut Rgba<u8>, color: Color32, coverage: f32, blend: Blend) {
    let [sr, sg, sb, sa] = color.to_srgba_unmultiplied();
    let src_a = sa as f32 / 255.0 * coverage;
    let dst_a = pixel[3] as f32 / 255.0;

    match blend {
        Blend::DestinationOut => {
            pixel[3] = (dst_a * (1.0 - src_a) * 255.0).round() as u8;
        }
        Blend::SourceOver => {
            let out_a = src_a + dst_a * (1.0 - src_a);
            if out_a <= 0.0 {
                return;
            }
            for (i, src) in [sr, sg, sb].into_iter().enumerate() {
                let mixed =
                    (src as f32 * src_a + pixel[i] as f32 * dst_a * (1.0 - src_a)) / out_a;
                pixel[i] = mixed.round().clamp(0.0, 255.0) as u8;
            }
            pixel[3] = (out_a * 255.0).round() as u8;
        }
    }
}

/// Splits segments into dashes, carrying the pattern phase across joints.
fn dash_segments(segments: &[(Pos2, Pos2)], on: f32, off: f32) -> Vec<(Pos2, Pos2)> {
    if on <= 0.0 || off <= 0.0 {
        return segments.to_vec();
    }
    let period = on + off;
    let mut out = Vec::new();
    let mut phase = 0.0f32;

    for (a, b) in segments {
        let length = a.distance(*b);
        if length <= f32::EPSILON {
            continue;
        }
        let direction: Vec2 = (*b - *a) / length;
        let mut travelled = 0.0f32;
        while travelled < length {
            let in_period = phase % period;
            let (drawing, left_in_run) = if in_period < on {
                (true, on - in_period)
            } else {
                (false, period - in_period)
            };
            let step = left_in_run.min(length - travelled);
            if drawing {
                out.push((*a + direction * travelled, *a + direction * (travelled + step)));
            }
            travelled += step;
            phase += step;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(from: Pos2, to: Pos2, width: f32, color: Color32, blend: Blend) -> DrawOp {
        DrawOp::Path {
            points: vec![from, to],
            closed: false,
            width,
            color,
            dash: None,
            blend,
        }
    }

    #[test]
    fn source_over_paints_opaque_ink() {
        let mut raster = Raster::new(40, 40, 1.0);
        raster.draw(&[line(Pos2::new(5.0, 20.0), Pos2::new(35.0, 20.0), 4.0, Color32::RED, Blend::SourceOver)]);

        assert_eq!(raster.pixel_at(Pos2::new(20.0, 20.0)), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(raster.pixel_at(Pos2::new(20.0, 5.0)), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn destination_out_punches_through() {
        let mut raster = Raster::new(40, 40, 1.0);
        raster.draw(&[
            line(Pos2::new(5.0, 20.0), Pos2::new(35.0, 20.0), 4.0, Color32::RED, Blend::SourceOver),
            line(Pos2::new(20.0, 5.0), Pos2::new(20.0, 35.0), 8.0, Color32::BLACK, Blend::DestinationOut),
        ]);

        assert_eq!(raster.pixel_at(Pos2::new(20.0, 20.0)).map(|p| p[3]), Some(0));
        assert_eq!(raster.pixel_at(Pos2::new(8.0, 20.0)).map(|p| p[3]), Some(255));
    }

    #[test]
    fn scale_maps_points_to_device_pixels() {
        let mut raster = Raster::new(80, 80, 2.0);
        raster.draw(&[DrawOp::Dot {
            center: Pos2::new(20.0, 20.0),
            radius: 3.0,
            color: Color32::BLUE,
            blend: Blend::SourceOver,
        }]);
        assert_eq!(raster.size(), [80, 80]);
        assert_eq!(raster.pixel_at(Pos2::new(20.0, 20.0)).map(|p| p[3]), Some(255));
        assert_eq!(raster.pixel_at(Pos2::new(30.0, 20.0)).map(|p| p[3]), Some(0));
    }

    #[test]
    fn dashes_alternate() {
        let dashes = dash_segments(&[(Pos2::new(0.0, 0.0), Pos2::new(30.0, 0.0))], 8.0, 6.0);
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[0], (Pos2::new(0.0, 0.0), Pos2::new(8.0, 0.0)));
        assert_eq!(dashes[1], (Pos2::new(14.0, 0.0), Pos2::new(22.0, 0.0)));
        assert_eq!(dashes[2], (Pos2::new(28.0, 0.0), Pos2::new(30.0, 0.0)));
    }
}
