use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a filled circle (marker dots)
pub fn draw_circle(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel_signed(cx + dx, cy + dy);
            }
        }
    }
}

/// Outline of a circle, sampled densely enough to stay connected.
pub fn draw_circle_outline(canvas: &mut BrailleCanvas, cx: f64, cy: f64, radius: f64) {
    let steps = ((radius * 8.0).ceil() as usize).clamp(16, 4096);
    let mut prev: Option<(i32, i32)> = None;
    for s in 0..=steps {
        let t = s as f64 / steps as f64 * std::f64::consts::TAU;
        let p = ((cx + radius * t.cos()) as i32, (cy + radius * t.sin()) as i32);
        if let Some(q) = prev {
            draw_line(canvas, q.0, q.1, p.0, p.1);
        }
        prev = Some(p);
    }
}

/// Fill a screen-space triangle, clipped to the canvas.
pub fn fill_triangle(canvas: &mut BrailleCanvas, a: (i32, i32), b: (i32, i32), c: (i32, i32)) {
    let w = canvas.pixel_width() as i32;
    let h = canvas.pixel_height() as i32;
    let min_x = a.0.min(b.0).min(c.0).max(0);
    let max_x = a.0.max(b.0).max(c.0).min(w - 1);
    let min_y = a.1.min(b.1).min(c.1).max(0);
    let max_y = a.1.max(b.1).max(c.1).min(h - 1);
    if min_x > max_x || min_y > max_y {
        return;
    }

    let edge = |p: (i32, i32), q: (i32, i32), x: i32, y: i32| -> i64 {
        (q.0 - p.0) as i64 * (y - p.1) as i64 - (q.1 - p.1) as i64 * (x - p.0) as i64
    };
    let area = edge(a, b, c.0, c.1);
    if area == 0 {
        // Degenerate after rounding: still leave a visible trace.
        draw_line(canvas, a.0, a.1, b.0, b.1);
        draw_line(canvas, b.0, b.1, c.0, c.1);
        return;
    }

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let w0 = edge(b, c, x, y);
            let w1 = edge(c, a, x, y);
            let w2 = edge(a, b, x, y);
            let inside = if area > 0 {
                w0 >= 0 && w1 >= 0 && w2 >= 0
            } else {
                w0 <= 0 && w1 <= 0 && w2 <= 0
            };
            if inside {
                canvas.set_pixel(x as usize, y as usize);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert!((0..10).all(|x| canvas.is_set(x, 0)));
        assert!(!canvas.is_set(0, 1));
    }

    #[test]
    fn test_fill_triangle_either_winding() {
        for (b, c) in [((7, 0), (0, 7)), ((0, 7), (7, 0))] {
            let mut canvas = BrailleCanvas::new(4, 2);
            fill_triangle(&mut canvas, (0, 0), b, c);
            assert!(canvas.is_set(1, 1));
            assert!(canvas.is_set(3, 3));
            assert!(!canvas.is_set(7, 7));
        }
    }

    #[test]
    fn test_fill_triangle_offscreen() {
        let mut canvas = BrailleCanvas::new(2, 2);
        fill_triangle(&mut canvas, (-20, -20), (-10, -20), (-15, -10));
        assert_eq!(canvas.to_string(), "⠀⠀\n⠀⠀");
    }

    #[test]
    fn test_circle_outline_stays_hollow() {
        let mut canvas = BrailleCanvas::new(20, 10);
        draw_circle_outline(&mut canvas, 20.0, 20.0, 15.0);
        assert!(canvas.is_set(35, 20));
        assert!(!canvas.is_set(20, 20));
    }
}
