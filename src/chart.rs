//! Scaling data series into SVG coordinates for the line charts.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    fn inner_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    fn inner_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }
}

/// Minimum and maximum over every series, or `None` if there are no finite values.
pub fn bounds<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> Option<(f64, f64)> {
    series
        .into_iter()
        .flat_map(|s| s.iter().copied())
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Map `values` onto the viewport, evenly spaced on x, scaled to `(min, max)`
/// on y with larger values higher up. A flat range is drawn mid-height.
pub fn points(values: &[f64], (min, max): (f64, f64), viewport: Viewport) -> Vec<(f64, f64)> {
    let span = max - min;
    let step = if values.len() > 1 {
        viewport.inner_width() / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = viewport.padding + step * i as f64;
            let ratio = if span > 0.0 { (v - min) / span } else { 0.5 };
            let y = viewport.padding + viewport.inner_height() * (1.0 - ratio);
            (x, y)
        })
        .collect()
}

/// `points` formatted for an SVG `polyline`.
pub fn polyline(values: &[f64], bounds: (f64, f64), viewport: Viewport) -> String {
    points(values, bounds, viewport)
        .into_iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `count` evenly spaced axis values from `min` to `max`.
pub fn ticks((min, max): (f64, f64), count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![min],
        _ => (0..count)
            .map(|i| min + (max - min) * i as f64 / (count - 1) as f64)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport::new(100.0, 50.0, 0.0);

    #[test]
    fn extremes_touch_the_edges() {
        let pts = points(&[1.0, 3.0, 2.0], (1.0, 3.0), VIEW);
        assert_eq!(pts, vec![(0.0, 50.0), (50.0, 0.0), (100.0, 25.0)]);
    }

    #[test]
    fn flat_series_sits_mid_height() {
        let pts = points(&[4.0, 4.0], (4.0, 4.0), VIEW);
        assert!(pts.iter().all(|&(_, y)| y == 25.0));
    }

    #[test]
    fn padding_insets_the_line() {
        let view = Viewport::new(100.0, 50.0, 10.0);
        assert_eq!(polyline(&[0.0, 1.0], (0.0, 1.0), view), "10.0,40.0 90.0,10.0");
    }

    #[test]
    fn bounds_ignore_non_finite() {
        let a = [2.0, f64::NAN];
        let b = [-1.0, 5.0];
        assert_eq!(bounds([&a[..], &b[..]]), Some((-1.0, 5.0)));
        assert_eq!(bounds(std::iter::empty::<&[f64]>()), None);
    }

    #[test]
    fn tick_spacing() {
        assert_eq!(ticks((0.0, 10.0), 3), vec![0.0, 5.0, 10.0]);
        assert!(ticks((0.0, 10.0), 0).is_empty());
    }
}
