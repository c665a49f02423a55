use crate::layer::{DenseLayer, Layer, Point};

// Resample a sparse layer to one point per integer column in [ceil(a), floor(b)].
// Columns that coincide with a sparse point keep its elevation, the rest are
// read off the line through the two bounding sparse points.
pub fn sample(layer: &Layer) -> DenseLayer {
    let points = layer.points();
    let Some((a, b)) = layer.span() else {
        return DenseLayer::new(Vec::new());
    };

    let first = a.ceil() as i64;
    let last = b.floor() as i64;
    if first > last {
        return DenseLayer::new(Vec::new());
    }

    let count = last
        .checked_sub(first)
        .and_then(|d| d.checked_add(1))
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0);
    let mut dense = Vec::with_capacity(count);
    // Index of the left end of the current segment
    let mut seg = 0;

    for column in first..=last {
        let x = column as f64;
        while seg + 1 < points.len() && points[seg + 1].x < x {
            seg += 1;
        }

        let left = points[seg];
        let y = match points.get(seg + 1) {
            _ if left.x == x => left.y,
            Some(right) if right.x == x => right.y,
            Some(right) => interpolate(left, *right, x),
            None => left.y,
        };
        dense.push(Point::new(x, y));
    }

    DenseLayer::new(dense)
}

pub fn sample_all<'a>(layers: impl IntoIterator<Item = &'a Layer>) -> Vec<DenseLayer> {
    layers.into_iter().map(sample).collect()
}

// Elevation at `x` on the line through `p1` and `p2`
#[inline]
fn interpolate(p1: Point, p2: Point, x: f64) -> f64 {
    let m = (p2.y - p1.y) / (p2.x - p1.x);
    let c = p1.y - m * p1.x;
    m * x + c
}
