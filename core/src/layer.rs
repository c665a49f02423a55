use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

// (horizontal position, elevation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

// Sparse terrain profile, strictly ascending in x
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    points: Vec<Point>,
}

impl Layer {
    // Checked constructor for profiles that did not come out of the generator
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        for point in &points {
            if !point.x.is_finite() {
                return Err(TerrainError::NonFiniteParameter { name: "x", value: point.x });
            }
            if !point.y.is_finite() {
                return Err(TerrainError::NonFiniteParameter { name: "y", value: point.y });
            }
        }
        for (index, pair) in points.windows(2).enumerate() {
            if !(pair[0].x < pair[1].x) {
                return Err(TerrainError::UnorderedLayer {
                    index: index + 1,
                    x: pair[1].x,
                });
            }
        }
        Ok(Self { points })
    }

    // Caller guarantees ordering (the displacement generator does by construction)
    pub(crate) fn from_sorted(points: Vec<Point>) -> Self {
        debug_assert!(points.windows(2).all(|p| p[0].x < p[1].x));
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    // Horizontal extent (min x, max x)
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((self.first()?.x, self.last()?.x))
    }
}

// One point per integer column, contiguous and ascending
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    points: Vec<Point>,
}

impl DenseLayer {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    // Integer column of the first entry
    pub fn first_column(&self) -> Option<i64> {
        self.points.first().map(|p| p.x as i64)
    }

    pub fn elevation_at(&self, column: i64) -> Option<f64> {
        let first = self.first_column()?;
        let offset = usize::try_from(column.checked_sub(first)?).ok()?;
        self.points.get(offset).map(|p| p.y)
    }
}
