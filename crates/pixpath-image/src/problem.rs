use std::fmt;
use std::path::Path;

use image::{Rgb, RgbImage};
use log::info;
use pixpath_core::{Point, Range};
use pixpath_search::{GoalFn, HeuristicFn, SearchProblem};

/// Colour used by [`ImageProblem::paint_path`].
pub const PATH_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Cost of stepping between two adjacent pixels.
///
/// `1 + Σ (Δc / 32)²` over the R, G and B channels. Diagonal steps cost the
/// same as cardinal ones.
#[inline]
pub fn edge_cost(a: Rgb<u8>, b: Rgb<u8>) -> f64 {
    1.0 + a
        .0
        .iter()
        .zip(b.0.iter())
        .map(|(&ca, &cb)| {
            let d = (f64::from(ca) - f64::from(cb)) / 32.0;
            d * d
        })
        .sum::<f64>()
}

/// Errors raised while loading, addressing or saving an image problem.
#[derive(Debug)]
pub enum ImageError {
    /// The image could not be opened or decoded.
    Load(image::ImageError),
    /// The painted path image could not be written.
    Save(image::ImageError),
    /// The image has no pixels.
    Empty,
    /// A coordinate lies outside the image.
    OutOfBounds { point: Point, width: u32, height: u32 },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load(e) => write!(f, "cannot load image: {e}"),
            Self::Save(e) => write!(f, "cannot save image: {e}"),
            Self::Empty => write!(f, "image has no pixels"),
            Self::OutOfBounds {
                point,
                width,
                height,
            } => write!(f, "pixel {point} is outside the {width}x{height} image"),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(e) | Self::Save(e) => Some(e),
            _ => None,
        }
    }
}

/// Eight-way movement over the pixels of an RGB image.
///
/// States are `(x, y)` pixel coordinates. The goal test and heuristic vary per
/// query, so both are supplied by the caller.
pub struct ImageProblem {
    img: RgbImage,
    bounds: Range,
    goal: GoalFn<Point>,
    heuristic: HeuristicFn<Point>,
}

impl ImageProblem {
    /// Decode the image at `path` (converted to 8-bit RGB).
    pub fn open(
        path: impl AsRef<Path>,
        goal: impl Fn(Point) -> bool + Send + Sync + 'static,
        heuristic: impl Fn(Point) -> f64 + Send + Sync + 'static,
    ) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(ImageError::Load)?.to_rgb8();
        info!("loaded {} ({}x{})", path.display(), img.width(), img.height());
        Self::from_image(img, goal, heuristic)
    }

    /// Wrap an already decoded image.
    pub fn from_image(
        img: RgbImage,
        goal: impl Fn(Point) -> bool + Send + Sync + 'static,
        heuristic: impl Fn(Point) -> f64 + Send + Sync + 'static,
    ) -> Result<Self, ImageError> {
        let bounds = Range::with_size(img.width() as i32, img.height() as i32);
        if bounds.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            img,
            bounds,
            goal: Box::new(goal),
            heuristic: Box::new(heuristic),
        })
    }

    /// Replace the goal test.
    pub fn with_goal_fn(mut self, goal: impl Fn(Point) -> bool + Send + Sync + 'static) -> Self {
        self.goal = Box::new(goal);
        self
    }

    /// Replace the heuristic.
    pub fn with_heuristic(
        mut self,
        heuristic: impl Fn(Point) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.heuristic = Box::new(heuristic);
        self
    }

    /// Lower-right pixel, the usual goal.
    #[inline]
    pub fn bottom_right(&self) -> Point {
        Point::new(self.bounds.max.x - 1, self.bounds.max.y - 1)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// The source image.
    #[inline]
    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    /// Validate a pixel coordinate against the image.
    pub fn point(&self, x: i32, y: i32) -> Result<Point, ImageError> {
        let point = Point::new(x, y);
        if self.bounds.contains(point) {
            Ok(point)
        } else {
            Err(ImageError::OutOfBounds {
                point,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Colour at `p`, or `None` outside the image.
    #[inline]
    pub fn pixel(&self, p: Point) -> Option<Rgb<u8>> {
        if self.bounds.contains(p) {
            Some(*self.img.get_pixel(p.x as u32, p.y as u32))
        } else {
            None
        }
    }

    /// A copy of the image with every state of `path` painted [`PATH_COLOR`].
    /// Points outside the image are ignored.
    pub fn paint_path(&self, path: &[Point]) -> RgbImage {
        let mut out = self.img.clone();
        for &p in path {
            if self.bounds.contains(p) {
                out.put_pixel(p.x as u32, p.y as u32, PATH_COLOR);
            }
        }
        out
    }

    /// Paint `path` and write the result to `dest`; the format follows the
    /// file extension.
    pub fn save_path(&self, path: &[Point], dest: impl AsRef<Path>) -> Result<(), ImageError> {
        let dest = dest.as_ref();
        self.paint_path(path).save(dest).map_err(ImageError::Save)?;
        info!("wrote {}-state path to {}", path.len(), dest.display());
        Ok(())
    }
}

impl fmt::Debug for ImageProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageProblem")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl SearchProblem for ImageProblem {
    type State = Point;

    fn successors(&self, state: Point, buf: &mut Vec<(Point, f64)>) {
        let Some(here) = self.pixel(state) else {
            return;
        };
        for n in state.neighbors_8() {
            if let Some(there) = self.pixel(n) {
                buf.push((n, edge_cost(here, there)));
            }
        }
    }

    #[inline]
    fn is_goal(&self, state: Point) -> bool {
        (self.goal)(state)
    }

    #[inline]
    fn h(&self, state: Point) -> f64 {
        (self.heuristic)(state)
    }
}
