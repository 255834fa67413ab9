use log::debug;
use std::sync::Arc;

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::ports::splittable_task::SplittableTask;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_image::{FractalImage, ImageView};
use crate::core::data::point::Point;
use crate::core::data::rect_area::RectArea;
use crate::core::fractals::evaluator::FractalEvaluator;
use crate::core::util::sample_grid::SampleGrid;

/// How eagerly a render breaks itself up.
///
/// A task splits into a `rows` x `cols` grid (clamped to its pixel size) while it
/// has recursion levels left and holds more than `min_leaf_pixels` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitPolicy {
    pub rows: u32,
    pub cols: u32,
    pub max_depth: u32,
    pub min_leaf_pixels: u64,
}

impl SplitPolicy {
    /// Never splits; the whole image renders as one leaf.
    pub const LEAF_ONLY: Self = Self {
        rows: 1,
        cols: 1,
        max_depth: 0,
        min_leaf_pixels: 0,
    };

    #[must_use]
    pub const fn grid(rows: u32, cols: u32, max_depth: u32) -> Self {
        Self {
            rows,
            cols,
            max_depth,
            min_leaf_pixels: 0,
        }
    }
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            max_depth: 2,
            min_leaf_pixels: 256,
        }
    }
}

/// Paints one cell of a shared [`FractalImage`], recursively splitting image and
/// area in lock-step. A child's area is cut along the sample grid, so it covers
/// exactly the pixels of its view even when the cells are uneven.
#[derive(Debug)]
pub struct FractalRenderTask {
    view: ImageView,
    area: RectArea,
    evaluator: Arc<FractalEvaluator>,
    grid: Arc<SampleGrid>,
    policy: SplitPolicy,
    remaining_depth: u32,
}

impl FractalRenderTask {
    /// Root task covering all of `image`, which is mapped onto `area`.
    #[must_use]
    pub fn new(
        image: FractalImage,
        evaluator: Arc<FractalEvaluator>,
        area: RectArea,
        policy: SplitPolicy,
    ) -> Self {
        let grid = Arc::new(SampleGrid::new(&area, image.pixel_rect()));

        Self {
            view: image.view(),
            area,
            evaluator,
            grid,
            policy,
            remaining_depth: policy.max_depth,
        }
    }

    #[must_use]
    pub fn view(&self) -> &ImageView {
        &self.view
    }

    #[must_use]
    pub fn area(&self) -> &RectArea {
        &self.area
    }

    #[must_use]
    pub fn evaluator(&self) -> &Arc<FractalEvaluator> {
        &self.evaluator
    }

    #[must_use]
    pub fn policy(&self) -> SplitPolicy {
        self.policy
    }

    fn grid_size(&self) -> Option<(u32, u32)> {
        let rect = self.view.rect();

        if self.remaining_depth == 0 || rect.size() <= self.policy.min_leaf_pixels {
            return None;
        }

        let rows = self.policy.rows.clamp(1, rect.height());
        let cols = self.policy.cols.clamp(1, rect.width());

        (rows * cols > 1).then_some((rows, cols))
    }
}

impl SplittableTask for FractalRenderTask {
    type Output = FractalImage;

    fn split(&self) -> Option<Vec<Self>> {
        let (rows, cols) = self.grid_size()?;
        let views = self.view.split(rows, cols);

        debug!(
            "splitting {}x{} view at ({}, {}) into {}x{} cells",
            self.view.rect().width(),
            self.view.rect().height(),
            self.view.rect().top_left().x,
            self.view.rect().top_left().y,
            rows,
            cols
        );

        views
            .into_iter()
            .map(|view| {
                Some(Self {
                    area: self.grid.area_of(view.rect())?,
                    view,
                    evaluator: Arc::clone(&self.evaluator),
                    grid: Arc::clone(&self.grid),
                    policy: self.policy,
                    remaining_depth: self.remaining_depth - 1,
                })
            })
            .collect()
    }

    fn run_leaf<C: CancelToken>(&self, cancel: &C) -> Result<FractalImage, Cancelled> {
        let rect = self.view.rect();
        let left = rect.top_left().x;
        let top = rect.top_left().y;
        let reals = self.grid.columns(rect);

        for (y, imag) in (top..).zip(self.grid.rows(rect)) {
            for (i, (x, real)) in (left..).zip(reals).enumerate() {
                if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                    return Err(Cancelled);
                }

                let value = Complex::new(real.clone(), imag.clone());
                self.view.paint(Point { x, y }, self.evaluator.evaluate(&value));
            }
        }

        Ok(self.view.image().clone())
    }

    /// Children painted straight into the shared image, so there is nothing to merge.
    fn join(&self, _results: Vec<FractalImage>) -> FractalImage {
        self.view.image().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::async_task::AsyncTask;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;
    use crate::core::data::real::Real;
    use crate::core::fractals::function::FractalFunction;
    use crate::core::fractals::painters::factory::depth_painter_factory;
    use crate::core::fractals::painters::kinds::DepthPainterKind;

    fn r(value: f64) -> Real {
        Real::Native(value)
    }

    fn evaluator(max_depth: u32) -> Arc<FractalEvaluator> {
        Arc::new(
            FractalEvaluator::new(
                max_depth,
                r(2.0),
                depth_painter_factory(DepthPainterKind::FireGradient, max_depth),
                FractalFunction::Mandelbrot,
            )
            .unwrap(),
        )
    }

    fn area() -> RectArea {
        RectArea::new(r(-2.0), r(-1.5), r(1.0), r(1.5)).unwrap()
    }

    fn render(width: u32, height: u32, policy: SplitPolicy) -> FractalImage {
        let image = FractalImage::new(width, height).unwrap();
        let task = FractalRenderTask::new(image, evaluator(64), area(), policy);

        AsyncTask::new(task).execute().completed().unwrap()
    }

    #[test]
    fn leaf_only_policy_never_splits() {
        let image = FractalImage::new(32, 32).unwrap();
        let task = FractalRenderTask::new(image, evaluator(10), area(), SplitPolicy::LEAF_ONLY);

        assert!(task.split().is_none());
    }

    #[test]
    fn split_pairs_views_with_matching_areas() {
        let image = FractalImage::new(8, 8).unwrap();
        let task = FractalRenderTask::new(image, evaluator(10), area(), SplitPolicy::grid(2, 2, 1));
        let children = task.split().unwrap();

        assert_eq!(children.len(), 4);

        // first child is the bottom-left cell in both spaces
        assert_eq!(children[0].view().rect().top_left(), Point { x: 0, y: 4 });
        assert_eq!(children[0].area().x0(), &r(-2.0));
        assert_eq!(children[0].area().y0(), &r(-1.5));

        // last child is the top-right cell
        assert_eq!(children[3].view().rect().top_left(), Point { x: 4, y: 0 });
        assert_eq!(children[3].area().x1(), &r(1.0));
        assert_eq!(children[3].area().y1(), &r(1.5));

        assert!(children.iter().all(|child| child.split().is_none()));
    }

    #[test]
    fn uneven_split_gives_each_child_the_area_of_its_pixels() {
        let image = FractalImage::new(5, 3).unwrap();
        let task = FractalRenderTask::new(image, evaluator(10), area(), SplitPolicy::grid(2, 2, 1));
        let children = task.split().unwrap();

        for child in &children {
            let rect = child.view().rect();
            let bottom_left = Point {
                x: rect.top_left().x,
                y: rect.bottom_right().y,
            };
            let corner = task.grid.sample(bottom_left).unwrap();

            assert_eq!(child.area().x0(), &corner.real);
            assert_eq!(child.area().y0(), &corner.imag);
        }

        // the left band holds three of the five columns, not half the width
        assert_eq!(children[0].view().rect().width(), 3);
        assert_eq!(children[0].area().x1(), children[1].area().x0());
        assert_ne!(children[1].area().x0(), &r(-0.5));
        assert_eq!(children[0].area().y1(), children[2].area().y0());
        assert_eq!(children[3].area().x1(), &r(1.0));
        assert_eq!(children[3].area().y1(), &r(1.5));
    }

    #[test]
    fn split_respects_min_leaf_pixels() {
        let image = FractalImage::new(8, 8).unwrap();
        let policy = SplitPolicy {
            min_leaf_pixels: 64,
            ..SplitPolicy::grid(2, 2, 3)
        };
        let task = FractalRenderTask::new(image, evaluator(10), area(), policy);

        assert!(task.split().is_none());
    }

    #[test]
    fn split_grid_is_clamped_to_pixels() {
        let image = FractalImage::new(3, 1).unwrap();
        let task = FractalRenderTask::new(image, evaluator(10), area(), SplitPolicy::grid(4, 4, 1));

        assert_eq!(task.split().unwrap().len(), 3);
    }

    #[test]
    fn split_render_matches_leaf_render() {
        let leaf = render(24, 18, SplitPolicy::LEAF_ONLY).snapshot().unwrap();

        for policy in [
            SplitPolicy::grid(2, 3, 1),
            SplitPolicy::grid(3, 2, 2),
            SplitPolicy::grid(5, 7, 3),
        ] {
            let split = render(24, 18, policy).snapshot().unwrap();
            assert_eq!(split, leaf, "policy {:?} changed the image", policy);
        }
    }

    #[test]
    fn join_returns_the_shared_image() {
        let image = FractalImage::new(8, 8).unwrap();
        let task = FractalRenderTask::new(image.clone(), evaluator(10), area(), SplitPolicy::grid(2, 2, 1));

        let result = AsyncTask::new(task).execute().completed().unwrap();

        assert!(result.same_buffer(&image));
    }

    #[test]
    fn interior_is_painted_black_and_exterior_is_not() {
        let image = render(30, 30, SplitPolicy::default());

        // (-0.5, -0.1) lies inside the main cardioid
        assert_eq!(image.colour_at(Point { x: 15, y: 15 }), Some(Colour::BLACK));
        // (0.9, 1.4) escapes after one step
        assert_ne!(image.colour_at(Point { x: 29, y: 0 }), Some(Colour::BLACK));
    }

    #[test]
    fn cancelled_leaf_stops_and_reports_no_image() {
        let image = FractalImage::new(16, 16).unwrap();
        let task = FractalRenderTask::new(image.clone(), evaluator(10), area(), SplitPolicy::LEAF_ONLY);

        assert!(matches!(task.run_leaf(&|| true), Err(Cancelled)));
        assert!(task.run_leaf(&NeverCancel).is_ok());
    }

    #[test]
    fn cancel_before_start_leaves_image_untouched() {
        let image = FractalImage::new(16, 16).unwrap();
        let before = image.snapshot().unwrap();
        let task = AsyncTask::new(FractalRenderTask::new(
            image.clone(),
            evaluator(10),
            area(),
            SplitPolicy::default(),
        ));

        task.cancel();

        assert!(task.execute().is_cancelled());
        assert_eq!(image.snapshot().unwrap(), before);

        let rendered = render(16, 16, SplitPolicy::default()).snapshot().unwrap();
        assert_ne!(rendered, before);
    }
}
