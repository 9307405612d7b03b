//! Geometry planner - decides target dimensions and crop rectangle.
//!
//! `plan` is a pure function from the natural image size (when known) and a
//! resize spec to the exact transform instructions. The executor resolves
//! `PreserveAspect` axes against the actual image at transform time, so the
//! planner never touches pixels or performs I/O.

use pixlift_core::models::{ImageDimensions, ResizeSpec};

/// Target for one axis of the resize step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisTarget {
    /// Scale this axis to exactly this many pixels.
    Exact(u32),
    /// Let this axis follow the image's aspect ratio.
    PreserveAspect,
}

/// Crop rectangle applied after the resize, anchored at centered gravity.
/// `x`/`y` are offsets added to the centered origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Complete transform instructions for one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformPlan {
    pub resize_width: AxisTarget,
    pub resize_height: AxisTarget,
    pub crop: Option<CropRect>,
}

impl TransformPlan {
    /// True when the plan changes nothing (both axes free, no crop).
    pub fn is_identity(&self) -> bool {
        self.resize_width == AxisTarget::PreserveAspect
            && self.resize_height == AxisTarget::PreserveAspect
            && self.crop.is_none()
    }
}

/// Compute transform instructions for a resize job.
///
/// Branches, in priority order:
/// 1. Either target dimension absent: the present axis is the sole bound,
///    aspect preserved on the other; no crop.
/// 2. Square mode with equal targets: pin the shorter natural axis so the
///    intermediate resize never undershoots the target, then center-crop the
///    overhang on the long axis. Without natural dimensions, pin both axes
///    and skip the crop (best effort, may distort).
/// 3. Bounding-box fit: bind whichever axis the box constrains first, free
///    the other; the image scales to fit entirely inside the box. Without
///    natural dimensions, pin both axes.
///
/// Unequal targets under `square = true` fall through to the fit branch
/// rather than erroring.
pub fn plan(natural: Option<ImageDimensions>, spec: &ResizeSpec) -> TransformPlan {
    match (spec.target_width, spec.target_height) {
        (None, None) => TransformPlan {
            resize_width: AxisTarget::PreserveAspect,
            resize_height: AxisTarget::PreserveAspect,
            crop: None,
        },
        (Some(width), None) => TransformPlan {
            resize_width: AxisTarget::Exact(width),
            resize_height: AxisTarget::PreserveAspect,
            crop: None,
        },
        (None, Some(height)) => TransformPlan {
            resize_width: AxisTarget::PreserveAspect,
            resize_height: AxisTarget::Exact(height),
            crop: None,
        },
        (Some(width), Some(height)) => {
            if spec.square && width == height {
                square_plan(natural, width)
            } else {
                fit_plan(natural, width, height)
            }
        }
    }
}

fn square_plan(natural: Option<ImageDimensions>, side: u32) -> TransformPlan {
    match natural {
        Some(dims) => {
            // Pin the shorter axis; the longer one keeps its aspect and is
            // trimmed by the crop.
            let (resize_width, resize_height) = if dims.width >= dims.height {
                (AxisTarget::PreserveAspect, AxisTarget::Exact(side))
            } else {
                (AxisTarget::Exact(side), AxisTarget::PreserveAspect)
            };
            TransformPlan {
                resize_width,
                resize_height,
                crop: Some(CropRect {
                    width: side,
                    height: side,
                    x: 0,
                    y: 0,
                }),
            }
        }
        None => TransformPlan {
            resize_width: AxisTarget::Exact(side),
            resize_height: AxisTarget::Exact(side),
            crop: None,
        },
    }
}

fn fit_plan(natural: Option<ImageDimensions>, width: u32, height: u32) -> TransformPlan {
    match natural {
        Some(dims) => {
            let scaled_height = dims.height as f64 / dims.width as f64 * width as f64;
            let (resize_width, resize_height) = if scaled_height <= height as f64 {
                // Relatively wider than the box: width is binding.
                (AxisTarget::Exact(width), AxisTarget::PreserveAspect)
            } else {
                (AxisTarget::PreserveAspect, AxisTarget::Exact(height))
            };
            TransformPlan {
                resize_width,
                resize_height,
                crop: None,
            }
        }
        None => TransformPlan {
            resize_width: AxisTarget::Exact(width),
            resize_height: AxisTarget::Exact(height),
            crop: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixlift_core::models::ResizeSpec;

    fn spec(width: Option<u32>, height: Option<u32>, square: bool) -> ResizeSpec {
        let mut spec = ResizeSpec::new("test", "/tmp/in.png", "/tmp/out.png");
        spec.target_width = width;
        spec.target_height = height;
        spec.square = square;
        spec
    }

    fn dims(width: u32, height: u32) -> Option<ImageDimensions> {
        Some(ImageDimensions::new(width, height))
    }

    #[test]
    fn test_auto_width_binds_height_only() {
        let plan = plan(dims(4000, 2000), &spec(None, Some(600), false));
        assert_eq!(plan.resize_width, AxisTarget::PreserveAspect);
        assert_eq!(plan.resize_height, AxisTarget::Exact(600));
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_auto_height_binds_width_only() {
        let plan = plan(dims(4000, 2000), &spec(Some(800), None, false));
        assert_eq!(plan.resize_width, AxisTarget::Exact(800));
        assert_eq!(plan.resize_height, AxisTarget::PreserveAspect);
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_both_auto_is_identity() {
        let plan = plan(dims(4000, 2000), &spec(None, None, false));
        assert!(plan.is_identity());
    }

    #[test]
    fn test_auto_branch_outranks_square() {
        // Square mode with one auto axis still takes the auto branch.
        let plan = plan(dims(4000, 2000), &spec(Some(500), None, true));
        assert_eq!(plan.resize_width, AxisTarget::Exact(500));
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_square_landscape_pins_height_and_crops() {
        // 4000x2000 into a 1000 square: height is the short axis.
        let plan = plan(dims(4000, 2000), &spec(Some(1000), Some(1000), true));
        assert_eq!(plan.resize_width, AxisTarget::PreserveAspect);
        assert_eq!(plan.resize_height, AxisTarget::Exact(1000));
        assert_eq!(
            plan.crop,
            Some(CropRect {
                width: 1000,
                height: 1000,
                x: 0,
                y: 0
            })
        );
    }

    #[test]
    fn test_square_portrait_pins_width_and_crops() {
        let plan = plan(dims(2000, 4000), &spec(Some(1000), Some(1000), true));
        assert_eq!(plan.resize_width, AxisTarget::Exact(1000));
        assert_eq!(plan.resize_height, AxisTarget::PreserveAspect);
        assert!(plan.crop.is_some());
    }

    #[test]
    fn test_square_of_square_image() {
        let plan = plan(dims(3000, 3000), &spec(Some(500), Some(500), true));
        // Either axis may be pinned; the crop must still be the exact square.
        assert_eq!(
            plan.crop,
            Some(CropRect {
                width: 500,
                height: 500,
                x: 0,
                y: 0
            })
        );
    }

    #[test]
    fn test_square_without_natural_pins_both_and_skips_crop() {
        let plan = plan(None, &spec(Some(640), Some(640), true));
        assert_eq!(plan.resize_width, AxisTarget::Exact(640));
        assert_eq!(plan.resize_height, AxisTarget::Exact(640));
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_square_with_unequal_targets_falls_back_to_fit() {
        let plan = plan(dims(4000, 2000), &spec(Some(1000), Some(800), true));
        // Treated as a plain bounding-box fit, never an error. Scaled
        // height 500 fits inside 800, so width binds.
        assert!(plan.crop.is_none());
        assert_eq!(plan.resize_width, AxisTarget::Exact(1000));
        assert_eq!(plan.resize_height, AxisTarget::PreserveAspect);
    }

    #[test]
    fn test_fit_wide_image_binds_width() {
        // 4000x2000 into 1000x1000: scaled height 500 fits, width binding.
        let plan = plan(dims(4000, 2000), &spec(Some(1000), Some(1000), false));
        assert_eq!(plan.resize_width, AxisTarget::Exact(1000));
        assert_eq!(plan.resize_height, AxisTarget::PreserveAspect);
        assert!(plan.crop.is_none());
    }

    #[test]
    fn test_fit_tall_image_binds_height() {
        let plan = plan(dims(2000, 4000), &spec(Some(1000), Some(1000), false));
        assert_eq!(plan.resize_width, AxisTarget::PreserveAspect);
        assert_eq!(plan.resize_height, AxisTarget::Exact(1000));
    }

    #[test]
    fn test_fit_exact_aspect_match_binds_width() {
        // Box aspect equals natural aspect: scaled height equals the bound.
        let plan = plan(dims(2000, 1000), &spec(Some(800), Some(400), false));
        assert_eq!(plan.resize_width, AxisTarget::Exact(800));
        assert_eq!(plan.resize_height, AxisTarget::PreserveAspect);
    }

    #[test]
    fn test_fit_never_exceeds_box() {
        // Derived axis stays inside the box across a spread of shapes.
        let cases = [
            (4000u32, 2000u32, 1000u32, 1000u32),
            (2000, 4000, 1000, 1000),
            (3000, 1000, 500, 700),
            (1000, 3000, 700, 500),
            (1234, 567, 321, 321),
            (567, 1234, 321, 321),
        ];
        for (nw, nh, tw, th) in cases {
            let plan = plan(dims(nw, nh), &spec(Some(tw), Some(th), false));
            match (plan.resize_width, plan.resize_height) {
                (AxisTarget::Exact(w), AxisTarget::PreserveAspect) => {
                    assert_eq!(w, tw);
                    let derived = (nh as f64 / nw as f64 * w as f64).round();
                    assert!(derived <= th as f64 + 0.5, "{nw}x{nh} into {tw}x{th}");
                }
                (AxisTarget::PreserveAspect, AxisTarget::Exact(h)) => {
                    assert_eq!(h, th);
                    let derived = (nw as f64 / nh as f64 * h as f64).round();
                    assert!(derived <= tw as f64 + 0.5, "{nw}x{nh} into {tw}x{th}");
                }
                other => panic!("fit plan must bind exactly one axis, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_fit_without_natural_pins_both() {
        let plan = plan(None, &spec(Some(1000), Some(800), false));
        assert_eq!(plan.resize_width, AxisTarget::Exact(1000));
        assert_eq!(plan.resize_height, AxisTarget::Exact(800));
        assert!(plan.crop.is_none());
    }
}
