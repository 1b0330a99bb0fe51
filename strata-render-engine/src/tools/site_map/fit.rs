use bevy::prelude::*;

use crate::model::{SiteMapTransform, StrataDimensions};

/// Axis-aligned bounds of a loaded site map in its own coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SiteMapBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl SiteMapBounds {
    /// Smallest box containing every point. `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self {
                    min: point,
                    max: point,
                },
                Some(Self { min, max }) => Self {
                    min: min.min(point),
                    max: max.max(point),
                },
            })
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Larger of the two horizontal extents.
    pub fn horizontal_extent(&self) -> f32 {
        let size = self.size();
        size.x.max(size.z)
    }
}

/// Centre the map over the origin, scale its larger horizontal side to the
/// strata footprint's larger side and rest its lowest point on y = 0.
/// Flat or degenerate bounds cannot be fitted.
pub fn fit_site_map(
    bounds: &SiteMapBounds,
    dimensions: &StrataDimensions,
) -> Option<SiteMapTransform> {
    let extent = bounds.horizontal_extent();
    if !extent.is_finite() || extent <= 0.0 {
        return None;
    }
    let scale = dimensions.max_side() / extent;
    let center = bounds.center();
    let position = Vec3::new(-center.x * scale, -bounds.min.y * scale, -center.z * scale);
    Some(SiteMapTransform::new(position, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fitted_map_is_centred_scaled_and_grounded() {
        let bounds = SiteMapBounds {
            min: Vec3::new(10.0, -3.0, 20.0),
            max: Vec3::new(30.0, 5.0, 30.0),
        };
        let dims = StrataDimensions {
            width: 5.0,
            depth: 8.0,
        };
        let fitted = fit_site_map(&bounds, &dims).unwrap();
        assert_relative_eq!(fitted.scale, 0.4);

        let transform = fitted.to_transform();
        let lowest = transform.transform_point(bounds.min);
        let centre = transform.transform_point(bounds.center());
        assert_relative_eq!(lowest.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(centre.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(centre.z, 0.0, epsilon = 1e-5);

        let scaled = transform.transform_point(bounds.max) - lowest;
        assert_relative_eq!(scaled.x.max(scaled.z), 8.0, epsilon = 1e-4);
    }

    #[test]
    fn flat_bounds_cannot_be_fitted() {
        let bounds =
            SiteMapBounds::from_points([Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 4.0, 1.0)])
                .unwrap();
        assert!(fit_site_map(&bounds, &StrataDimensions::default()).is_none());
        assert!(SiteMapBounds::from_points([]).is_none());
    }
}
