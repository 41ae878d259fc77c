//! Zone geometry: maps a named tiling target to a rectangle inside a
//! monitor's work area.

use std::fmt;
use std::str::FromStr;

use crate::Rect;

/// A named tiling target.
///
/// Variant order matters: `find_closest_zone` resolves ties to the
/// earliest variant in [`Zone::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Centered,
    TopHalf,
    BottomHalf,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    LeftThird,
    LeftHalf,
    LeftTwoThirds,
    RightThird,
    RightHalf,
    RightTwoThirds,
}

impl Zone {
    /// Every zone, in enumeration order.
    pub const ALL: [Zone; 13] = [
        Zone::Centered,
        Zone::TopHalf,
        Zone::BottomHalf,
        Zone::TopLeft,
        Zone::TopRight,
        Zone::BottomLeft,
        Zone::BottomRight,
        Zone::LeftThird,
        Zone::LeftHalf,
        Zone::LeftTwoThirds,
        Zone::RightThird,
        Zone::RightHalf,
        Zone::RightTwoThirds,
    ];

    /// Identifier used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Centered => "Centered",
            Self::TopHalf => "TopHalf",
            Self::BottomHalf => "BottomHalf",
            Self::TopLeft => "TopLeft",
            Self::TopRight => "TopRight",
            Self::BottomLeft => "BottomLeft",
            Self::BottomRight => "BottomRight",
            Self::LeftThird => "LeftThird",
            Self::LeftHalf => "LeftHalf",
            Self::LeftTwoThirds => "LeftTwoThirds",
            Self::RightThird => "RightThird",
            Self::RightHalf => "RightHalf",
            Self::RightTwoThirds => "RightTwoThirds",
        }
    }

    /// Human-readable label.
    pub fn friendly_name(self) -> &'static str {
        match self {
            Self::Centered => "Centered",
            Self::TopHalf => "Top Half",
            Self::BottomHalf => "Bottom Half",
            Self::TopLeft => "Top Left",
            Self::TopRight => "Top Right",
            Self::BottomLeft => "Bottom Left",
            Self::BottomRight => "Bottom Right",
            Self::LeftThird => "Left 1/3",
            Self::LeftHalf => "Left Half",
            Self::LeftTwoThirds => "Left 2/3",
            Self::RightThird => "Right 1/3",
            Self::RightHalf => "Right Half",
            Self::RightTwoThirds => "Right 2/3",
        }
    }

    /// Computes the pixel rectangle for this zone within `work_area`.
    ///
    /// Halves split with integer division from the top-left; the second
    /// half absorbs the odd pixel so both halves always add up to the
    /// full work area.
    pub fn rect(self, work_area: &Rect) -> Rect {
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = *work_area;

        match self {
            Self::Centered => {
                let cw = w * 2 / 3;
                let ch = h * 2 / 3;
                Rect::new(x + (w - cw) / 2, y + (h - ch) / 2, cw, ch)
            }
            Self::TopHalf => Rect::new(x, y, w, h / 2),
            Self::BottomHalf => Rect::new(x, y + h / 2, w, h - h / 2),
            Self::TopLeft => Rect::new(x, y, w / 2, h / 2),
            Self::TopRight => Rect::new(x + w / 2, y, w - w / 2, h / 2),
            Self::BottomLeft => Rect::new(x, y + h / 2, w / 2, h - h / 2),
            Self::BottomRight => Rect::new(x + w / 2, y + h / 2, w - w / 2, h - h / 2),
            Self::LeftThird => Rect::new(x, y, w / 3, h),
            Self::LeftHalf => Rect::new(x, y, w / 2, h),
            Self::LeftTwoThirds => Rect::new(x, y, w * 2 / 3, h),
            Self::RightThird => Rect::new(x + w - w / 3, y, w / 3, h),
            Self::RightHalf => Rect::new(x + w / 2, y, w - w / 2, h),
            Self::RightTwoThirds => Rect::new(x + w - w * 2 / 3, y, w * 2 / 3, h),
        }
    }
}

/// Returns the zone whose rectangle is closest to `window`.
///
/// The score is the sum of absolute differences of all four rectangle
/// fields. Ties resolve to enumeration order.
pub fn find_closest_zone(window: &Rect, work_area: &Rect) -> Zone {
    let mut best = Zone::Centered;
    let mut best_score = i64::MAX;

    for zone in Zone::ALL {
        let score = window.manhattan_distance(&zone.rect(work_area));
        if score < best_score {
            best_score = score;
            best = zone;
        }
    }

    best
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = String;

    /// Parses a zone name case-insensitively, ignoring `-`, `_` and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();

        Zone::ALL
            .into_iter()
            .find(|z| z.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown zone: {s:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORK_AREAS: [Rect; 5] = [
        Rect {
            x: 0,
            y: 0,
            width: 1920,
            height: 1040,
        },
        Rect {
            x: 0,
            y: 0,
            width: 1001,
            height: 777,
        },
        Rect {
            x: -1280,
            y: 200,
            width: 1280,
            height: 1024,
        },
        Rect {
            x: 2560,
            y: -40,
            width: 3441,
            height: 1399,
        },
        Rect {
            x: 0,
            y: 48,
            width: 101,
            height: 99,
        },
    ];

    #[test]
    fn closest_zone_round_trips_every_zone() {
        for work in &WORK_AREAS {
            for zone in Zone::ALL {
                // Act
                let rect = zone.rect(work);

                // Assert
                assert_eq!(find_closest_zone(&rect, work), zone, "{zone} on {work:?}");
            }
        }
    }

    #[test]
    fn halves_partition_odd_work_areas() {
        for work in &WORK_AREAS {
            // Act
            let left = Zone::LeftHalf.rect(work);
            let right = Zone::RightHalf.rect(work);
            let top = Zone::TopHalf.rect(work);
            let bottom = Zone::BottomHalf.rect(work);

            // Assert
            assert_eq!(left.width + right.width, work.width);
            assert_eq!(left.right(), right.x);
            assert_eq!(right.right(), work.right());
            assert_eq!(top.height + bottom.height, work.height);
            assert_eq!(top.bottom(), bottom.y);
            assert_eq!(bottom.bottom(), work.bottom());
        }
    }

    #[test]
    fn quadrants_tile_the_work_area() {
        // Arrange
        let work = Rect::new(0, 0, 1001, 777);

        // Act
        let tl = Zone::TopLeft.rect(&work);
        let tr = Zone::TopRight.rect(&work);
        let bl = Zone::BottomLeft.rect(&work);
        let br = Zone::BottomRight.rect(&work);

        // Assert
        assert_eq!(tl.width + tr.width, 1001);
        assert_eq!(bl.width + br.width, 1001);
        assert_eq!(tl.height + bl.height, 777);
        assert_eq!(br.right(), work.right());
        assert_eq!(br.bottom(), work.bottom());
    }

    #[test]
    fn centered_uses_two_thirds() {
        // Act
        let rect = Zone::Centered.rect(&Rect::new(0, 0, 1800, 900));

        // Assert
        assert_eq!(rect, Rect::new(300, 150, 1200, 600));
    }

    #[test]
    fn thirds_anchor_to_their_edge() {
        // Arrange
        let work = Rect::new(100, 0, 900, 600);

        // Act / Assert
        assert_eq!(Zone::LeftThird.rect(&work), Rect::new(100, 0, 300, 600));
        assert_eq!(Zone::RightThird.rect(&work), Rect::new(700, 0, 300, 600));
        assert_eq!(Zone::LeftTwoThirds.rect(&work), Rect::new(100, 0, 600, 600));
        assert_eq!(Zone::RightTwoThirds.rect(&work), Rect::new(400, 0, 600, 600));
    }

    #[test]
    fn closest_zone_tolerates_small_offsets() {
        // Arrange
        let work = Rect::new(0, 0, 1920, 1080);
        let almost_left = Rect::new(8, 4, 950, 1070);

        // Act / Assert
        assert_eq!(find_closest_zone(&almost_left, &work), Zone::LeftHalf);
    }

    #[test]
    fn parses_names_loosely() {
        assert_eq!("LeftHalf".parse::<Zone>(), Ok(Zone::LeftHalf));
        assert_eq!("left-half".parse::<Zone>(), Ok(Zone::LeftHalf));
        assert_eq!("RIGHT_TWO_THIRDS".parse::<Zone>(), Ok(Zone::RightTwoThirds));
        assert_eq!("top left".parse::<Zone>(), Ok(Zone::TopLeft));
        assert!("Diagonal".parse::<Zone>().is_err());
        assert!("".parse::<Zone>().is_err());
    }

    #[test]
    fn friendly_names_are_distinct() {
        let mut names: Vec<_> = Zone::ALL.iter().map(|z| z.friendly_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Zone::ALL.len());
    }
}
