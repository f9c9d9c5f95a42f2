//! Collision checks between the player box and level geometry
//!
//! Only landings are resolved against platforms: there are no side or
//! ceiling contacts, a jump passes up through any platform.

use super::geometry::Rect;

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index of the platform landed on
    pub platform: usize,
    /// Y the player's bottom edge snaps to
    pub surface_y: f32,
}

/// Find the first platform that catches a falling player
///
/// The player lands when its bottom edge lies in `[top, top + tolerance]`,
/// it strictly overlaps the platform horizontally, and it is moving down.
pub fn find_landing(
    player: &Rect,
    velocity_y: f32,
    platforms: &[Rect],
    tolerance: f32,
) -> Option<Landing> {
    if velocity_y <= 0.0 {
        return None;
    }

    platforms.iter().enumerate().find_map(|(i, platform)| {
        let bottom = player.bottom();
        let in_band = bottom >= platform.top() && bottom <= platform.top() + tolerance;
        (in_band && player.overlaps_horizontally(platform)).then_some(Landing {
            platform: i,
            surface_y: platform.top(),
        })
    })
}

/// Indices of the rectangles overlapping the player (inclusive edges)
pub fn overlapping<'a>(player: &'a Rect, rects: &'a [Rect]) -> impl Iterator<Item = usize> + 'a {
    rects
        .iter()
        .enumerate()
        .filter(move |(_, r)| player.intersects(r))
        .map(|(i, _)| i)
}

/// Whether a block is close enough to interact with
///
/// Only horizontal distance between facing edges counts, either side.
pub fn within_reach(player: &Rect, block: &Rect, reach: f32) -> bool {
    (player.left() - block.right()).abs() < reach || (player.right() - block.left()).abs() < reach
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn player_at(x: f32, bottom: f32) -> Rect {
        Rect::from_bottom_left(Vec2::new(x, bottom), Vec2::new(40.0, 60.0))
    }

    #[test]
    fn test_landing_inside_band() {
        let platforms = [Rect::new(0.0, 560.0, 500.0, 80.0)];
        let landing = find_landing(&player_at(100.0, 565.0), 6.0, &platforms, 10.0);
        assert_eq!(
            landing,
            Some(Landing {
                platform: 0,
                surface_y: 560.0
            })
        );
    }

    #[test]
    fn test_no_landing_when_rising() {
        let platforms = [Rect::new(0.0, 560.0, 500.0, 80.0)];
        assert!(find_landing(&player_at(100.0, 565.0), -3.0, &platforms, 10.0).is_none());
        assert!(find_landing(&player_at(100.0, 565.0), 0.0, &platforms, 10.0).is_none());
    }

    #[test]
    fn test_no_landing_below_band() {
        let platforms = [Rect::new(0.0, 560.0, 500.0, 80.0)];
        assert!(find_landing(&player_at(100.0, 571.0), 12.0, &platforms, 10.0).is_none());
        assert!(find_landing(&player_at(100.0, 559.0), 2.0, &platforms, 10.0).is_none());
    }

    #[test]
    fn test_edge_contact_is_not_support() {
        // Player's right edge exactly at the platform's left edge
        let platforms = [Rect::new(140.0, 560.0, 100.0, 20.0)];
        assert!(find_landing(&player_at(100.0, 562.0), 2.0, &platforms, 10.0).is_none());
    }

    #[test]
    fn test_first_platform_wins() {
        let platforms = [
            Rect::new(0.0, 560.0, 500.0, 20.0),
            Rect::new(0.0, 555.0, 500.0, 20.0),
        ];
        let landing = find_landing(&player_at(100.0, 562.0), 2.0, &platforms, 10.0).unwrap();
        assert_eq!(landing.platform, 0);
    }

    #[test]
    fn test_overlapping_indices() {
        let player = player_at(100.0, 560.0);
        let coins = [
            Rect::new(110.0, 510.0, 30.0, 30.0),
            Rect::new(400.0, 510.0, 30.0, 30.0),
            Rect::new(140.0, 530.0, 30.0, 30.0),
        ];
        let hits: Vec<_> = overlapping(&player, &coins).collect();
        assert_eq!(hits, vec![0, 2]);
    }

    #[test]
    fn test_within_reach() {
        let player = player_at(100.0, 560.0);
        assert!(within_reach(&player, &Rect::new(180.0, 400.0, 40.0, 40.0), 50.0));
        assert!(within_reach(&player, &Rect::new(20.0, 400.0, 40.0, 40.0), 50.0));
        assert!(!within_reach(&player, &Rect::new(300.0, 400.0, 40.0, 40.0), 50.0));
    }
}
