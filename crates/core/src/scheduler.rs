//! Slideshow scheduling: which screen shows next.
//!
//! The display walks an ordered screen list in a loop. Each screen carries a
//! display frequency `f`: it is eligible only on loops where
//! `(loop - 1) % f == 0`, so `f = 1` shows every loop, `f = 2` every other
//! loop starting with the first, and so on.
//!
//! [`advance`] is pure: it takes the list and the current [`Cursor`] and
//! returns the next cursor. The caller owns the cursor (in this system it
//! travels in the display page's URL), so there is no hidden position state
//! and every transition is independently testable.
//!
//! Nothing validates that some screen has `f = 1`, so a configuration where
//! no screen is eligible for many loops is representable. The walk is
//! therefore bounded to [`MAX_SWEEPS`] passes over the list and falls back
//! to the first screen with a loop increment when the bound is hit. The
//! fallback is deterministic; it never panics and never spins.

use crate::types::Screen;

/// Full passes over the screen list before `advance` gives up and resets.
pub const MAX_SWEEPS: usize = 8;

/// Position of a display session inside the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Index into the screen list of the screen currently showing.
    pub screen_index: usize,
    /// One-based count of passes over the list, used by the frequency
    /// filter. Values below 1 are treated as 1.
    pub loop_number: u64,
}

impl Cursor {
    /// The position a fresh display session starts from.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            screen_index: 0,
            loop_number: 1,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::start()
    }
}

/// Compute the next position after the current screen's time is up.
///
/// Walks strictly forward one slot at a time, wrapping to index 0 (and
/// counting a new loop) at the end of the list, and stops at the first
/// screen whose frequency admits the loop it would be shown on.
///
/// Degenerate inputs resolve deterministically instead of failing: an empty
/// list or an out-of-range index returns index 0 on the current loop, and
/// exhausting [`MAX_SWEEPS`] passes returns index 0 on the following loop.
#[must_use]
pub fn advance(screens: &[Screen], cursor: Cursor) -> Cursor {
    let loop_number = cursor.loop_number.max(1);

    if screens.is_empty() || cursor.screen_index >= screens.len() {
        // Reset rule: the list changed under us (or was never valid).
        // Resolve to the first screen without consuming a loop increment.
        return Cursor {
            screen_index: 0,
            loop_number,
        };
    }

    let mut index = cursor.screen_index;
    let mut candidate_loop = loop_number;
    for _ in 0..screens.len().saturating_mul(MAX_SWEEPS) {
        index += 1;
        if index >= screens.len() {
            index = 0;
            candidate_loop = candidate_loop.saturating_add(1);
        }
        if let Some(screen) = screens.get(index) {
            if is_eligible(screen, candidate_loop) {
                return Cursor {
                    screen_index: index,
                    loop_number: candidate_loop,
                };
            }
        }
    }

    Cursor {
        screen_index: 0,
        loop_number: loop_number.saturating_add(1),
    }
}

/// Whether a screen may be shown on the given loop.
fn is_eligible(screen: &Screen, loop_number: u64) -> bool {
    let frequency = u64::from(screen.display_frequency.max(1));
    loop_number.saturating_sub(1) % frequency == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{MenuContent, Rotation, Screen, ScreenContent, ScreenId};

    fn screen(id: &str, frequency: u32) -> Screen {
        Screen {
            id: ScreenId::new(id),
            duration_secs: None,
            display_frequency: frequency,
            content_scale: None,
            rotation: Rotation::R0,
            content: ScreenContent::Menu(MenuContent {
                categories: Vec::new(),
            }),
        }
    }

    fn cursor(screen_index: usize, loop_number: u64) -> Cursor {
        Cursor {
            screen_index,
            loop_number,
        }
    }

    #[test]
    fn test_single_screen_increments_loop_each_pass() {
        let screens = vec![screen("a", 1)];
        let mut position = Cursor::start();

        for expected_loop in 2..=6 {
            position = advance(&screens, position);
            assert_eq!(position, cursor(0, expected_loop));
        }
    }

    #[test]
    fn test_every_other_loop_frequency_sequence() {
        // A shows every loop, B only when (loop - 1) % 2 == 0.
        let screens = vec![screen("a", 1), screen("b", 2)];
        let mut position = Cursor::start();
        let mut shown = vec!["a"];

        for _ in 0..6 {
            position = advance(&screens, position);
            let id = screens[position.screen_index].id.as_str();
            shown.push(if id == "a" { "a" } else { "b" });
        }

        // Loop 2 skips B entirely; loop 3 shows it again.
        assert_eq!(shown, vec!["a", "b", "a", "a", "b", "a", "a"]);
    }

    #[test]
    fn test_advance_stays_in_bounds_and_never_rewinds_loop() {
        let screens = vec![screen("a", 1), screen("b", 2), screen("c", 3)];

        for start_index in 0..screens.len() {
            for start_loop in 1..=10 {
                let next = advance(&screens, cursor(start_index, start_loop));
                assert!(next.screen_index < screens.len());
                assert!(next.loop_number >= start_loop);
            }
        }
    }

    #[test]
    fn test_out_of_range_index_resets_without_loop_increment() {
        let screens = vec![screen("a", 1), screen("b", 1)];
        let next = advance(&screens, cursor(4, 7));
        assert_eq!(next, cursor(0, 7));
    }

    #[test]
    fn test_empty_list_resets_to_first_slot() {
        let next = advance(&[], cursor(3, 5));
        assert_eq!(next, cursor(0, 5));
    }

    #[test]
    fn test_zero_loop_is_treated_as_first() {
        let screens = vec![screen("a", 1)];
        let next = advance(&screens, cursor(0, 0));
        assert_eq!(next, cursor(0, 2));
    }

    #[test]
    fn test_zero_frequency_cannot_stall_the_walk() {
        let screens = vec![screen("a", 0)];
        let next = advance(&screens, Cursor::start());
        assert_eq!(next, cursor(0, 2));
    }

    #[test]
    fn test_exhausted_search_falls_back_to_first_screen() {
        // Eligible only on loop 1; from loop 2 the bounded walk never
        // finds it again.
        let screens = vec![screen("a", 1000)];
        let next = advance(&screens, cursor(0, 2));
        assert_eq!(next, cursor(0, 3));
    }

    #[test]
    fn test_all_screens_share_a_sparse_frequency() {
        // Both screens only run on loops 1, 4, 7, ...; from (b, 1) the next
        // stop is A on loop 4.
        let screens = vec![screen("a", 3), screen("b", 3)];
        let next = advance(&screens, cursor(1, 1));
        assert_eq!(next, cursor(0, 4));
    }
}
