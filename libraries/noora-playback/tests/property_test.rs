//! Property-based tests for the sequencer and reading tracker

use noora_playback::sequencer::{self, Advance, Retreat};
use noora_playback::ReadingTracker;
use proptest::prelude::*;

proptest! {
    #[test]
    fn advance_stays_in_bounds_or_finishes(
        current in 0usize..500,
        count in 1usize..500,
    ) {
        prop_assume!(current < count);
        match sequencer::advance(current, count) {
            Advance::Next(next) => {
                prop_assert_eq!(next, current + 1);
                prop_assert!(next < count);
            }
            Advance::Finished => prop_assert_eq!(current, count - 1),
        }
    }

    #[test]
    fn step_forward_never_leaves_bounds(
        current in 0usize..500,
        count in 1usize..500,
    ) {
        prop_assume!(current < count);
        let next = sequencer::step_forward(current, count);
        prop_assert!(next < count);
        prop_assert!(next >= current);
        prop_assert!(next - current <= 1);
    }

    #[test]
    fn retreat_never_goes_negative(current in 0usize..500) {
        match sequencer::retreat(current) {
            Retreat::Previous(prev) => prop_assert_eq!(prev + 1, current),
            Retreat::SeekToStart => prop_assert_eq!(current, 0),
        }
    }

    #[test]
    fn bookmark_list_respects_capacity_and_order(
        ops in prop::collection::vec((1u32..=114, 1u32..=286), 0..200),
        capacity in 1usize..=20,
    ) {
        let mut tracker = ReadingTracker::new(capacity);

        for &(surah, verse) in &ops {
            let added = tracker.toggle_bookmark(surah, verse);
            // The return value reflects the new membership state
            prop_assert_eq!(added, tracker.is_bookmarked(surah, verse));
            // Fresh insertions always land at the front
            if added {
                let head = tracker.most_recent_bookmark().unwrap();
                prop_assert_eq!((head.surah, head.verse), (surah, verse));
            }
            // Capacity is never exceeded
            prop_assert!(tracker.bookmarks().len() <= capacity);
        }

        // No duplicate (surah, verse) pairs survive
        let bookmarks = tracker.bookmarks();
        for (i, entry) in bookmarks.iter().enumerate() {
            for other in &bookmarks[i + 1..] {
                prop_assert!(!(entry.surah == other.surah && entry.verse == other.verse));
            }
        }
    }

    #[test]
    fn last_read_is_always_the_latest_write(
        writes in prop::collection::vec((1u32..=114, 1u32..=286), 1..50),
    ) {
        let mut tracker = ReadingTracker::new(20);
        for &(surah, verse) in &writes {
            tracker.set_last_read(surah, verse, "Surah");
        }

        let &(last_surah, last_verse) = writes.last().unwrap();
        let global = tracker.global_last_read().unwrap();
        prop_assert_eq!((global.surah, global.verse), (last_surah, last_verse));
        prop_assert_eq!(tracker.last_read_for_surah(last_surah), Some(last_verse));
    }
}
