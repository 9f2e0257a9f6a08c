/// Asserts that the pond holds exactly this many live swimbots.
#[macro_export]
macro_rules! assert_population {
    ($pond:expr, $count:expr) => {
        assert_eq!($pond.live_count(), $count, "Population count mismatch");
    };
}

/// Asserts that the swimbot slot at the given index is empty.
#[macro_export]
macro_rules! assert_swimbot_dead {
    ($pond:expr, $index:expr) => {
        assert!(
            $pond.swimbot($index).is_none(),
            "Swimbot {} should be dead but was found alive",
            $index
        );
    };
}

/// Asserts that the swimbot at the given index is alive and pursuing `goal`.
#[macro_export]
macro_rules! assert_goal {
    ($pond:expr, $index:expr, $goal:expr) => {
        let bot = $pond
            .swimbot($index)
            .expect("Swimbot not found in pond");
        assert_eq!(bot.goal, $goal, "Swimbot {} has an unexpected goal", $index);
    };
}
