/// Asserts that every pair of consecutive body cells is one grid step apart.
#[macro_export]
macro_rules! assert_body_contiguous {
    ($agent:expr) => {
        let body: Vec<_> = $agent.body().iter().copied().collect();
        for pair in body.windows(2) {
            assert_eq!(
                pair[0].manhattan(pair[1]),
                1,
                "Body cells {:?} and {:?} are not adjacent",
                pair[0],
                pair[1]
            );
        }
    };
}

/// Asserts that a population holds exactly the configured number of genomes.
#[macro_export]
macro_rules! assert_population {
    ($engine:expr, $count:expr) => {
        assert_eq!(
            $engine.population().len(),
            $count,
            "Population count mismatch"
        );
    };
}
