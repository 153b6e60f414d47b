/// Resolves the path of a test fixture stored under `src/<area>/fixtures/`.
#[macro_export]
macro_rules! test_fixture {
    ($area:expr, $name:expr) => {
        format!(
            "{}/src/{}/fixtures/{}",
            env!("CARGO_MANIFEST_DIR"),
            $area,
            $name
        )
    };
}
