#[cfg(test)]
mod tests {
    use crate::Time;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_new_time_has_zero_delta() {
        let time = Time::new();
        assert!((time.delta_seconds() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_update_measures_elapsed_time() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(5));
        time.update();
        assert!(time.delta_seconds() > 0.0);

        // Each update measures only since the previous one
        thread::sleep(Duration::from_millis(5));
        time.update();
        assert!(time.delta_seconds() < 1.0);
    }
}
