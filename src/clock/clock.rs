use chrono::Local;

/// Second-granularity wall-clock readout, refreshed by the main loop
/// independently of the countdown (pausing the timer never freezes it).
pub fn current_time_string() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn clock_readout_is_hh_mm_ss() {
        let readout = current_time_string();
        assert_eq!(readout.len(), 8);
        assert!(NaiveTime::parse_from_str(&readout, "%H:%M:%S").is_ok());
    }
}
