//! # ScheduleStats Tests
//!
//! Verifies metric aggregation, rounding of the text summary, the per-process
//! table, and the JSON report.

use pretty_assertions::assert_eq;
use rrsim_core::sim::simulate;
use rrsim_core::stats::{Report, ScheduleStats, write_process_table};
use rstest::rstest;

use crate::common::{quantum, workload};

fn stats_for(records: &[(u32, u64, u64)], q: u64) -> ScheduleStats {
    let schedule = simulate(&workload(records), quantum(q)).unwrap();
    ScheduleStats::from_schedule(&schedule).unwrap()
}

#[test]
fn test_two_process_example_metrics() {
    let stats = stats_for(&[(1, 0, 5), (2, 2, 3)], 2);
    assert_eq!(stats.processes, 2);
    assert_eq!(stats.total_wait, 5);
    assert_eq!(stats.total_response, 0);
    assert!((stats.average_wait - 2.5).abs() < 1e-12);
    assert!((stats.average_turnaround - 6.5).abs() < 1e-12);
    assert!((stats.utilization - 8.0 / 9.0).abs() < 1e-12);
    assert_eq!(
        stats.summary(2),
        "Average waiting time: 2.50\nAverage response time: 0.00\n"
    );
}

#[rstest]
#[case::quantum_one(&[(1, 0, 4), (2, 0, 2), (3, 0, 6)], 1, "4.67", "1.00")]
#[case::classic(&[(1, 0, 7), (2, 2, 4), (3, 4, 1), (4, 5, 4)], 3, "7.00", "2.75")]
#[case::fcfs(&[(1, 0, 3), (2, 0, 5), (3, 0, 2)], 5, "3.67", "3.67")]
#[case::single(&[(42, 17, 9)], 2, "0.00", "0.00")]
fn test_summary_lines(
    #[case] records: &[(u32, u64, u64)],
    #[case] q: u64,
    #[case] wait: &str,
    #[case] response: &str,
) {
    let stats = stats_for(records, q);
    assert_eq!(
        stats.summary(2),
        format!("Average waiting time: {wait}\nAverage response time: {response}\n")
    );
}

/// Two processes contend for the first tick; the rest arrive alone.
/// Total wait and total response are both 1.
fn single_tick_of_wait(n: u32) -> Vec<(u32, u64, u64)> {
    let mut records = vec![(1, 0, 1), (2, 0, 1)];
    records.extend((3..=n).map(|pid| (pid, u64::from(pid) * 10, 1)));
    records
}

#[rstest]
#[case::exact_tie_rounds_to_even(8, "0.12")]
#[case::just_above_tie(200, "0.01")]
fn test_summary_rounding(#[case] n: u32, #[case] expected: &str) {
    let stats = stats_for(&single_tick_of_wait(n), 1);
    assert_eq!(stats.processes, n as usize);
    assert_eq!(stats.total_wait, 1);
    assert_eq!(stats.total_response, 1);
    assert_eq!(
        stats.summary(2),
        format!("Average waiting time: {expected}\nAverage response time: {expected}\n")
    );
}

#[test]
fn test_write_summary_matches_summary() {
    let stats = stats_for(&[(1, 0, 5), (2, 2, 3)], 2);
    let mut out = Vec::new();
    stats.write_summary(&mut out, 2).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), stats.summary(2));
}

#[test]
fn test_summary_precision() {
    let stats = stats_for(&[(1, 0, 4), (2, 0, 2), (3, 0, 6)], 1);
    assert_eq!(
        stats.summary(4),
        "Average waiting time: 4.6667\nAverage response time: 1.0000\n"
    );
    assert_eq!(
        stats.summary(0),
        "Average waiting time: 5\nAverage response time: 1\n"
    );
}

#[test]
fn test_process_table() {
    let schedule = simulate(&workload(&[(1, 0, 5), (2, 2, 3)]), quantum(2)).unwrap();
    let mut out = Vec::new();
    write_process_table(&mut out, &schedule).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "process 1: arrival 0 burst 5 response 0 wait 3 end 8\n\
         process 2: arrival 2 burst 3 response 0 wait 2 end 7\n"
    );
}

#[test]
fn test_json_report() {
    let schedule = simulate(&workload(&[(1, 0, 5), (2, 2, 3)]), quantum(2)).unwrap();
    let stats = ScheduleStats::from_schedule(&schedule).unwrap();
    let json = Report::new(&stats, &schedule).to_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["stats"]["quantum"], 2);
    assert_eq!(value["stats"]["total_wait"], 5);
    assert_eq!(value["stats"]["average_wait"], 2.5);
    assert_eq!(value["processes"].as_array().unwrap().len(), 2);
    assert_eq!(value["processes"][0]["wait_time"], 3);
    assert_eq!(value["processes"][1]["response_time"], 0);
}
