//! # Scheduling Properties
//!
//! Invariants that must hold for every valid workload, checked over generated
//! inputs.

use proptest::prelude::*;
use rrsim_core::sim::{ProcessDescriptor, simulate};
use rrsim_core::stats::ScheduleStats;

use crate::common::quantum;

/// Up to 12 processes with arrivals in `0..40` and bursts in `1..15`.
fn arb_workload() -> impl Strategy<Value = Vec<ProcessDescriptor>> {
    prop::collection::vec((0u64..40, 1u64..15), 1..12).prop_map(|records| {
        records
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| ProcessDescriptor::new(i as u32 + 1, arrival, burst))
            .collect()
    })
}

/// Up to 12 processes all arriving at tick 0.
fn arb_bursts() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..15, 1..12)
}

proptest! {
    #[test]
    fn prop_accounting_identity(workload in arb_workload(), q in 1u64..8) {
        let schedule = simulate(&workload, quantum(q)).unwrap();
        for (o, p) in schedule.outcomes().iter().zip(&workload) {
            prop_assert_eq!(o.pid, p.pid);
            prop_assert_eq!(o.turnaround_time(), o.burst_time + o.wait_time);
            prop_assert!(o.response_time <= o.wait_time);
            prop_assert!(o.end_time >= p.arrival_time + p.burst_time);
        }
    }

    #[test]
    fn prop_cpu_is_work_conserving(workload in arb_workload(), q in 1u64..8) {
        let schedule = simulate(&workload, quantum(q)).unwrap();
        let total_burst: u64 = workload.iter().map(|p| p.burst_time).sum();
        let latest_arrival = workload.iter().map(|p| p.arrival_time).max().unwrap();
        let last_end = schedule.outcomes().iter().map(|o| o.end_time).max().unwrap();

        prop_assert_eq!(schedule.busy_ticks(), total_burst);
        prop_assert!(last_end <= latest_arrival + total_burst);
        prop_assert_eq!(schedule.total_ticks(), last_end + 1);
    }

    #[test]
    fn prop_idempotent(workload in arb_workload(), q in 1u64..8) {
        let first = simulate(&workload, quantum(q)).unwrap();
        let second = simulate(&workload, quantum(q)).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            ScheduleStats::from_schedule(&first).unwrap(),
            ScheduleStats::from_schedule(&second).unwrap()
        );
    }

    #[test]
    fn prop_single_process_never_waits(arrival in 0u64..100, burst in 1u64..50, q in 1u64..20) {
        let schedule = simulate(&[ProcessDescriptor::new(1, arrival, burst)], quantum(q)).unwrap();
        let o = schedule.outcomes()[0];
        prop_assert_eq!(o.wait_time, 0);
        prop_assert_eq!(o.response_time, 0);
        prop_assert_eq!(o.end_time, arrival + burst);
    }

    #[test]
    fn prop_large_quantum_degenerates_to_fcfs(bursts in arb_bursts(), extra in 0u64..5) {
        let workload: Vec<_> = bursts
            .iter()
            .enumerate()
            .map(|(i, &b)| ProcessDescriptor::new(i as u32, 0, b))
            .collect();
        let q = bursts.iter().copied().max().unwrap() + extra;
        let schedule = simulate(&workload, quantum(q)).unwrap();

        let mut preceding = 0;
        for (o, &burst) in schedule.outcomes().iter().zip(&bursts) {
            prop_assert_eq!(o.wait_time, preceding);
            prop_assert_eq!(o.response_time, preceding);
            preceding += burst;
        }
    }

    #[test]
    fn prop_unit_quantum_responds_in_queue_order(bursts in arb_bursts()) {
        let workload: Vec<_> = bursts
            .iter()
            .enumerate()
            .map(|(i, &b)| ProcessDescriptor::new(i as u32, 0, b))
            .collect();
        let schedule = simulate(&workload, quantum(1)).unwrap();

        for (position, o) in schedule.outcomes().iter().enumerate() {
            prop_assert_eq!(o.response_time, position as u64);
        }
    }
}
