//! The façade exposes everything a caller needs to run both jobs.

use std::time::Duration;

use approx::assert_abs_diff_eq;

use parareduce::comm::LocalWorld;
use parareduce::math::QuadratureRule;
use parareduce::methods::{integral_job, pi_job, IntervalSpec, Transport, TrialSpec};

fn world(size: usize) -> LocalWorld {
    LocalWorld::new(size)
        .unwrap()
        .with_recv_timeout(Duration::from_secs(30))
}

#[test]
fn integral_with_command_line_defaults() {
    let spec = IntervalSpec::new(0.0, 3.0 * std::f64::consts::PI / 2.0, 80).unwrap();
    let job = integral_job(spec, QuadratureRule::LeftRectangle, Transport::PointToPoint);
    let reports = world(3).run(|comm| job.run(comm)).unwrap();
    let report = reports[0].as_ref().unwrap();
    // Left-rectangle error at 80 points is O(h)
    assert_abs_diff_eq!(report.sequential.result, -1.0, epsilon = 5e-2);
    assert!(report.discrepancy() < 1e-6);
    let text = report.to_string();
    assert!(text.contains("result="));
    assert!(text.contains("time="));
}

#[test]
fn pi_with_command_line_defaults() {
    let spec = TrialSpec::new(1_000_000).unwrap();
    let job = pi_job(spec, 2020, Transport::Collective);
    let reports = world(4).run(|comm| job.run(comm)).unwrap();
    let report = reports[0].as_ref().unwrap();
    assert_abs_diff_eq!(report.partitioned.result, std::f64::consts::PI, epsilon = 0.05);
    assert_abs_diff_eq!(report.sequential.result, std::f64::consts::PI, epsilon = 0.05);
}
