//! Failure paths must surface as typed errors, never as NaN densities.

use seroprev::{EstimateError, Request};

#[test]
fn inconsistent_counts_fail_fast() {
    for (request, field) in [
        (Request::new(10, 11, 10, 0, 10, 10), "k"),
        (Request::new(10, 1, 10, 11, 10, 10), "k_u"),
        (Request::new(10, 1, 10, 0, 10, 11), "k_v"),
    ] {
        match request.seed(1).posterior() {
            Err(EstimateError::InvalidInput { field: got, .. }) => assert_eq!(got, field),
            other => panic!("expected InvalidInput for {field}, got {other:?}"),
        }
    }
}

#[test]
fn non_finite_priors_fail_fast() {
    let mut request = Request::new(10, 1, 10, 0, 10, 10);
    request.a_u = f64::INFINITY;
    assert!(matches!(
        request.posterior(),
        Err(EstimateError::InvalidInput { field: "a_u", .. })
    ));
}

#[test]
fn impossible_ordering_exhausts_sampling() {
    // u concentrated near 1 and v near 0: the rejection loop cannot find
    // u < v and must give up at the configured bound.
    let request = Request::new(10, 1, 0, 0, 0, 0)
        .false_positive_prior(1_000.0, 1.0)
        .true_positive_prior(1.0, 1_000.0)
        .samples(5)
        .max_attempts(100)
        .seed(7);

    match request.posterior() {
        Err(EstimateError::SamplingExhausted { sample, attempts }) => {
            assert_eq!(sample, 0);
            assert_eq!(attempts, 100);
        }
        other => panic!("expected SamplingExhausted, got {other:?}"),
    }
}

#[test]
fn underflowed_likelihood_is_ill_posed() {
    // A survey concentrated at theta = 0.5 combined with priors that pin
    // both rates near zero: every interpolated p sits where the likelihood
    // underflows to exactly zero, leaving no mass to normalize.
    let request = Request::new(100_000, 50_000, 1_000, 0, 1_000, 1_000)
        .false_positive_prior(1.0, 1_000_000.0)
        .true_positive_prior(1.0, 1_000_000.0)
        .samples(50)
        .grid(100)
        .max_attempts(100_000)
        .seed(19);

    match request.posterior() {
        Err(EstimateError::IllPosedEstimate { total }) => {
            assert!(total == 0.0 || !total.is_finite(), "total {total}");
        }
        other => panic!("expected IllPosedEstimate, got {other:?}"),
    }
}

#[test]
fn errors_render_useful_messages() {
    let err = Request::new(10, 11, 10, 0, 10, 10).posterior().unwrap_err();
    assert!(err.to_string().contains("invalid input"));

    let source: &dyn std::error::Error = &err;
    assert!(source.source().is_none());
}
