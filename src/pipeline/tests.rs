use super::*;
use crate::model;

fn reference_params() -> ModelParameters {
    ModelParameters::new(-0.30, 1.80)
}

#[test]
fn test_default_range_includes_both_ends() {
    let values = PhRange::default().values();
    assert_eq!(values.len(), 15);
    assert_eq!(values.first(), Some(&0.0));
    assert_eq!(values.last(), Some(&14.0));
}

#[test]
fn test_fractional_step_keeps_upper_bound() {
    let range = PhRange::new(0.0, 1.0, 0.1).unwrap();
    let values = range.values();
    assert_eq!(values.len(), 11);
    assert!((values[10] - 1.0).abs() < 1e-12);
}

#[test]
fn test_off_grid_upper_bound_is_excluded() {
    let range = PhRange::new(0.0, 14.0, 4.0).unwrap();
    assert_eq!(range.values(), vec![0.0, 4.0, 8.0, 12.0]);
}

#[test]
fn test_invalid_ranges() {
    assert!(matches!(
        PhRange::new(0.0, 14.0, 0.0),
        Err(PipelineError::InvalidRange(_))
    ));
    assert!(matches!(
        PhRange::new(0.0, 14.0, -1.0),
        Err(PipelineError::InvalidRange(_))
    ));
    assert!(matches!(
        PhRange::new(14.0, 0.0, 1.0),
        Err(PipelineError::InvalidRange(_))
    ));
    assert!(matches!(
        PhRange::new(f64::NAN, 14.0, 1.0),
        Err(PipelineError::InvalidRange(_))
    ));
}

#[test]
fn test_oversized_grids_rejected() {
    // Tiny step
    assert!(matches!(
        PhRange::new(0.0, 14.0, 1e-300),
        Err(PipelineError::InvalidRange(_))
    ));
    // Span overflows to infinity
    assert!(matches!(
        PhRange::new(-1e308, 1e308, 1.0),
        Err(PipelineError::InvalidRange(_))
    ));
    // Finite but far too many points to allocate
    assert!(matches!(
        PhRange::new(0.0, 14.0, 1e-8),
        Err(PipelineError::InvalidRange(_))
    ));

    let largest = PhRange::new(0.0, (MAX_GRID_POINTS - 1) as f64, 1.0).unwrap();
    assert_eq!(largest.len(), MAX_GRID_POINTS);
    assert!(PhRange::new(0.0, MAX_GRID_POINTS as f64, 1.0).is_err());
}

#[test]
fn test_range_deserialization_validates() {
    let range: PhRange = serde_json::from_str(r#"{"min": 2.0, "max": 12.0, "step": 0.5}"#).unwrap();
    assert_eq!(range.len(), 21);
    assert_eq!(range, PhRange::new(2.0, 12.0, 0.5).unwrap());

    let json = serde_json::to_string(&PhRange::default()).unwrap();
    assert_eq!(json, r#"{"min":0.0,"max":14.0,"step":1.0}"#);

    assert!(serde_json::from_str::<PhRange>(r#"{"min": 0.0, "max": 14.0, "step": 0.0}"#).is_err());
    assert!(serde_json::from_str::<PhRange>(r#"{"min": 0.0, "max": 14.0, "step": 1e-300}"#).is_err());
}

#[test]
fn test_full_sweep() {
    let output = Pipeline::new(reference_params(), PipelineConfig::default())
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(output.rhe_series.len(), 15);
    assert_eq!(output.she_series.len(), 15);
    assert_eq!(output.ph_values(), PhRange::default().values());

    let params = reference_params();
    for (rhe, she) in output.rhe_series.iter().zip(&output.she_series) {
        assert_eq!(rhe.ph, she.ph);
        assert!(model::residual(&params, rhe.potential_rhe, rhe.ph).abs() < 1e-8);
        assert_eq!(she.potential_she, rhe_to_she(rhe.potential_rhe, rhe.ph));
    }

    // Kink shifts slowly downward vs RHE and by roughly one Nernst slope more vs SHE
    assert!(output.rhe_fit.slope < 0.0 && output.rhe_fit.slope > -0.03);
    assert!((output.she_fit.slope - (output.rhe_fit.slope - 0.059)).abs() < 1e-9);
    assert!((output.she_fit.intercept - output.rhe_fit.intercept).abs() < 1e-9);
    assert!(output.rhe_fit.r_squared > 0.99);
}

#[test]
fn test_points_and_fit_accessors() {
    let output = Pipeline::new(reference_params(), PipelineConfig::default())
        .unwrap()
        .run()
        .unwrap();
    let rhe = output.points(PotentialScale::Rhe);
    let she = output.points(PotentialScale::She);
    assert_eq!(rhe[3].0, 3.0);
    assert_eq!(rhe[3].1, output.rhe_series[3].potential_rhe);
    assert_eq!(she[3].1, output.she_series[3].potential_she);
    assert_eq!(output.fit(PotentialScale::She), &output.she_fit);
}

#[test]
fn test_failure_is_tagged_with_first_failing_ph() {
    // No real crossing at pH 0; roots appear from pH 1 upward
    let params = ModelParameters::new(-7.0, 0.0);
    let err = Pipeline::new(params, PipelineConfig::default())
        .unwrap()
        .run()
        .unwrap_err();

    assert_eq!(err.failed_ph(), Some(0.0));
    assert!(matches!(err, PipelineError::Crossing { ph, .. } if ph == 0.0));
    assert!(err.to_string().starts_with("Crossing solve failed at pH 0"));
}

#[test]
fn test_single_point_range_cannot_be_fitted() {
    let config = PipelineConfig {
        range: PhRange::new(7.0, 7.0, 1.0).unwrap(),
        ..PipelineConfig::default()
    };
    let err = Pipeline::new(reference_params(), config)
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Fit {
            scale: PotentialScale::Rhe,
            source: crate::fit::DegenerateInputError::TooFewPoints(1),
        }
    ));
}

#[test]
fn test_invalid_model_rejected_up_front() {
    let params = ModelParameters::new(f64::INFINITY, 1.8);
    let err = Pipeline::new(params, PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidModel(_)));
}

#[test]
fn test_run_is_deterministic() {
    let params = reference_params();
    let first = run(0.0, 14.0, 1.0, &params).unwrap();
    let second = run(0.0, 14.0, 1.0, &params).unwrap();

    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2.slope.to_bits(), second.2.slope.to_bits());
    assert_eq!(first.3.intercept.to_bits(), second.3.intercept.to_bits());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_flag_matches_sequential() {
    let params = reference_params();
    let sequential = Pipeline::new(params, PipelineConfig::default())
        .unwrap()
        .run()
        .unwrap();
    let parallel = Pipeline::new(
        params,
        PipelineConfig {
            parallel: true,
            ..PipelineConfig::default()
        },
    )
    .unwrap()
    .run()
    .unwrap();
    assert_eq!(sequential, parallel);
}

#[cfg(not(feature = "parallel"))]
#[test]
fn test_parallel_flag_falls_back_to_sequential() {
    let params = reference_params();
    let sequential = Pipeline::new(params, PipelineConfig::default())
        .unwrap()
        .run()
        .unwrap();
    let fallback = Pipeline::new(
        params,
        PipelineConfig {
            parallel: true,
            ..PipelineConfig::default()
        },
    )
    .unwrap()
    .run()
    .unwrap();
    assert_eq!(sequential, fallback);
}
