#![no_main]

use kinkpot::pipeline::{PhRange, Pipeline, PipelineConfig};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Parsing must either succeed or fail with an error, never panic
    let Ok(baselines) = kinkpot::input::parse_baselines(Cursor::new(data)) else {
        return;
    };

    // Any finite baselines must be solvable or rejected cleanly
    let config = PipelineConfig {
        range: PhRange::new(0.0, 14.0, 7.0).unwrap(),
        ..PipelineConfig::default()
    };
    if let Ok(pipeline) = Pipeline::new(baselines.into_model(), config) {
        let _ = pipeline.run();
    }
});
