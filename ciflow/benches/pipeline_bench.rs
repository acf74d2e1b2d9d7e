//! Benchmarks for pipeline construction and execution.

use ciflow::config::{CiDetection, RunConfig};
use ciflow::console::Console;
use ciflow::context::{PipelineContext, RunIdentity};
use ciflow::pipeline::standard::ci_pipeline;
use ciflow::testing::RecordingLauncher;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

fn pipeline_benchmark(c: &mut Criterion) {
    let config = RunConfig::new(CiDetection::present());

    c.bench_function("build_ci_pipeline", |b| {
        b.iter(|| black_box(ci_pipeline(&config, Arc::new(RecordingLauncher::new()))))
    });

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    c.bench_function("run_ci_pipeline_recorded", |b| {
        b.iter(|| {
            let pipeline = ci_pipeline(&config, Arc::new(RecordingLauncher::new())).expect("pipeline");
            let ctx = Arc::new(
                PipelineContext::new(pipeline.name(), RunIdentity::new()).with_console(Console::sink()),
            );
            black_box(runtime.block_on(pipeline.run(ctx)))
        })
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
