//! Performance benchmarks for the Earnings Engine.
//!
//! Covers the pure projection pipeline and the HTTP round trip:
//! - Single projection
//! - Model comparison
//! - Residual decay across persistency rates
//! - `/calculate` and `/compare` requests through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use earnings_engine::api::{AppState, ProjectionRequest, create_router};
use earnings_engine::calculation::{build_projection, compare_models, project_residuals};
use earnings_engine::config::{CompensationSchedule, ConfigLoader};
use earnings_engine::models::{CompensationModel, DailyInputs, PeriodConfig, ResidualConfig};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/oep_2025").expect("Failed to load config");
    AppState::new(config)
}

fn scenario_inputs() -> DailyInputs {
    DailyInputs {
        applications_per_day: dec!(20),
        hours_worked: dec!(8),
    }
}

fn scenario_request() -> ProjectionRequest {
    ProjectionRequest {
        model: Some(CompensationModel::HourlyPlusCommission),
        applications_per_day: dec!(20),
        hours_worked: dec!(8),
        working_days: Some(53),
        persistency_rate: Some(dec!(70)),
        residual_months: Some(24),
        strict: false,
    }
}

/// Benchmark: One full projection, no I/O.
fn bench_build_projection(c: &mut Criterion) {
    let schedule = CompensationSchedule::default();
    let daily = scenario_inputs();
    let period = PeriodConfig::default();
    let residual = ResidualConfig {
        persistency_rate: dec!(70),
    };

    c.bench_function("build_projection", |b| {
        b.iter(|| {
            black_box(build_projection(
                black_box(CompensationModel::HourlyPlusCommission),
                black_box(&daily),
                &period,
                &residual,
                &schedule,
            ))
        })
    });
}

/// Benchmark: Both models from the same inputs.
fn bench_compare_models(c: &mut Criterion) {
    let schedule = CompensationSchedule::default();
    let daily = scenario_inputs();
    let period = PeriodConfig::default();
    let residual = ResidualConfig {
        persistency_rate: dec!(70),
    };

    c.bench_function("compare_models", |b| {
        b.iter(|| black_box(compare_models(black_box(&daily), &period, &residual, &schedule)))
    });
}

/// Benchmark: Residual projection across persistency rates.
fn bench_residual_decay(c: &mut Criterion) {
    let schedule = CompensationSchedule::default();
    let mut group = c.benchmark_group("residual_decay");

    for rate in [0u32, 35, 70, 100] {
        let persistency = Decimal::from(rate);
        group.bench_with_input(BenchmarkId::new("persistency", rate), &persistency, |b, p| {
            b.iter(|| black_box(project_residuals(black_box(dec!(1060)), *p, &schedule)))
        });
    }

    group.finish();
}

/// Benchmark: HTTP round trips through the router.
fn bench_api(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::to_string(&scenario_request()).unwrap();

    let mut group = c.benchmark_group("api");

    for uri in ["/calculate", "/compare"] {
        group.bench_with_input(BenchmarkId::new("post", uri), &uri, |b, uri| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri(*uri)
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_projection,
    bench_compare_models,
    bench_residual_decay,
    bench_api,
);
criterion_main!(benches);
