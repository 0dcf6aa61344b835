//! Performance benchmarks for the payroll engine.
//!
//! Measures the pure breakdown calculation and the full HTTP path through
//! the router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::calculation::calculate_breakdown;
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{Employee, PayrollPeriod};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/statutory").expect("Failed to load config")
}

fn load_employees() -> Vec<Employee> {
    ConfigLoader::load_employees("./config/employees.yaml").expect("Failed to load employees")
}

fn create_test_state() -> AppState {
    AppState::in_memory(load_config(), load_employees())
}

fn calculate_body(employee_id: &str, allowances: &str) -> String {
    serde_json::json!({
        "employee_id": employee_id,
        "month": 1,
        "year": 2026,
        "allowances": allowances
    })
    .to_string()
}

/// Benchmark: breakdown calculation without HTTP.
fn bench_breakdown(c: &mut Criterion) {
    let config = load_config();
    let employees = load_employees();
    let period = PayrollPeriod::new(1, 2026).expect("valid period");
    let rates = config.rates_for(period).expect("rates for period");

    let mut group = c.benchmark_group("breakdown");
    for employee in employees.iter().filter(|e| e.is_active()) {
        group.bench_with_input(
            BenchmarkId::new("employee", &employee.id),
            employee,
            |b, employee| {
                b.iter(|| {
                    calculate_breakdown(
                        black_box(employee),
                        period,
                        black_box(employee.allowances),
                        rates,
                    )
                })
            },
        );
    }
    group.finish();
}

/// Benchmark: POST /payroll/calculate through the router.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = calculate_body("emp_002", "45000");

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
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

/// Benchmark: a batch of calculations with varying allowances.
fn bench_batch_100(c: &mut Criterion) {
    let config = load_config();
    let employees: Vec<Employee> = load_employees()
        .into_iter()
        .filter(|e| e.is_active())
        .collect();
    let period = PayrollPeriod::new(1, 2026).expect("valid period");
    let rates = config.rates_for(period).expect("rates for period");

    let inputs: Vec<(&Employee, Decimal)> = (0..100)
        .map(|i| (&employees[i % employees.len()], Decimal::new(i as i64 * 1_000, 0)))
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));
    group.bench_function("batch_100", |b| {
        b.iter(|| {
            let results: Vec<_> = inputs
                .iter()
                .map(|(employee, allowances)| {
                    calculate_breakdown(employee, period, *allowances, rates)
                })
                .collect();
            black_box(results)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_breakdown,
    bench_calculate_endpoint,
    bench_batch_100,
);
criterion_main!(benches);
