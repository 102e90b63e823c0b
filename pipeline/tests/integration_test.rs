//! Integration tests for stockdash-pipeline

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use stockdash_pipeline::prelude::*;

/// Helper function to create raw CSV-like rows, one per calendar day
fn create_test_rows(count: usize, base_price: f64) -> Vec<RawRow> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    (0..count)
        .map(|i| {
            let price = base_price + (i as f64 * 0.1) + (i as f64 % 10.0) * 0.5;
            let date = (start + Duration::days(i as i64)).format("%Y-%m-%d").to_string();
            RawRow::new(
                &date,
                &price.to_string(),
                &(price + 1.0).to_string(),
                &(price - 1.0).to_string(),
                &price.to_string(),
                Some("1000"),
            )
        })
        .collect()
}

fn series_from_closes(closes: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c, c, c, c, None))
        .collect::<Vec<_>>()
        .into()
}

#[test]
fn test_max_window_is_identity() {
    let series = normalize(&create_test_rows(120, 50.0)).series;
    let now = Utc.with_ymd_and_hms(2031, 6, 1, 12, 0, 0).unwrap();

    assert_eq!(TimeWindow::Max.select(&series, now), series);
}

#[test]
fn test_sma_scenario_ten_through_twenty() {
    let closes: Vec<f64> = (10..=20).map(f64::from).collect();
    let frame = IndicatorFrame::compute(
        &series_from_closes(&closes),
        &IndicatorSettings {
            sma_period: 10,
            ..IndicatorSettings::default()
        },
    )
    .unwrap();

    assert_eq!(frame.sma.len(), 11);
    assert!(frame.sma[..9].iter().all(Option::is_none));
    assert_eq!(frame.sma[10], Some(15.5));
}

#[test]
fn test_moving_averages_defined_from_period_minus_one() {
    let closes: Vec<f64> = (0..40).map(|i| 20.0 + (i as f64 * 0.4).sin()).collect();

    for n in [1, 2, 5, 20] {
        let sma = calculate_sma(&closes, n).unwrap();
        let ema = calculate_ema(&closes, n).unwrap();
        assert!(sma[..n - 1].iter().all(Option::is_none));
        assert!(ema[..n - 1].iter().all(Option::is_none));
        assert!(sma[n - 1].is_some());
        assert!(ema[n - 1].is_some());
        // EMA is seeded with the first SMA
        assert!((ema[n - 1].unwrap() - sma[n - 1].unwrap()).abs() < 1e-9);
    }
}

#[test]
fn test_macd_line_matches_ema_difference() {
    let series = normalize(&create_test_rows(80, 100.0)).series;
    let settings = IndicatorSettings::default();
    let frame = IndicatorFrame::compute(&series, &settings).unwrap();

    let closes = series.closes();
    let fast = calculate_ema(&closes, 12).unwrap();
    let slow = calculate_ema(&closes, 26).unwrap();

    for i in 0..series.len() {
        match (fast[i], slow[i]) {
            (Some(f), Some(s)) => assert!((frame.macd[i].unwrap() - (f - s)).abs() < 1e-9),
            _ => assert!(frame.macd[i].is_none()),
        }
        if let (Some(m), Some(sig)) = (frame.macd[i], frame.macd_signal[i]) {
            assert!((frame.macd_histogram[i].unwrap() - (m - sig)).abs() < 1e-12);
        }
    }
}

#[test]
fn test_stochastic_within_bounds() {
    let series = normalize(&create_test_rows(60, 30.0)).series;
    let frame = IndicatorFrame::compute(&series, &IndicatorSettings::default()).unwrap();

    assert!(frame.stoch_k[..13].iter().all(Option::is_none));
    for k in frame.stoch_k.iter().flatten() {
        assert!((0.0..=100.0).contains(k));
    }
    for d in frame.stoch_d.iter().flatten() {
        assert!((0.0..=100.0).contains(d));
    }
    assert!(frame.stoch_d[15].is_some());
}

#[test]
fn test_rsi_within_bounds() {
    let series = normalize(&create_test_rows(60, 30.0)).series;
    let frame = IndicatorFrame::compute(&series, &IndicatorSettings::default()).unwrap();

    assert!(frame.rsi[..14].iter().all(Option::is_none));
    assert!(frame.rsi[14..].iter().all(|v| matches!(v, Some(r) if (0.0..=100.0).contains(r))));
}

#[test]
fn test_pipeline_is_idempotent() {
    let rows = create_test_rows(90, 75.0);
    let request = DashboardRequest::new(Ticker::parse("amd").unwrap(), TimeWindow::OneMonth)
        .with_indicators(IndicatorKind::ALL.to_vec());
    let now = Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap();

    let first = Dashboard::build(&rows, &request, now).unwrap();
    let second = Dashboard::build(&rows, &request, now).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.frame.len(), 30);
}

#[test]
fn test_empty_input_degrades_to_zero_metrics() {
    let request = DashboardRequest::new(Ticker::parse("nvda").unwrap(), TimeWindow::FiveDays);
    let dashboard = Dashboard::build(&[], &request, Utc::now()).unwrap();

    assert!(dashboard.is_empty());
    assert_eq!(dashboard.metrics, MetricsSummary::default());
    assert!(dashboard.history.is_empty());
}

#[test]
fn test_zero_first_close_reports_zero_percent() {
    let series = series_from_closes(&[0.0, 2.0, 5.0]);
    let summary = MetricsSummary::from_series(&series);

    assert_eq!(summary.last_close, 5.0);
    assert_eq!(summary.pct_change, 0.0);
}

#[test]
fn test_window_applies_before_indicators() {
    let rows = create_test_rows(400, 10.0);
    let now = Utc.with_ymd_and_hms(2025, 2, 4, 0, 0, 0).unwrap();
    let request = DashboardRequest::new(Ticker::parse("jpm").unwrap(), TimeWindow::FiveDays);
    let dashboard = Dashboard::build(&rows, &request, now).unwrap();

    // 2024-01-01 + 399 days = 2025-02-03; 5 days back from 2025-02-04 is 2025-01-30
    assert_eq!(dashboard.frame.len(), 5);
    assert!(dashboard.frame.iter().all(|r| r.sma.is_none()));
    assert_eq!(dashboard.metrics.volume, 5000);
}

#[test]
fn test_dashboard_serializes_missing_values_as_null() {
    let rows = create_test_rows(3, 10.0);
    let request = DashboardRequest::new(Ticker::parse("aapl").unwrap(), TimeWindow::Max)
        .with_chart_type(ChartType::Line)
        .with_indicators(vec![IndicatorKind::Rsi]);
    let dashboard = Dashboard::build(&rows, &request, Utc::now()).unwrap();

    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["ticker"], "AAPL.US");
    assert_eq!(json["window"], "max");
    assert_eq!(json["chart"]["chart_type"], "line");
    assert!(json["frame"][0]["rsi"].is_null());
    assert_eq!(json["frame"][0]["date"], "2024-01-01");
    let oldest = json["history"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(oldest["date"], "01/01/2024");
    assert_eq!(oldest["exchange_time"], "2023-12-31T19:00:00-05:00");
}
