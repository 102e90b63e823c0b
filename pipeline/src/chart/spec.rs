//! Chart layout description handed to the rendering layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::TimeWindow;
use crate::error::PipelineError;
use crate::indicators::IndicatorKind;
use crate::ticker::Ticker;

/// RSI overbought / oversold guides
pub const RSI_LEVELS: (f64, f64) = (70.0, 30.0);
/// Stochastic overbought / oversold guides
pub const STOCHASTIC_LEVELS: (f64, f64) = (80.0, 20.0);

/// Main price trace style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Candlestick,
    Line,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candlestick => "candlestick",
            Self::Line => "line",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "candlestick" | "candle" => Ok(Self::Candlestick),
            "line" => Ok(Self::Line),
            _ => Err(PipelineError::UnknownChartType(s.to_string())),
        }
    }
}

/// How a trace is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Line,
    Dotted,
    Bar,
}

/// One plotted column of the indicator frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub name: &'static str,
    /// Field name in the frame rows
    pub column: &'static str,
    pub kind: TraceKind,
    pub color: &'static str,
}

impl Trace {
    fn new(name: &'static str, column: &'static str, kind: TraceKind, color: &'static str) -> Self {
        Self {
            name,
            column,
            kind,
            color,
        }
    }
}

/// Horizontal guide on a sub-chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: &'static str,
}

/// Separate sub-chart under the price chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub indicator: IndicatorKind,
    pub traces: Vec<Trace>,
    pub reference_lines: Vec<ReferenceLine>,
}

/// Full chart description for one dashboard request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub chart_type: ChartType,
    pub overlays: Vec<Trace>,
    pub panels: Vec<Panel>,
}

impl ChartSpec {
    /// Lay out the price chart and one sub-chart per oscillator selected
    pub fn build(
        ticker: &Ticker,
        window: TimeWindow,
        chart_type: ChartType,
        selection: &[IndicatorKind],
    ) -> Self {
        let mut overlays = Vec::new();
        let mut panels = Vec::new();

        for &kind in selection {
            let traces = traces_for(kind);
            if kind.is_overlay() {
                overlays.extend(traces);
            } else {
                panels.push(Panel {
                    title: panel_title(kind),
                    indicator: kind,
                    traces,
                    reference_lines: reference_lines_for(kind),
                });
            }
        }

        Self {
            title: format!("{} ({})", ticker, window),
            chart_type,
            overlays,
            panels,
        }
    }
}

fn traces_for(kind: IndicatorKind) -> Vec<Trace> {
    match kind {
        IndicatorKind::Sma => vec![Trace::new("SMA", "sma", TraceKind::Line, "blue")],
        IndicatorKind::Ema => vec![Trace::new("EMA", "ema", TraceKind::Line, "orange")],
        IndicatorKind::Bollinger => vec![
            Trace::new("BB Upper", "bb_upper", TraceKind::Dotted, "gray"),
            Trace::new("BB Lower", "bb_lower", TraceKind::Dotted, "gray"),
        ],
        IndicatorKind::Rsi => vec![Trace::new("RSI", "rsi", TraceKind::Line, "blue")],
        IndicatorKind::Macd => vec![
            Trace::new("MACD", "macd", TraceKind::Line, "blue"),
            Trace::new("Signal", "macd_signal", TraceKind::Line, "orange"),
            Trace::new("Histogram", "macd_histogram", TraceKind::Bar, "gray"),
        ],
        IndicatorKind::Stochastic => vec![
            Trace::new("%K", "stoch_k", TraceKind::Line, "blue"),
            Trace::new("%D", "stoch_d", TraceKind::Line, "orange"),
        ],
    }
}

fn panel_title(kind: IndicatorKind) -> &'static str {
    match kind {
        IndicatorKind::Rsi => "RSI",
        other => other.label(),
    }
}

fn reference_lines_for(kind: IndicatorKind) -> Vec<ReferenceLine> {
    match kind {
        IndicatorKind::Rsi => guides(RSI_LEVELS),
        IndicatorKind::Stochastic => guides(STOCHASTIC_LEVELS),
        _ => Vec::new(),
    }
}

fn guides((upper, lower): (f64, f64)) -> Vec<ReferenceLine> {
    vec![
        ReferenceLine {
            value: upper,
            color: "red",
        },
        ReferenceLine {
            value: lower,
            color: "green",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_for_selection() {
        let ticker = Ticker::parse("amd").unwrap();
        let selection = IndicatorKind::parse_list("rsi,bollinger,stochastic,sma").unwrap();
        let spec = ChartSpec::build(&ticker, TimeWindow::ThreeMonths, ChartType::Line, &selection);

        assert_eq!(spec.title, "AMD.US (3mo)");
        assert_eq!(spec.chart_type, ChartType::Line);
        assert_eq!(
            spec.overlays.iter().map(|t| t.column).collect::<Vec<_>>(),
            vec!["sma", "bb_upper", "bb_lower"]
        );
        assert_eq!(spec.panels.len(), 2);
        assert!(spec.panels.iter().all(|p| !p.indicator.is_overlay()));

        let rsi = &spec.panels[0];
        assert_eq!(rsi.indicator, IndicatorKind::Rsi);
        let levels =
            |panel: &Panel| panel.reference_lines.iter().map(|l| l.value).collect::<Vec<_>>();
        assert_eq!(levels(rsi), vec![70.0, 30.0]);

        let stoch = &spec.panels[1];
        assert_eq!(stoch.title, "Stochastic Oscillator");
        assert_eq!(levels(stoch), vec![80.0, 20.0]);
    }

    #[test]
    fn test_empty_selection_is_price_only() {
        let ticker = Ticker::parse("aapl").unwrap();
        let spec = ChartSpec::build(&ticker, TimeWindow::Max, ChartType::default(), &[]);

        assert_eq!(spec.chart_type, ChartType::Candlestick);
        assert!(spec.overlays.is_empty());
        assert!(spec.panels.is_empty());
    }

    #[test]
    fn test_chart_type_parse() {
        assert_eq!("Candlestick".parse::<ChartType>().unwrap(), ChartType::Candlestick);
        assert_eq!("LINE".parse::<ChartType>().unwrap(), ChartType::Line);
        assert!("area".parse::<ChartType>().is_err());
    }
}
