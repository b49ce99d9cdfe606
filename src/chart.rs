use serde::Serialize;

use crate::normalizer::SentimentTriple;

pub const LABELS: [&str; 3] = ["Positive", "Neutral", "Negative"];

pub const COLORS: [&str; 3] = [
    "rgba(0, 200, 117, 0.8)",
    "rgba(255, 205, 86, 0.8)",
    "rgba(255, 99, 132, 0.8)",
];

/// Doughnut hole as a share of the radius
pub const CUTOUT_PERCENT: u8 = 70;

/// Everything a chart widget needs to draw the breakdown. The legend goes
/// below the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: [&'static str; 3],
    /// Raw values in label order
    pub values: [f64; 3],
    pub colors: [&'static str; 3],
    pub cutout_percent: u8,
}

impl From<&SentimentTriple> for ChartData {
    fn from(triple: &SentimentTriple) -> Self {
        ChartData {
            labels: LABELS,
            values: [triple.positive, triple.neutral, triple.negative],
            colors: COLORS,
            cutout_percent: CUTOUT_PERCENT,
        }
    }
}

impl ChartData {
    /// Tooltip text for a segment: label and raw value.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        let label = self.labels.get(index)?;
        let value = self.values.get(index)?;
        Some(format!("{}: {}", label, value))
    }

    pub fn segments(&self) -> impl Iterator<Item = (&'static str, f64, &'static str)> + '_ {
        (0..3).map(move |i| (self.labels[i], self.values[i], self.colors[i]))
    }
}

/// Identifies one drawn chart instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Chart widget. Opaque apart from draw and destroy.
pub trait ChartSurface {
    fn draw_chart(&mut self, data: &ChartData) -> ChartHandle;
    fn destroy_chart(&mut self, handle: ChartHandle);
}

/// Holds the one live chart, destroying it before a replacement is drawn.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<ChartHandle>,
}

impl ChartSlot {
    pub fn current(&self) -> Option<ChartHandle> {
        self.current
    }

    pub fn replace<S: ChartSurface + ?Sized>(&mut self, surface: &mut S, data: &ChartData) -> ChartHandle {
        if let Some(old) = self.current.take() {
            surface.destroy_chart(old);
        }
        let handle = surface.draw_chart(data);
        self.current = Some(handle);
        handle
    }

    pub fn clear<S: ChartSurface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(old) = self.current.take() {
            surface.destroy_chart(old);
        }
    }
}
