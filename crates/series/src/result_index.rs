//! The assembled, axis-ready series.
//!
//! Pure assembly from the ordered axis points: date keys, labels and the
//! lookups a charting collaborator reads by date.

use dayaxis_core::{AxisPoint, PriceBar, Result};
use dayaxis_ingestion::IngestStats;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::labels::label_width;

/// Ordered axis points plus lookups keyed by canonical date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultIndex {
    points: Vec<AxisPoint>,
    dates: Vec<String>,
    index: BTreeMap<String, usize>,
    bars: BTreeMap<String, PriceBar>,
    volumes: BTreeMap<String, f64>,
    labels: Vec<String>,
    label_max_len: usize,
    stats: IngestStats,
}

impl ResultIndex {
    /// Assemble from points in ascending date order.
    ///
    /// Each point's `index` is rewritten to its position.
    pub fn from_points(mut points: Vec<AxisPoint>, stats: IngestStats) -> Self {
        let mut dates = Vec::with_capacity(points.len());
        let mut labels = Vec::with_capacity(points.len());
        let mut index = BTreeMap::new();
        let mut bars = BTreeMap::new();
        let mut volumes = BTreeMap::new();
        let mut label_max_len = 0;

        for (i, point) in points.iter_mut().enumerate() {
            debug_assert!(
                dates.last().map_or(true, |prev: &String| *prev < point.key),
                "axis points out of order at {}",
                point.key
            );
            point.index = i;

            dates.push(point.key.clone());
            index.insert(point.key.clone(), i);
            if let Some(bar) = point.bar {
                bars.insert(point.key.clone(), bar);
            }
            if let Some(volume) = point.volume {
                volumes.insert(point.key.clone(), volume);
            }
            label_max_len = label_max_len.max(label_width(&point.label));
            labels.push(point.label.clone());
        }

        Self {
            points,
            dates,
            index,
            bars,
            volumes,
            labels,
            label_max_len,
            stats,
        }
    }

    /// Number of axis points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[AxisPoint] {
        &self.points
    }

    /// Canonical date keys in axis order.
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Labels aligned with [`dates`](Self::dates), blank for placeholders.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Widest label, in characters.
    pub fn label_max_len(&self) -> usize {
        self.label_max_len
    }

    pub fn index(&self) -> &BTreeMap<String, usize> {
        &self.index
    }

    pub fn bars(&self) -> &BTreeMap<String, PriceBar> {
        &self.bars
    }

    pub fn volumes(&self) -> &BTreeMap<String, f64> {
        &self.volumes
    }

    /// Position of a date key on the axis.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn bar_for(&self, key: &str) -> Option<&PriceBar> {
        self.bars.get(key)
    }

    pub fn volume_for(&self, key: &str) -> Option<f64> {
        self.volumes.get(key).copied()
    }

    /// Lowest low and highest high over all bars.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let low = self.bars.values().map(|b| OrderedFloat(b.low)).min()?;
        let high = self.bars.values().map(|b| OrderedFloat(b.high)).max()?;
        Some((low.into_inner(), high.into_inner()))
    }

    /// Largest volume on the axis.
    pub fn max_volume(&self) -> Option<f64> {
        self.volumes
            .values()
            .copied()
            .map(OrderedFloat)
            .max()
            .map(OrderedFloat::into_inner)
    }

    /// Intake statistics of the run that produced this index.
    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
