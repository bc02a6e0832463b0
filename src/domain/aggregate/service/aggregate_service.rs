use std::collections::BTreeMap;

use crate::core::config::region_config::RegionConfig;
use crate::core::persistence::aggregate::aggregate_summary_entity::{
    AggregateSummaryEntity, DateRange, PricePoint, PriceStats, RegionSummary,
};
use crate::core::persistence::dataset::run_record_entity::Dataset;

/// Recomputes the per-region summary from the full dataset.
///
/// Configured regions always appear (empty when never sampled); regions present
/// only in the data keep their key as display name.
pub fn aggregate(dataset: &Dataset, regions: &[RegionConfig]) -> AggregateSummaryEntity {
    let mut buckets: BTreeMap<String, RegionSummary> = regions
        .iter()
        .map(|r| (r.key.clone(), empty_summary(&r.display_name)))
        .collect();

    for record in dataset {
        for (key, sample) in &record.regions {
            buckets
                .entry(key.clone())
                .or_insert_with(|| empty_summary(key))
                .data
                .push(PricePoint {
                    timestamp: sample.timestamp,
                    retail_price: sample.retail_price,
                    unit_price: sample.unit_price,
                    currency_code: sample.currency_code.clone(),
                });
        }
    }

    for summary in buckets.values_mut() {
        summary.stats = compute_stats(&summary.data);
    }

    let date_range = match (dataset.first(), dataset.last()) {
        (Some(first), Some(last)) => Some(DateRange {
            start: first.timestamp,
            end: last.timestamp,
        }),
        _ => None,
    };

    AggregateSummaryEntity {
        last_updated: dataset.last().map(|r| r.timestamp),
        date_range,
        regions: buckets,
    }
}

fn empty_summary(display_name: &str) -> RegionSummary {
    RegionSummary {
        display_name: display_name.to_string(),
        data: Vec::new(),
        stats: PriceStats::default(),
    }
}

pub fn compute_stats(points: &[PricePoint]) -> PriceStats {
    let Some(last) = points.last() else {
        return PriceStats::default();
    };

    let (sum, min, max) = points.iter().map(|p| p.retail_price).fold(
        (0.0_f64, f64::INFINITY, f64::NEG_INFINITY),
        |(s, lo, hi), v| (s + v, lo.min(v), hi.max(v)),
    );

    PriceStats {
        count: points.len(),
        current: Some(last.retail_price),
        min: Some(min),
        max: Some(max),
        avg: Some(sum / points.len() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::dataset::run_record_entity::RunRecordEntity;
    use crate::core::persistence::dataset::sample_entity::SampleEntity;
    use chrono::{Duration, TimeZone, Utc};

    fn record(hour: u32, prices: &[(&str, f64)]) -> RunRecordEntity {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();
        let mut record = RunRecordEntity::new(ts);
        for (region, price) in prices {
            record.insert(SampleEntity {
                region: region.to_string(),
                timestamp: ts + Duration::seconds(1),
                retail_price: *price,
                unit_price: *price,
                currency_code: "USD".into(),
                location: String::new(),
                effective_start_date: String::new(),
                meter_name: String::new(),
                sku_name: String::new(),
            });
        }
        record
    }

    fn regions() -> Vec<RegionConfig> {
        vec![
            RegionConfig::new("eastus2", "East US 2"),
            RegionConfig::new("westus2", "West US 2"),
        ]
    }

    #[test]
    fn stats_for_three_runs() {
        let dataset = vec![
            record(1, &[("eastus2", 1.0)]),
            record(2, &[("eastus2", 2.0), ("westus2", 5.0)]),
            record(3, &[("eastus2", 3.0)]),
        ];

        let summary = aggregate(&dataset, &regions());
        let east = &summary.regions["eastus2"];

        assert_eq!(east.display_name, "East US 2");
        assert_eq!(
            east.stats,
            PriceStats {
                count: 3,
                current: Some(3.0),
                min: Some(1.0),
                max: Some(3.0),
                avg: Some(2.0),
            }
        );
        let prices: Vec<f64> = east.data.iter().map(|p| p.retail_price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
        assert_eq!(summary.regions["westus2"].stats.count, 1);
    }

    #[test]
    fn every_sample_lands_in_exactly_one_bucket() {
        let dataset = vec![
            record(1, &[("eastus2", 0.1), ("westus2", 0.2), ("uksouth", 0.3)]),
            record(2, &[("westus2", 0.25)]),
            record(3, &[]),
        ];

        let summary = aggregate(&dataset, &regions());
        let total_samples: usize = dataset.iter().map(|r| r.regions.len()).sum();
        let total_counted: usize = summary.regions.values().map(|r| r.stats.count).sum();

        assert_eq!(total_counted, total_samples);
        for summary in summary.regions.values() {
            assert_eq!(summary.stats.count, summary.data.len());
        }
        assert_eq!(summary.regions["uksouth"].display_name, "uksouth");
    }

    #[test]
    fn empty_dataset_yields_null_stats() {
        let summary = aggregate(&Vec::new(), &regions());

        assert_eq!(summary.last_updated, None);
        assert_eq!(summary.date_range, None);
        assert_eq!(summary.regions.len(), 2);
        assert_eq!(summary.regions["eastus2"].stats, PriceStats::default());

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["regions"]["eastus2"]["stats"]["avg"].is_null());
        assert_eq!(json["regions"]["eastus2"]["stats"]["count"], 0);
    }

    #[test]
    fn aggregation_is_repeatable() {
        let dataset = vec![record(1, &[("eastus2", 0.5)]), record(4, &[("westus2", 0.7)])];

        let first = aggregate(&dataset, &regions());
        assert_eq!(first, aggregate(&dataset, &regions()));
        assert_eq!(first.last_updated, Some(dataset[1].timestamp));
        assert_eq!(
            first.date_range,
            Some(DateRange {
                start: dataset[0].timestamp,
                end: dataset[1].timestamp,
            })
        );
    }
}
