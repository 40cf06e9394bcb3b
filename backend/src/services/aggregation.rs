//! Group-by aggregation over raw API records.
//!
//! Backs the delivery-by-zone and cost-by-carrier charts: records are grouped
//! by the text value of one field and a second field is reduced per group.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::api::Aggregate;
use crate::models::{fields, Record};

/// Reduction applied to each group.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReduceOp {
    /// Number of records in the group.
    Count,
    /// Sum of the reduce field; unusable values count as 0.
    Sum,
    /// Mean of the reduce field over records where it is numeric.
    Avg,
}

impl FromStr for ReduceOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "count" => Ok(ReduceOp::Count),
            "sum" => Ok(ReduceOp::Sum),
            "avg" | "mean" => Ok(ReduceOp::Avg),
            other => Err(format!(
                "Unsupported reduce op '{}'. Use count, sum, or avg.",
                other
            )),
        }
    }
}

impl fmt::Display for ReduceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReduceOp::Count => "count",
            ReduceOp::Sum => "sum",
            ReduceOp::Avg => "avg",
        };
        f.write_str(name)
    }
}

/// `a + b`, saturated to the finite range.
pub(crate) fn saturating_add(a: f64, b: f64) -> f64 {
    (a + b).clamp(-f64::MAX, f64::MAX)
}

#[derive(Default)]
struct GroupAccumulator {
    records: usize,
    numeric: usize,
    sum: f64,
}

impl GroupAccumulator {
    fn finish(&self, op: ReduceOp) -> f64 {
        match op {
            ReduceOp::Count => self.records as f64,
            ReduceOp::Sum => self.sum,
            ReduceOp::Avg if self.numeric == 0 => 0.0,
            ReduceOp::Avg => self.sum / self.numeric as f64,
        }
    }
}

/// Group `records` by `group_field` and reduce `reduce_field` with `op`.
///
/// Missing or empty group values fall into [`crate::models::UNKNOWN_KEY`].
/// Sums saturate at `f64::MAX` instead of overflowing.
/// For [`ReduceOp::Avg`] records without a numeric value are excluded from
/// both the sum and the divisor (SQL `AVG` semantics); a group with no
/// numeric value averages to 0. Output keeps the first-occurrence order of
/// the group keys.
pub fn aggregate(
    records: &[Record],
    group_field: &str,
    reduce_field: &str,
    op: ReduceOp,
) -> Vec<Aggregate> {
    let mut order: Vec<(String, GroupAccumulator)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = fields::key(record, group_field);
        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, GroupAccumulator::default()));
                order.len() - 1
            }
        };

        let acc = &mut order[slot].1;
        acc.records += 1;
        if let Some(value) = fields::number(record, reduce_field) {
            acc.numeric += 1;
            acc.sum = saturating_add(acc.sum, value);
        }
    }

    order
        .into_iter()
        .map(|(key, acc)| Aggregate::new(key, acc.finish(op)))
        .collect()
}

/// The `k` largest aggregates, descending by value.
///
/// Equal values keep their input order.
pub fn top_n(aggregates: &[Aggregate], k: usize) -> Vec<Aggregate> {
    let mut sorted = aggregates.to_vec();
    // sort_by is stable: ties stay in first-seen order
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));
    sorted.truncate(k);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_sum_by_group_keeps_first_seen_order() {
        let rs = records(vec![
            json!({"z": "X", "v": 2}),
            json!({"z": "Y", "v": 3}),
            json!({"z": "X", "v": 4}),
        ]);
        let out = aggregate(&rs, "z", "v", ReduceOp::Sum);
        assert_eq!(out, vec![Aggregate::new("X", 6.0), Aggregate::new("Y", 3.0)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], "z", "v", ReduceOp::Sum).is_empty());
        assert!(aggregate(&[], "z", "v", ReduceOp::Count).is_empty());
    }

    #[test]
    fn test_single_record_sum() {
        let rs = records(vec![json!({"z": "Q", "v": 7.5})]);
        assert_eq!(
            aggregate(&rs, "z", "v", ReduceOp::Sum),
            vec![Aggregate::new("Q", 7.5)]
        );
    }

    #[test]
    fn test_count_includes_records_missing_reduce_field() {
        let rs = records(vec![
            json!({"zone": "Nord"}),
            json!({"zone": "Nord", "cost": 10}),
            json!({"zone": "Sud"}),
        ]);
        let out = aggregate(&rs, "zone", "cost", ReduceOp::Count);
        assert_eq!(out, vec![Aggregate::new("Nord", 2.0), Aggregate::new("Sud", 1.0)]);
    }

    #[test]
    fn test_missing_group_goes_to_sentinel() {
        let rs = records(vec![
            json!({"v": 1}),
            json!({"z": null, "v": 2}),
            json!({"z": "", "v": 3}),
            json!({"z": "A", "v": 4}),
        ]);
        let out = aggregate(&rs, "z", "v", ReduceOp::Sum);
        assert_eq!(
            out,
            vec![Aggregate::new("unknown", 6.0), Aggregate::new("A", 4.0)]
        );
    }

    #[test]
    fn test_sum_treats_non_numeric_as_zero() {
        let rs = records(vec![
            json!({"z": "A", "v": "abc"}),
            json!({"z": "A", "v": "5"}),
            json!({"z": "A", "v": [1, 2]}),
        ]);
        assert_eq!(
            aggregate(&rs, "z", "v", ReduceOp::Sum),
            vec![Aggregate::new("A", 5.0)]
        );
    }

    #[test]
    fn test_avg_excludes_missing_values() {
        let rs = records(vec![
            json!({"carrier": "DHL", "cost": 100}),
            json!({"carrier": "DHL"}),
            json!({"carrier": "DHL", "cost": 50}),
            json!({"carrier": "UPS", "cost": null}),
        ]);
        let out = aggregate(&rs, "carrier", "cost", ReduceOp::Avg);
        assert_eq!(
            out,
            vec![Aggregate::new("DHL", 75.0), Aggregate::new("UPS", 0.0)]
        );
    }

    #[test]
    fn test_sum_saturates_instead_of_overflowing() {
        let rs = records(vec![
            json!({"z": "big", "v": 1e308}),
            json!({"z": "big", "v": 1e308}),
            json!({"z": "neg", "v": -1e308}),
            json!({"z": "neg", "v": -1e308}),
        ]);
        let sums = aggregate(&rs, "z", "v", ReduceOp::Sum);
        assert_eq!(sums, vec![Aggregate::new("big", f64::MAX), Aggregate::new("neg", -f64::MAX)]);

        let avgs = aggregate(&rs, "z", "v", ReduceOp::Avg);
        assert!(avgs.iter().all(|a| a.value.is_finite()));
        assert_eq!(avgs[0].value, f64::MAX / 2.0);
    }

    #[test]
    fn test_numeric_group_values_are_stringified() {
        let rs = records(vec![json!({"size": 42}), json!({"size": "42"})]);
        let out = aggregate(&rs, "size", "", ReduceOp::Count);
        assert_eq!(out, vec![Aggregate::new("42", 2.0)]);
    }

    #[test]
    fn test_reduce_op_from_str() {
        assert_eq!("AVG".parse::<ReduceOp>().unwrap(), ReduceOp::Avg);
        assert_eq!("mean".parse::<ReduceOp>().unwrap(), ReduceOp::Avg);
        assert!("median".parse::<ReduceOp>().is_err());
        assert_eq!(ReduceOp::Sum.to_string(), "sum");
    }

    #[test]
    fn test_top_n_is_stable_and_truncates() {
        let aggs = vec![
            Aggregate::new("a", 1.0),
            Aggregate::new("b", 5.0),
            Aggregate::new("c", 5.0),
            Aggregate::new("d", 3.0),
        ];
        let top = top_n(&aggs, 3);
        let keys: Vec<&str> = top.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c", "d"]);
        assert!(top_n(&aggs, 0).is_empty());
        assert_eq!(top_n(&aggs, 10).len(), 4);
    }
}
