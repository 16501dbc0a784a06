use g4scan_core::models::G4Record;

use crate::cluster::Cluster;

///
/// Strategy for reducing one cluster of overlapping records.
///
/// * `Filter` keeps the maximum-total-score subset of pairwise
///   non-overlapping records (weighted interval scheduling).
/// * `Merge` flattens the cluster to a single span whose score is the
///   record count, a density proxy rather than a quality score.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMethod {
    Filter,
    Merge,
}

impl ResolveMethod {
    pub fn resolve(&self, cluster: Cluster) -> Vec<G4Record> {
        match self {
            ResolveMethod::Filter => filter_cluster(cluster),
            ResolveMethod::Merge => merge_cluster(&cluster).into_iter().collect(),
        }
    }
}

///
/// Flatten a cluster into one record spanning all of its members. The
/// result carries no block layout and scores the number of flattened
/// records.
///
pub fn merge_cluster(cluster: &Cluster) -> Option<G4Record> {
    let first = cluster.records.first()?;
    let (start, end) = cluster.span()?;
    Some(G4Record {
        chrom: first.chrom.clone(),
        start,
        end,
        name: "cluster".to_string(),
        score: cluster.len() as f64,
        strand: first.strand,
        blocks: None,
    })
}

///
/// Select the subset of non-overlapping records with the highest total
/// score via weighted interval scheduling. Output order is unspecified;
/// callers re-sort downstream.
///
pub fn filter_cluster(cluster: Cluster) -> Vec<G4Record> {
    let mut records = cluster.records;
    match records.len() {
        0 | 1 => return records,
        2 => {
            // higher score wins, first record on a tie
            let second = records.pop().expect("two records");
            let first = records.pop().expect("two records");
            return vec![if second.score > first.score { second } else { first }];
        }
        _ => {}
    }

    // stable sort keeps arrival order between equal ends
    records.sort_by_key(|r| r.end);
    let ends: Vec<u32> = records.iter().map(|r| r.end).collect();
    let n = records.len();

    // opt index i covers the first i end-sorted records, index 0 is the
    // empty sentinel; both branch scores are kept for the backtrack
    let mut exclude = vec![0.0f64; n + 1];
    let mut include = vec![0.0f64; n + 1];
    let mut predecessor = vec![0usize; n + 1];

    for i in 1..=n {
        let record = &records[i - 1];
        // rightmost record whose end fits before this start; half-open
        // intervals make end == start compatible
        let p = ends.partition_point(|&end| end <= record.start);
        exclude[i] = exclude[i - 1].max(include[i - 1]);
        include[i] = exclude[p].max(include[p]) + record.score;
        predecessor[i] = p;
    }

    let mut kept = Vec::new();
    let mut i = n;
    while i > 0 {
        if include[i] >= exclude[i] {
            kept.push(records[i - 1].clone());
            i = predecessor[i];
        } else {
            i -= 1;
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use g4scan_core::models::Strand;

    fn record(start: u32, end: u32, score: f64) -> G4Record {
        G4Record {
            chrom: "1".to_string(),
            start,
            end,
            name: "test".to_string(),
            score,
            strand: Strand::Forward,
            blocks: None,
        }
    }

    fn cluster(records: Vec<G4Record>) -> Cluster {
        Cluster { records }
    }

    fn spans(records: &[G4Record]) -> Vec<(u32, u32, f64)> {
        let mut spans: Vec<_> = records.iter().map(|r| (r.start, r.end, r.score)).collect();
        spans.sort_by(|a, b| a.partial_cmp(b).expect("finite scores"));
        spans
    }

    /// Exhaustive maximum-score independent set, the oracle for the DP.
    fn brute_force_best(records: &[G4Record]) -> f64 {
        let n = records.len();
        let mut best = 0.0f64;
        for mask in 0u32..(1 << n) {
            let chosen: Vec<_> = (0..n).filter(|i| mask & (1 << i) != 0).collect();
            let compatible = chosen.iter().enumerate().all(|(k, &i)| {
                chosen[k + 1..]
                    .iter()
                    .all(|&j| !records[i].overlaps(records[j].start, records[j].end))
            });
            if compatible {
                let total = chosen.iter().map(|&i| records[i].score).sum();
                best = best.max(total);
            }
        }
        best
    }

    #[fixture]
    fn five_record_cluster() -> Cluster {
        cluster(vec![
            record(0, 100, 40.0),
            record(50, 150, 30.0),
            record(120, 160, 20.0),
            record(155, 200, 20.0),
            record(165, 300, 50.0),
        ])
    }

    #[test]
    fn test_merge_singleton_is_idempotent() {
        let merged = merge_cluster(&cluster(vec![record(1, 100, 40.0)])).unwrap();
        assert_eq!((merged.start, merged.end), (1, 100));
        assert_eq!(merged.score, 1.0);
        assert_eq!(merged.name, "cluster");
        assert_eq!(merged.blocks, None);
    }

    #[rstest]
    #[case(vec![record(0, 100, 40.0), record(50, 150, 30.0)], (0, 150, 2.0))]
    #[case(
        vec![record(0, 100, 40.0), record(50, 150, 30.0), record(120, 160, 20.0)],
        (0, 160, 3.0)
    )]
    fn test_merge_flattens_to_span(
        #[case] records: Vec<G4Record>,
        #[case] expected: (u32, u32, f64),
    ) {
        let merged = merge_cluster(&cluster(records)).unwrap();
        assert_eq!((merged.start, merged.end, merged.score), expected);
    }

    #[rstest]
    fn test_merge_five_record_cluster(five_record_cluster: Cluster) {
        let merged = merge_cluster(&five_record_cluster).unwrap();
        assert_eq!((merged.start, merged.end, merged.score), (0, 300, 5.0));
    }

    #[test]
    fn test_merge_empty_cluster_is_nothing() {
        assert_eq!(merge_cluster(&cluster(vec![])), None);
    }

    #[test]
    fn test_filter_keeps_singleton() {
        let kept = filter_cluster(cluster(vec![record(1, 100, 40.0)]));
        assert_eq!(spans(&kept), vec![(1, 100, 40.0)]);
    }

    #[test]
    fn test_filter_two_records_keeps_higher_scoring() {
        let kept = filter_cluster(cluster(vec![
            record(0, 100, 40.0),
            record(50, 150, 30.0),
        ]));
        assert_eq!(spans(&kept), vec![(0, 100, 40.0)]);
    }

    #[test]
    fn test_filter_two_record_tie_keeps_first() {
        let kept = filter_cluster(cluster(vec![
            record(0, 100, 40.0),
            record(50, 150, 40.0),
        ]));
        assert_eq!(spans(&kept), vec![(0, 100, 40.0)]);
    }

    #[test]
    fn test_filter_three_records() {
        let kept = filter_cluster(cluster(vec![
            record(0, 100, 40.0),
            record(50, 150, 30.0),
            record(120, 160, 20.0),
        ]));
        assert_eq!(spans(&kept), vec![(0, 100, 40.0), (120, 160, 20.0)]);
    }

    #[rstest]
    fn test_filter_five_records(five_record_cluster: Cluster) {
        let kept = filter_cluster(five_record_cluster);
        assert_eq!(
            spans(&kept),
            vec![(0, 100, 40.0), (120, 160, 20.0), (165, 300, 50.0)]
        );
    }

    #[rstest]
    fn test_filter_matches_brute_force_oracle(five_record_cluster: Cluster) {
        let fixtures = vec![
            five_record_cluster,
            cluster(vec![
                record(0, 100, 40.0),
                record(50, 150, 30.0),
                record(120, 160, 20.0),
            ]),
            cluster(vec![
                record(0, 300, 10.0),
                record(10, 50, 6.0),
                record(60, 110, 6.0),
                record(120, 290, 6.0),
            ]),
            cluster(vec![
                record(0, 40, 5.0),
                record(20, 80, 9.0),
                record(60, 120, 5.0),
                record(100, 140, 9.0),
                record(130, 180, 1.0),
            ]),
        ];
        for fixture in fixtures {
            let oracle = brute_force_best(&fixture.records);
            let kept = filter_cluster(fixture);
            let total: f64 = kept.iter().map(|r| r.score).sum();
            assert_eq!(total, oracle);
        }
    }

    #[test]
    fn test_filter_schedules_touching_records_together() {
        // [0,100) and [100,200) share a boundary base but do not overlap
        let kept = filter_cluster(cluster(vec![
            record(0, 100, 10.0),
            record(50, 150, 5.0),
            record(100, 200, 10.0),
        ]));
        assert_eq!(spans(&kept), vec![(0, 100, 10.0), (100, 200, 10.0)]);
    }

    #[rstest]
    fn test_resolve_method_dispatch(five_record_cluster: Cluster) {
        let merged = ResolveMethod::Merge.resolve(five_record_cluster.clone());
        assert_eq!(merged.len(), 1);
        let filtered = ResolveMethod::Filter.resolve(five_record_cluster);
        assert_eq!(filtered.len(), 3);
    }
}
