use minitree::prelude::*;
use minitree::prune;

use rand::prelude::*;
use rand::rngs::StdRng;


// The class depends on `x` only; `shade` and `level` are noise,
// and every tenth label is flipped.
fn noisy(n: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let shades = ["light", "dark", "grey"];

    let rows = (0..n).map(|i| {
        let x = rng.gen_range(0.0..10.0_f64);
        let shade = shades[rng.gen_range(0..shades.len())];
        let level = rng.gen_range(0..5_i64);

        let mut class = if x < 5.0 { "low" } else { "high" };
        if i % 10 == 0 {
            class = if class == "low" { "high" } else { "low" };
        }
        vec![Value::from(x), Value::from(shade), Value::from(level), Value::from(class)]
    })
    .collect::<Vec<_>>();

    Dataset::from_rows(["x", "shade", "level", "class"], rows).unwrap()
}


fn learner() -> DecisionTree {
    DecisionTreeBuilder::new("class")
        .attribute("shade", Scale::Nominal)
        .attribute("level", Scale::Ordinal)
        .attribute("x", Scale::Ratio)
        .build()
}


#[test]
fn pruning_never_grows_the_tree() {
    let data = noisy(300, 1234);
    let (train, valid) = data.split_holdout(0.7, 5678).unwrap();
    let tree = learner().fit(&train).unwrap();

    for penalty in [0.0, 0.5, 1.0, 5.0] {
        let (pruned, history) = Pruner::new()
            .penalty(penalty)
            .prune_with_history(&tree, &valid)
            .unwrap();

        assert!(pruned.leaves() <= tree.leaves());
        assert_eq!(history[0].leaves, tree.leaves());
        assert_eq!(history[0].round, 0);

        let accepted = history.iter()
            .filter(|step| step.accepted)
            .collect::<Vec<_>>();
        for pair in accepted.windows(2) {
            assert!(pair[1].leaves <= pair[0].leaves);
            assert!(pair[1].max_depth < pair[0].max_depth);
            assert!(pair[1].estimate < pair[0].estimate);
        }

        let last = accepted.last().unwrap();
        assert_eq!(pruned.leaves(), last.leaves);
        assert_eq!(pruned.depth(), last.max_depth);

        // Only the final trim may be rejected.
        if let Some(rejected) = history.iter().find(|step| !step.accepted) {
            assert_eq!(rejected.round, history.len() - 1);
            assert!(last.estimate <= rejected.estimate);
        }
    }
}


#[test]
fn pruned_tree_keeps_the_signal() {
    let data = noisy(400, 42);
    let (train, valid) = data.split_holdout(0.6, 7).unwrap();
    let tree = learner().fit(&train).unwrap();
    let pruned = learner().fit_pruned(&train, &valid, &Pruner::new()).unwrap();

    let class = tree.class();
    let tree_errors = tree.misclassified(&valid, class) as f64;
    let pruned_errors = pruned.misclassified(&valid, class) as f64;
    let n = valid.len() as f64;

    let estimate = |errors: f64, leaves: usize| (errors + leaves as f64 * 0.5) / n;
    assert!(
        estimate(pruned_errors, pruned.leaves()) <= estimate(tree_errors, tree.leaves())
    );
    assert!(pruned_errors / n < 0.3);
}


#[test]
fn free_function_checks_the_class() {
    let data = noisy(60, 3);
    let (train, valid) = data.split_holdout(0.5, 3).unwrap();
    let tree = learner().fit(&train).unwrap();

    assert!(matches!(
        prune(&tree, &valid, "shade", None, None),
        Err(TreeError::ClassMismatch { .. })
    ));

    let mut events: Vec<TraceEvent> = Vec::new();
    let pruned = prune(&tree, &valid, "class", Some(1.0), Some(&mut events)).unwrap();
    let direct = Pruner::new().penalty(1.0).prune(&tree, &valid).unwrap();
    assert_eq!(pruned, direct);
    assert!(events.iter().all(|e| matches!(e, TraceEvent::Prune { .. })));
    assert!(!events.is_empty());
}


#[test]
fn holdout_ratio_is_checked() {
    let data = noisy(10, 0);
    assert!(matches!(data.split_holdout(1.0, 0), Err(TreeError::InvalidRatio { .. })));
    let (train, valid) = data.split_holdout(0.8, 0).unwrap();
    assert_eq!(train.len(), 8);
    assert_eq!(valid.len(), 2);
}
