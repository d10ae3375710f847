use minitree::prelude::*;
use minitree::{BranchKey, Pivot, build_tree, classify, split};
use minitree::decision_tree::Node;

use polars::prelude::*;

use std::collections::HashMap;


fn colors() -> Dataset {
    let color = Series::new(
        "color",
        &["red", "blue", "red", "red", "blue", "blue", "red", "blue", "red", "blue"],
    );
    let size = Series::new("size", &[3i64, 1, 4, 1, 5, 9, 2, 6, 5, 3]);
    let class = Series::new(
        "class",
        &["hot", "cold", "hot", "hot", "cold", "cold", "hot", "cold", "hot", "cold"],
    );
    let df = DataFrame::new(vec![color, size, class]).unwrap();
    Dataset::from_dataframe(&df).unwrap()
}


// length:  1  2  3 | 8  9 10
// class:   A  A  A | B  B  B
fn lengths() -> Dataset {
    let length = Series::new("length", &[8.0, 1.0, 10.0, 3.0, 9.0, 2.0]);
    let class = Series::new("class", &["B", "A", "B", "A", "B", "A"]);
    let df = DataFrame::new(vec![length, class]).unwrap();
    Dataset::from_dataframe(&df).unwrap()
}


fn mixed() -> Dataset {
    let outlook = Series::new(
        "outlook",
        &["sunny", "sunny", "overcast", "rain", "rain", "rain", "overcast",
          "sunny", "sunny", "rain", "sunny", "overcast", "overcast", "rain"],
    );
    let temp = Series::new(
        "temp",
        &[85.0, 80.0, 83.0, 70.0, 68.0, 65.0, 64.0, 72.0, 69.0, 75.0, 75.0, 72.0, 81.0, 71.0],
    );
    let humidity = Series::new(
        "humidity",
        &[85i64, 90, 78, 96, 80, 70, 65, 95, 70, 80, 70, 90, 75, 80],
    );
    let windy = Series::new(
        "windy",
        &["no", "yes", "no", "no", "no", "yes", "yes", "no", "no", "no", "yes", "yes", "no", "yes"],
    );
    let play = Series::new(
        "play",
        &["no", "no", "yes", "yes", "yes", "no", "yes", "no", "yes", "yes", "yes", "yes", "yes", "no"],
    );
    let df = DataFrame::new(vec![outlook, temp, humidity, windy, play]).unwrap();
    Dataset::from_dataframe(&df).unwrap()
}


fn mixed_learner() -> DecisionTreeBuilder {
    DecisionTreeBuilder::new("play")
        .attribute("outlook", Scale::Nominal)
        .attribute("temp", Scale::Ratio)
        .attribute("humidity", Scale::Interval)
        .attribute("windy", Scale::Nominal)
}


#[test]
fn color_predicts_class() {
    let data = colors();
    let tree = DecisionTreeBuilder::new("class")
        .attribute("color", Scale::Nominal)
        .attribute("size", Scale::Ordinal)
        .build()
        .fit(&data)
        .unwrap();

    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.leaves(), 2);

    let color = data.schema().index_of("color").unwrap();
    let class = tree.class();
    for leaf in tree.leaf_nodes() {
        let cluster = leaf.cluster();
        assert_eq!(cluster.len(), 5);
        assert_eq!(Measure::Entropy.impurity(cluster, class), 0.0);
        assert!(cluster.iter().all(|x| x[color] == cluster[0][color]));
        assert!(leaf.label().matches(&cluster[0][class]));
    }
}


#[test]
fn ratio_split_at_midpoint() {
    let data = lengths();
    let spec = AttributeSpec::new("length", Scale::Ratio);
    let proposal = split(&data, &spec, "class", Measure::Entropy, None, false)
        .unwrap()
        .unwrap();

    assert_eq!(proposal.pivot, Pivot::Threshold(Value::from(5.5)));
    assert!((proposal.gain - 1.0).abs() < 1e-12);

    let head = &proposal.partition.iter()
        .find(|(key, _)| *key == BranchKey::Below)
        .unwrap().1;
    let mut head = head.iter().map(|x| x[0].clone()).collect::<Vec<_>>();
    head.sort();
    assert_eq!(head, vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)]);

    let tree = build_tree(&data, "class", &[spec], None, None, None).unwrap();
    let Node::Branch(root) = tree.root() else { panic!("expected a split") };
    assert_eq!(root.pivot(), &Pivot::Threshold(Value::from(5.5)));
    assert_eq!(
        root.child(&BranchKey::Below).and_then(Node::label),
        Some(&Label::Class(Value::from("A")))
    );
    assert_eq!(
        root.child(&BranchKey::AtOrAbove).and_then(Node::label),
        Some(&Label::Class(Value::from("B")))
    );
}


#[test]
fn unseen_value_is_unclassified() {
    let data = colors();
    let tree = DecisionTreeBuilder::new("class")
        .attribute("color", Scale::Nominal)
        .build()
        .fit(&data)
        .unwrap();

    let green = data.instance(vec![
        Value::from("green"), Value::from(4i64), Value::from("hot"),
    ]).unwrap();
    let label = classify(&tree, &green);
    assert_eq!(label, Label::Unclassified);
    assert!(label.class().is_none());
}


#[test]
fn pure_dataset_is_a_single_leaf() {
    let rows = (0..6).map(|i| vec![Value::from(i as i64), Value::from("same")]);
    let data = Dataset::from_rows(["x", "class"], rows).unwrap();

    let mut events: Vec<TraceEvent> = Vec::new();
    let specs = [AttributeSpec::new("x", Scale::Interval)];
    let tree = build_tree(&data, "class", &specs, None, None, Some(&mut events)).unwrap();

    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().label(), Some(&Label::Class(Value::from("same"))));
    assert!(!events.iter().any(|e| matches!(e, TraceEvent::Split { .. })));
}


#[test]
fn leaves_partition_the_dataset() {
    let data = mixed();
    let tree = mixed_learner().build().fit(&data).unwrap();

    let mut expected = HashMap::new();
    for x in data.iter() {
        *expected.entry(x.clone()).or_insert(0usize) += 1;
    }

    let mut reached = HashMap::new();
    for cluster in tree.leaf_clusters() {
        for x in cluster {
            *reached.entry(x.as_ref().clone()).or_insert(0usize) += 1;
        }
    }

    assert_eq!(expected, reached);
}


#[test]
fn training_instances_reach_their_leaf() {
    let data = mixed();
    let tree = mixed_learner().build().fit(&data).unwrap();

    for leaf in tree.leaf_nodes() {
        for x in leaf.cluster() {
            let first = tree.classify(x);
            assert_eq!(&first, leaf.label());
            assert_eq!(first, tree.classify(x));
        }
    }
}


#[test]
fn parallel_search_grows_the_same_tree() {
    let data = mixed();
    for measure in [Measure::Entropy, Measure::Gini, Measure::ClassificationError] {
        for gain_ratio in [false, true] {
            let grow = |parallel: bool| {
                mixed_learner()
                    .measure(measure)
                    .gain_ratio(gain_ratio)
                    .parallel(parallel)
                    .build()
                    .fit(&data)
                    .unwrap()
            };
            assert_eq!(grow(false), grow(true));
        }
    }
}


#[test]
fn trace_reports_each_split() {
    let data = mixed();
    let mut events: Vec<TraceEvent> = Vec::new();
    let tree = mixed_learner().build().fit_traced(&data, &mut events).unwrap();

    let splits = events.iter()
        .filter(|e| matches!(e, TraceEvent::Split { .. }))
        .count();
    let leaves = events.iter()
        .filter(|e| matches!(e, TraceEvent::Leaf { .. }))
        .count();
    assert_eq!(splits, tree.node_count() - tree.leaves());
    assert_eq!(leaves, tree.leaves());

    match &events[0] {
        TraceEvent::Split { depth, attribute, gain, .. } => {
            assert_eq!(*depth, 0);
            assert!(!attribute.is_empty());
            assert!(*gain > 0.0);
        },
        event => panic!("expected the root split first, got {event:?}"),
    }

    let mut console = ConsoleTrace::new().leaves(true);
    let traced = mixed_learner().build().fit_traced(&data, &mut console).unwrap();
    assert_eq!(traced, tree);
}


// Grades ranked A above B above C above D,
// the reverse of the lexicographic order.
fn grades() -> (Dataset, Comparator) {
    let grades = ["A", "B", "C", "D", "A", "B", "C", "D"];
    let class = ["good", "good", "bad", "bad", "good", "good", "bad", "bad"];
    let rows = grades.iter()
        .zip(class)
        .map(|(g, c)| vec![Value::from(*g), Value::from(c)]);
    let data = Dataset::from_rows(["grade", "class"], rows).unwrap();

    let rank = |v: &Value| match v.as_str() {
        Some("A") => 3,
        Some("B") => 2,
        Some("C") => 1,
        _ => 0,
    };
    let by_rank = Comparator::new(move |a, b| rank(a).cmp(&rank(b)));
    (data, by_rank)
}


#[test]
fn comparator_is_used_at_classification() {
    let (data, by_rank) = grades();

    let tree = DecisionTreeBuilder::new("class")
        .attribute_ordered_by("grade", Scale::Ordinal, by_rank)
        .build()
        .fit(&data)
        .unwrap();

    let Node::Branch(root) = tree.root() else { panic!("expected a split") };
    assert_eq!(root.pivot(), &Pivot::Threshold(Value::from("B")));
    for x in data.iter() {
        assert!(tree.classify(x).matches(&x[1]));
    }
    assert!(tree.missing_orders().is_empty());
}


#[test]
fn tree_survives_json() {
    let data = mixed();
    let tree = mixed_learner().build().fit(&data).unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    let back: DecisionTreeClassifier = serde_json::from_str(&json).unwrap();

    assert_eq!(back, tree);
    assert_eq!(back.classify_all(&data), tree.classify_all(&data));
}


#[test]
fn json_tree_needs_its_comparator_back() {
    let (data, by_rank) = grades();
    let tree = DecisionTreeBuilder::new("class")
        .attribute_ordered_by("grade", Scale::Ordinal, by_rank.clone())
        .build()
        .fit(&data)
        .unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    let mut back: DecisionTreeClassifier = serde_json::from_str(&json).unwrap();

    // The lexicographic order would send A below the pivot B,
    // so the tree refuses to route instead of guessing.
    assert_eq!(back.missing_orders(), vec!["grade"]);
    assert!(back.classify_all(&data).iter().all(|y| *y == Label::Unclassified));

    assert!(matches!(
        back.restore_order("level", by_rank.clone()),
        Err(TreeError::UnknownAttribute { .. })
    ));
    assert_eq!(back.restore_order("class", by_rank.clone()).unwrap(), 0);
    assert_eq!(back.restore_order("grade", by_rank).unwrap(), 1);

    assert!(back.missing_orders().is_empty());
    assert_eq!(back, tree);
    assert_eq!(back.classify_all(&data), tree.classify_all(&data));
}


#[test]
fn unknown_strategy_tag_is_an_error() {
    assert!(matches!(
        AttributeSpec::parse("color", "cardinal"),
        Err(TreeError::UnknownScale { .. })
    ));
    let spec = AttributeSpec::parse("color", "Nominal").unwrap();
    assert_eq!(spec.scale(), Scale::Nominal);
}
