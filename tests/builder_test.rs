//! Tests for TreeBuilder

use rstest::rstest;

use tkp::domain::{DomainError, NodeKind, Position, SelectionState, Table, TreeBuilder};
use tkp::util::testing;

fn table(rows: Vec<Vec<u64>>) -> Table {
    Table::from_rows(rows)
}

#[test]
fn given_two_rows_when_building_then_creates_group_per_row_with_items() {
    // Arrange
    testing::init_test_setup();
    let costs = table(vec![vec![3, 4, 2], vec![5, 1]]);
    let profits = table(vec![vec![9, 8, 0], vec![6, 0]]);

    // Act
    let tree = TreeBuilder::new().build(&costs, &profits).unwrap();

    // Assert
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.groups().len(), 2);
    assert_eq!(tree.count_kind(NodeKind::Item), 3);

    let first = tree.get_node(tree.groups()[0]).unwrap();
    assert_eq!(first.data.kind, NodeKind::Group);
    assert_eq!(first.parent, Some(tree.root()));
    assert_eq!(first.children.len(), 2);
    assert_eq!(first.data.position, Some(Position { row: 0, column: 2 }));

    let second = tree.get_node(tree.groups()[1]).unwrap();
    assert_eq!(second.data.position, Some(Position { row: 1, column: 1 }));
}

#[test]
fn given_items_when_building_then_cumulative_cost_includes_group_cost() {
    let costs = table(vec![vec![3, 4, 2]]);
    let profits = table(vec![vec![9, 8, 0]]);

    let tree = TreeBuilder::new().build(&costs, &profits).unwrap();

    let group = tree.get_node(tree.groups()[0]).unwrap();
    let items: Vec<_> = group
        .children
        .iter()
        .map(|&idx| tree.get_node(idx).unwrap().data.clone())
        .collect();

    assert_eq!(group.data.cost, 2);
    assert_eq!(items[0].declared_cost, 3);
    assert_eq!(items[0].cost, 5);
    assert!((items[0].ratio - 1.8).abs() < 1e-9);
    assert_eq!(items[1].cost, 6);
    assert_eq!(items[1].position, Some(Position { row: 0, column: 1 }));
    assert!(items.iter().all(|item| item.state == SelectionState::Unset));
}

#[test]
fn given_tables_when_building_then_ids_follow_creation_order() {
    let costs = table(vec![vec![1, 1], vec![1, 1, 1]]);
    let profits = table(vec![vec![1, 1], vec![1, 1, 1]]);

    let tree = TreeBuilder::new().build(&costs, &profits).unwrap();

    let ids: Vec<_> = tree.iter().map(|(_, node)| node.data.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    let kinds: Vec<_> = tree.iter().map(|(_, node)| node.data.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Root,
            NodeKind::Group,
            NodeKind::Item,
            NodeKind::Group,
            NodeKind::Item,
            NodeKind::Item,
        ]
    );
}

#[test]
fn given_free_group_and_free_item_when_building_then_ratio_is_zero() {
    let tree = TreeBuilder::new()
        .build(&table(vec![vec![0, 0]]), &table(vec![vec![5, 0]]))
        .unwrap();

    for (_, node) in tree.descendants() {
        assert_eq!(node.data.ratio, 0.0);
    }
}

#[test]
fn given_empty_tables_when_building_then_tree_has_root_only() {
    let tree = TreeBuilder::new()
        .build(&Table::default(), &Table::default())
        .unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.iter().count(), 1);
}

#[test]
fn given_same_builder_when_building_twice_then_ids_restart() {
    let mut builder = TreeBuilder::new();
    let costs = table(vec![vec![1, 1]]);
    let profits = table(vec![vec![1, 1]]);

    builder.build(&costs, &profits).unwrap();
    let tree = builder.build(&costs, &profits).unwrap();

    let max_id = tree.iter().map(|(_, node)| node.data.id).max();
    assert_eq!(max_id, Some(2));
}

// ============================================================
// Malformed input
// ============================================================

#[rstest]
#[case::row_length(
    vec![vec![1, 2, 3]],
    vec![vec![1, 2]],
    DomainError::MalformedInput { row: 0, cost_len: 3, profit_len: 2 }
)]
#[case::second_row_length(
    vec![vec![1, 2], vec![4]],
    vec![vec![1, 2], vec![4, 5]],
    DomainError::MalformedInput { row: 1, cost_len: 1, profit_len: 2 }
)]
#[case::row_count(
    vec![vec![1, 2], vec![1]],
    vec![vec![1, 2]],
    DomainError::RowCountMismatch { cost_rows: 2, profit_rows: 1 }
)]
#[case::empty_row(
    vec![vec![1], vec![]],
    vec![vec![1], vec![]],
    DomainError::EmptyRow { row: 1 }
)]
fn given_mismatched_tables_when_building_then_fails_as_malformed(
    #[case] costs: Vec<Vec<u64>>,
    #[case] profits: Vec<Vec<u64>>,
    #[case] expected: DomainError,
) {
    let result = TreeBuilder::new().build(&table(costs), &table(profits));

    let err = result.unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err, expected);
}

#[test]
fn given_unparsable_cell_when_parsing_then_fails_with_parse_error() {
    let result = Table::parse("9;8;0\n6;six\n", ';');

    assert!(matches!(
        result,
        Err(DomainError::Parse { row: 1, column: 1, ref value }) if value == "six"
    ));
}
