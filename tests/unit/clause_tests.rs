//! Clause segmentation and per-clause rewriter tests through the public API

use pretty_assertions::assert_eq;
use rust_sqlalias::rewriter::{
    classify_right_hand, rewrite_from, rewrite_group_by, rewrite_order_by, rewrite_select,
    rewrite_where, segment, split_list, table_list, ClauseKind, RightHandSide,
};

use crate::common::crm_field_map;

// ============================================================================
// Segmenter
// ============================================================================

#[test]
fn test_segment_labels_every_clause() {
    let sql = "SELECT id FROM user WHERE active GROUP BY status ORDER BY status LIMIT 3";
    let clauses = segment(sql).unwrap();
    let labeled: Vec<(ClauseKind, &str)> = clauses
        .iter()
        .map(|c| (c.kind, c.text.as_str()))
        .collect();

    assert_eq!(
        labeled,
        vec![
            (ClauseKind::Select, "SELECT id "),
            (ClauseKind::From, "FROM user "),
            (ClauseKind::Where, "WHERE active "),
            (ClauseKind::GroupBy, "GROUP BY status "),
            (ClauseKind::OrderBy, "ORDER BY status "),
            (ClauseKind::Limit, "LIMIT 3"),
        ]
    );
}

#[test]
fn test_segment_concatenation_covers_query() {
    let sql = "SELECT id FROM user WHERE status = 'a' ORDER BY id";
    let joined: String = segment(sql).unwrap().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(joined, sql);
}

#[test]
fn test_qualifier_kinds() {
    assert!(ClauseKind::Where.is_qualifier());
    assert!(ClauseKind::Limit.is_qualifier());
    assert!(!ClauseKind::From.is_qualifier());
    assert!(!ClauseKind::Unrecognized.is_qualifier());
}

// ============================================================================
// Select / From
// ============================================================================

#[test]
fn test_select_and_from_are_independent() {
    let map = crm_field_map();
    let sql = "SELECT name, owner_id FROM account, user WHERE industry = 'Retail'";
    assert_eq!(
        rewrite_select(sql, &map).unwrap(),
        "SELECT {account:Name}, {account:OwnerId} "
    );
    assert_eq!(rewrite_from(sql).unwrap(), " FROM {account}, {user} ");
}

#[test]
fn test_table_list_default_table() {
    let tables = table_list("SELECT id FROM account, user ORDER BY id").unwrap();
    assert_eq!(tables.default_table(), "account");
    assert_eq!(tables.len(), 2);
}

#[test]
fn test_split_list_strips_all_whitespace() {
    assert_eq!(split_list(" a ,  b\n,c "), vec!["a", "b", "c"]);
}

// ============================================================================
// Where / Group / Order
// ============================================================================

#[test]
fn test_where_right_hand_classification() {
    let map = crm_field_map();
    let tables = table_list("SELECT id FROM user, account").unwrap();

    assert_eq!(
        classify_right_hand("'Retail'", &tables, &map),
        RightHandSide::QuotedLiteral
    );
    assert_eq!(
        classify_right_hand("account.owner_id", &tables, &map),
        RightHandSide::TableReference
    );
    assert_eq!(
        classify_right_hand("first_name", &tables, &map),
        RightHandSide::FieldReference
    );
    assert_eq!(classify_right_hand("100", &tables, &map), RightHandSide::Literal);
}

#[test]
fn test_where_literal_containing_table_name_is_misclassified() {
    let map = crm_field_map();
    let tables = table_list("SELECT id FROM user").unwrap();
    // Known heuristic limitation: "username" contains "user"
    assert_eq!(
        classify_right_hand("username", &tables, &map),
        RightHandSide::TableReference
    );
    assert!(rewrite_where("WHERE status = username", &tables, &map).is_err());
}

#[test]
fn test_where_preserves_and_order() {
    let map = crm_field_map();
    let tables = table_list("SELECT id FROM user").unwrap();
    let result = rewrite_where(
        "WHERE last_name = 'B' AND first_name = 'A' AND id = 9",
        &tables,
        &map,
    )
    .unwrap();
    assert_eq!(
        result,
        " WHERE {user:LastName__c} = 'B' AND {user:FirstName__c} = 'A' AND {user:Id} = 9 "
    );
}

#[test]
fn test_group_by_multiple_tables() {
    let map = crm_field_map();
    let tables = table_list("SELECT id FROM user, account").unwrap();
    let result = rewrite_group_by("GROUP BY status, account.industry", &tables, &map).unwrap();
    assert_eq!(result, " GROUP BY {user:Status__c}, {account:Industry__c} ");
}

#[test]
fn test_order_by_suffix_only_when_present() {
    let map = crm_field_map();
    let tables = table_list("SELECT id FROM user").unwrap();
    assert_eq!(
        rewrite_order_by("ORDER BY id", &tables, &map).unwrap(),
        " ORDER BY {user:Id} "
    );
    assert_eq!(
        rewrite_order_by("ORDER BY id Desc", &tables, &map).unwrap(),
        " ORDER BY {user:Id} DESC "
    );
}
