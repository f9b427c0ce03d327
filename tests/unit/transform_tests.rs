//! End-to-end `transform` tests

use pretty_assertions::assert_eq;
use rust_sqlalias::{transform, Rewriter, SqlAliasError};

use crate::common::{crm_field_map, user_field_map};

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_transform_single_table_with_where_and_limit() {
    let sql = "SELECT id, full_name FROM user WHERE first_name = 'John' AND last_name = 'Smith' LIMIT 100";
    let result = transform(sql, &user_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}, {user:FullName__c}  FROM {user}  WHERE {user:FirstName__c} = 'John' AND {user:LastName__c} = 'Smith'  LIMIT 100"
    );
}

#[test]
fn test_transform_comma_join_resolves_both_sides() {
    let sql = "SELECT user.full_name, account.name FROM user, account WHERE user.account_id = account.id";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:FullName__c}, {account:Name}  FROM {user}, {account}  WHERE {user:AccountId__c} = {account:Id} "
    );
}

#[test]
fn test_transform_bare_left_qualified_right() {
    let sql = "SELECT id FROM user, account WHERE account_id = account.id";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}  FROM {user}, {account}  WHERE {user:AccountId__c} = {account:Id} "
    );
}

#[test]
fn test_transform_group_and_order_without_direction() {
    let sql = "SELECT status FROM user GROUP BY status ORDER BY status";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Status__c}  FROM {user}  GROUP BY {user:Status__c}  ORDER BY {user:Status__c} "
    );
}

#[test]
fn test_transform_order_by_desc() {
    let sql = "SELECT name FROM account ORDER BY name DESC";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {account:Name}  FROM {account}  ORDER BY {account:Name} DESC "
    );
}

#[test]
fn test_transform_order_by_preserves_comma_order() {
    let sql = "SELECT id FROM user ORDER BY last_name, first_name asc";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}  FROM {user}  ORDER BY {user:LastName__c}, {user:FirstName__c} ASC "
    );
}

// ============================================================================
// Keyword handling
// ============================================================================

#[test]
fn test_transform_lowercase_keywords() {
    let sql = "select id from user where status = 'open' limit 5";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}  FROM {user}  WHERE {user:Status__c} = 'open'  limit 5"
    );
}

#[test]
fn test_transform_multiline_query() {
    let sql = "SELECT\n  id,\n  full_name\nFROM user\nWHERE id = 7";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}, {user:FullName__c}  FROM {user}  WHERE {user:Id} = 7 "
    );
}

#[test]
fn test_transform_keywords_inside_literal_do_not_split() {
    let sql = "SELECT id FROM user WHERE status = 'order by limit'";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}  FROM {user}  WHERE {user:Status__c} = 'order by limit' "
    );
}

#[test]
fn test_transform_clause_order_mirrors_input() {
    let sql = "SELECT id FROM user LIMIT 10 WHERE active";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}  FROM {user}  LIMIT 10 WHERE {user:IsActive__c} "
    );
}

#[test]
fn test_transform_wildcard_select() {
    let sql = "SELECT * FROM user WHERE active";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(result, "SELECT *  FROM {user}  WHERE {user:IsActive__c} ");
}

// ============================================================================
// Literal text
// ============================================================================

#[test]
fn test_transform_keeps_doubled_quote_escape() {
    let sql = "SELECT id FROM user WHERE last_name = 'O''Brien'";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        "SELECT {user:Id}  FROM {user}  WHERE {user:LastName__c} = 'O''Brien' "
    );
}

#[test]
fn test_transform_keeps_backslashes_in_literal() {
    let sql = r"SELECT id FROM user WHERE status = 'C:\temp\new'";
    let result = transform(sql, &crm_field_map()).unwrap();
    assert_eq!(
        result,
        r"SELECT {user:Id}  FROM {user}  WHERE {user:Status__c} = 'C:\temp\new' "
    );
}

#[test]
fn test_transform_not_equals_is_not_normalized() {
    // The operator reaches the WHERE rewriter as written, so the split at the
    // first '=' leaves "id!" on the left
    let err = transform("SELECT id FROM user WHERE id != 5", &crm_field_map()).unwrap_err();
    assert!(matches!(err, SqlAliasError::UnknownField { field, .. } if field == "id!"));
}

#[test]
fn test_transform_order_by_field_containing_desc() {
    let map = rust_sqlalias::FieldMap::from_iter([("note", vec![("description", "Body__c")])]);
    let result = transform("SELECT description FROM note ORDER BY description", &map).unwrap();
    assert_eq!(
        result,
        "SELECT {note:Body__c}  FROM {note}  ORDER BY {note:Body__c} DESC "
    );
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_select_fields_resolve_in_input_order() {
    let map = crm_field_map();
    let fields = ["last_name", "id", "status", "full_name"];
    let vendor = ["LastName__c", "Id", "Status__c", "FullName__c"];

    for start in 0..fields.len() {
        let mut order: Vec<usize> = (0..fields.len()).collect();
        order.rotate_left(start);

        let select: Vec<&str> = order.iter().map(|&i| fields[i]).collect();
        let expected: Vec<String> = order
            .iter()
            .map(|&i| format!("{{user:{}}}", vendor[i]))
            .collect();

        let sql = format!("SELECT {} FROM user", select.join(", "));
        let result = transform(&sql, &map).unwrap();
        assert_eq!(
            result,
            format!("SELECT {}  FROM {{user}} ", expected.join(", "))
        );
    }
}

#[test]
fn test_from_preserves_table_order() {
    let map = crm_field_map();
    let forward = transform("SELECT id FROM user, account", &map).unwrap();
    let reverse = transform("SELECT id FROM account, user", &map).unwrap();
    assert_eq!(forward, "SELECT {user:Id}  FROM {user}, {account} ");
    assert_eq!(reverse, "SELECT {account:Id}  FROM {account}, {user} ");
}

#[test]
fn test_transform_is_not_idempotent() {
    let map = user_field_map();
    let once = transform("SELECT id FROM user", &map).unwrap();
    // Bracket tokens are not valid input syntax
    assert!(transform(&once, &map).is_err());
}

#[test]
fn test_rewriter_is_shareable_across_threads() {
    let map = crm_field_map();
    let rewriter = Rewriter::new(&map);

    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["SELECT id FROM user", "SELECT name FROM account"]
            .into_iter()
            .map(|sql| scope.spawn(move || rewriter.transform(sql).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            "SELECT {user:Id}  FROM {user} ".to_string(),
            "SELECT {account:Name}  FROM {account} ".to_string(),
        ]
    );
}
