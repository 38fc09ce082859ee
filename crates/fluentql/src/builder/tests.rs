use super::*;
use crate::client::ExecOutcome;
use crate::monitor::{HookAction, QueryContext, StatsHook};
use crate::testing::{MockExecutor, rows};
use crate::value::Value;

// ==================== SELECT ====================

#[test]
fn select_all() {
    let qb = QueryBuilder::read("users");
    assert_eq!(qb.to_sql(), "SELECT * FROM users");
}

#[test]
fn select_with_or() {
    let mut qb = QueryBuilder::read("users");
    qb.where_eq("name", "hello").or().where_eq("type", "3");
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM users WHERE 1 AND name = 'hello' OR type = '3'"
    );
}

#[test]
fn connective_applies_to_next_predicate_only() {
    let mut qb = QueryBuilder::read("users");
    qb.where_eq("a", 1)
        .or()
        .where_eq("b", 2)
        .where_eq("c", 3)
        .and_not()
        .where_null("d");
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM users WHERE 1 AND a = 1 OR b = 2 AND c = 3 AND NOT d IS NULL"
    );
}

#[test]
fn compile_is_repeatable() {
    let mut qb = QueryBuilder::read("users");
    qb.columns(&["id", "name"]).where_gt("age", 18).limit(10);
    assert_eq!(qb.to_sql(), qb.to_sql());
}

#[test]
fn columns_order_and_paging() {
    let mut qb = QueryBuilder::read("users");
    qb.columns(&["id", "name"])
        .where_gte("age", 18)
        .where_lt("age", 65)
        .order_by_desc("created_at")
        .order_by_asc("id")
        .limit(20)
        .offset(40);
    assert_eq!(
        qb.to_sql(),
        "SELECT id, name FROM users WHERE 1 AND age >= 18 AND age < 65 \
         ORDER BY created_at DESC, id ASC LIMIT 20 OFFSET 40"
    );
}

#[test]
fn zero_limit_and_offset_are_omitted() {
    let mut qb = QueryBuilder::read("users");
    qb.limit(0).offset(0);
    assert_eq!(qb.to_sql(), "SELECT * FROM users");

    qb.offset(10);
    assert_eq!(qb.to_sql(), "SELECT * FROM users OFFSET 10");
}

#[test]
fn page_is_zero_based() {
    let mut qb = QueryBuilder::read("users");
    qb.page(0, 25);
    assert_eq!(qb.to_sql(), "SELECT * FROM users LIMIT 25");
    qb.page(2, 25);
    assert_eq!(qb.to_sql(), "SELECT * FROM users LIMIT 25 OFFSET 50");
}

#[test]
fn count_replaces_projection() {
    let mut qb = QueryBuilder::read("users");
    qb.columns(&["id"]).count().where_eq("active", true);
    assert_eq!(
        qb.to_sql(),
        "SELECT COUNT(*) count FROM users WHERE 1 AND active = true"
    );
}

#[test]
fn find_by_id() {
    let mut qb = QueryBuilder::read("users");
    qb.find(7);
    assert_eq!(qb.to_sql(), "SELECT * FROM users WHERE 1 AND id = 7");
}

#[test]
fn comparison_operators() {
    let mut qb = QueryBuilder::read("t");
    qb.where_not("a", 1)
        .where_lte("b", 2.5)
        .where_like("c", "ab%")
        .where_not_null("d")
        .where_between("e", 1, 10);
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM t WHERE 1 AND a != 1 AND b <= 2.5 AND c LIKE 'ab%' \
         AND d IS NOT NULL AND e BETWEEN 1 AND 10"
    );
}

#[test]
fn text_values_are_escaped() {
    let mut qb = QueryBuilder::read("users");
    qb.where_eq("name", "O'Brien");
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM users WHERE 1 AND name = 'O\\'Brien'"
    );
}

#[test]
fn where_in_variants() {
    let mut qb = QueryBuilder::read("t");
    qb.where_in("id", vec![1, 2, 3]);
    assert_eq!(qb.to_sql(), "SELECT * FROM t WHERE 1 AND id IN (1,2,3)");

    let mut qb = QueryBuilder::read("t");
    qb.where_in("id", Vec::<i32>::new());
    assert_eq!(qb.to_sql(), "SELECT * FROM t WHERE 1 AND 1=0");

    let mut qb = QueryBuilder::read("t");
    qb.where_in("name", "x");
    assert_eq!(qb.to_sql(), "SELECT * FROM t WHERE 1 AND name IN ('x')");
}

#[test]
fn where_in_subquery() {
    let mut qb = QueryBuilder::read("users");
    qb.where_in_query("id", |sub| {
        sub.table("orders").columns(&["user_id"]).where_gt("total", 100);
    });
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM users WHERE 1 AND id IN (SELECT user_id FROM orders WHERE 1 AND total > 100)"
    );
}

#[test]
fn bitwise_and_raw_predicates() {
    let mut qb = QueryBuilder::read("t");
    qb.bitwise_and("flags", 4, 4)
        .or()
        .bitwise_or("mask", 1, 3)
        .where_raw("created_at > NOW() - INTERVAL 1 DAY");
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM t WHERE 1 AND flags & 4 = 4 OR mask | 1 = 3 \
         AND created_at > NOW() - INTERVAL 1 DAY"
    );
}

#[test]
fn where_group_takes_outer_connective() {
    let mut qb = QueryBuilder::read("t");
    qb.where_eq("a", 1).or().where_group(|g| {
        g.or().where_eq("b", 2).where_eq("c", 3);
    });
    assert_eq!(
        qb.to_sql(),
        "SELECT * FROM t WHERE 1 AND a = 1 OR (b = 2 AND c = 3)"
    );
}

#[test]
fn empty_group_adds_nothing() {
    let mut qb = QueryBuilder::read("t");
    qb.where_eq("a", 1).where_group(|_| {});
    assert_eq!(qb.to_sql(), "SELECT * FROM t WHERE 1 AND a = 1");
}

#[test]
fn empty_group_consumes_pending_connective() {
    let mut qb = QueryBuilder::read("t");
    qb.where_eq("a", 1).or().where_group(|_| {}).where_eq("b", 2);
    assert_eq!(qb.to_sql(), "SELECT * FROM t WHERE 1 AND a = 1 AND b = 2");

    let mut qb = QueryBuilder::read("t");
    qb.and_not().where_group(|_| {}).where_eq("b", 2);
    assert_eq!(qb.to_sql(), "SELECT * FROM t WHERE 1 AND b = 2");
}

#[test]
fn joins() {
    let mut qb = QueryBuilder::read("users u");
    qb.columns(&["u.id", "p.title"])
        .join_with("posts p", "p.user_id = u.id", |j| {
            j.where_eq("p.published", true);
        })
        .left_join("roles r", "r.id = u.role_id")
        .right_join("teams t", "t.id = u.team_id")
        .join_using("profiles", "user_id");
    assert_eq!(
        qb.to_sql(),
        "SELECT u.id, p.title FROM users u \
         JOIN posts p ON p.user_id = u.id AND p.published = true \
         LEFT JOIN roles r ON r.id = u.role_id \
         RIGHT JOIN teams t ON t.id = u.team_id \
         JOIN profiles USING(user_id)"
    );
}

#[test]
fn join_with_empty_closure_is_plain_join() {
    let mut qb = QueryBuilder::read("a");
    qb.left_join_with("b", "b.a_id = a.id", |_| {});
    assert_eq!(qb.to_sql(), "SELECT * FROM a LEFT JOIN b ON b.a_id = a.id");
}

#[test]
fn group_by_having() {
    let mut qb = QueryBuilder::read("files");
    qb.columns(&["type", "COUNT(*) n"])
        .group_by("type")
        .having(|h| {
            h.where_gt("COUNT(*)", 1);
        });
    assert_eq!(
        qb.to_sql(),
        "SELECT type, COUNT(*) n FROM files GROUP BY type HAVING COUNT(*) > 1"
    );
}

#[test]
fn having_needs_group_by() {
    let mut qb = QueryBuilder::read("files");
    qb.having(|h| {
        h.where_gt("COUNT(*)", 1);
    });
    assert_eq!(qb.to_sql(), "SELECT * FROM files");
}

#[test]
fn multiple_tables() {
    let mut qb = QueryBuilder::read("a");
    qb.table("b").where_raw("a.id = b.a_id");
    assert_eq!(qb.to_sql(), "SELECT * FROM a, b WHERE 1 AND a.id = b.a_id");
}

// ==================== INSERT / UPDATE / DELETE ====================

#[test]
fn insert_uses_first_row_key_order() {
    let mut qb = QueryBuilder::create("files");
    qb.fill(vec![
        RowValues::new().set("hello", 1).set("name", "aryan"),
        RowValues::new().set("name", "arash").set("hello", 55),
    ]);
    assert_eq!(
        qb.to_sql(),
        "INSERT INTO files(hello, name) VALUES(1, 'aryan'), (55, 'arash')"
    );
}

#[test]
fn insert_missing_key_renders_null() {
    let mut qb = QueryBuilder::create("files");
    qb.fill(vec![
        RowValues::new().set("a", 1).set("b", 2),
        RowValues::new().set("a", 3),
    ]);
    assert_eq!(
        qb.to_sql(),
        "INSERT INTO files(a, b) VALUES(1, 2), (3, NULL)"
    );
}

#[test]
fn update_with_where() {
    let mut qb = QueryBuilder::update("files");
    qb.set("hello", 123).set("name", "aryan").where_eq("id", 2);
    assert_eq!(
        qb.to_sql(),
        "UPDATE files SET hello=123, name='aryan' WHERE 1 AND id = 2"
    );
}

#[test]
fn update_drops_leading_connective() {
    let mut qb = QueryBuilder::update("files");
    qb.set("a", 1).or().where_eq("id", 2);
    assert_eq!(qb.to_sql(), "UPDATE files SET a=1 WHERE 1 AND id = 2");
    assert!(!qb.is_unrestricted());

    let mut qb = QueryBuilder::update("files");
    qb.set("a", 1)
        .and_not()
        .where_eq("id", 2)
        .or()
        .where_eq("id", 3);
    assert_eq!(qb.to_sql(), "UPDATE files SET a=1 WHERE 1 AND id = 2 OR id = 3");
}

#[test]
fn set_replaces_existing_column() {
    let mut qb = QueryBuilder::update("files");
    qb.set("name", "a").set("name", "b");
    assert_eq!(qb.to_sql(), "UPDATE files SET name='b'");
    assert!(qb.is_unrestricted());
}

#[test]
fn delete_with_and_without_predicates() {
    let mut qb = QueryBuilder::delete("sessions");
    qb.where_lt("expires_at", 100).or().where_null("user_id");
    assert_eq!(
        qb.to_sql(),
        "DELETE FROM sessions WHERE expires_at < 100 OR user_id IS NULL"
    );
    assert!(!qb.is_unrestricted());

    let qb = QueryBuilder::delete("sessions");
    assert_eq!(qb.to_sql(), "DELETE FROM sessions");
    assert!(qb.is_unrestricted());
}

#[test]
fn custom_sql_is_verbatim() {
    let qb = QueryBuilder::custom("SHOW TABLES");
    assert_eq!(qb.kind(), QueryKind::Custom);
    assert_eq!(qb.to_sql(), "SHOW TABLES");
}

#[test]
fn validate_reports_missing_parts() {
    assert!(QueryBuilder::new(QueryKind::Read).validate().unwrap_err().is_config());
    assert!(QueryBuilder::create("t").validate().unwrap_err().is_config());
    assert!(QueryBuilder::update("t").validate().unwrap_err().is_config());
    assert!(QueryBuilder::custom("  ").validate().unwrap_err().is_config());
    assert!(QueryBuilder::read("t").validate().is_ok());
    assert!(QueryBuilder::delete("t").validate().is_ok());

    let mut qb = QueryBuilder::create("t");
    qb.fill(vec![RowValues::new()]);
    assert!(qb.validate().is_err());
}

// ==================== Execution ====================

#[tokio::test]
async fn missing_handle_is_config_error() {
    let mut qb = QueryBuilder::read("users");
    let err = qb.scan_rows().await.unwrap_err();
    assert!(err.is_config());
    assert_eq!(qb.error(), Some(&err));
}

#[tokio::test]
async fn run_records_outcome() {
    let db = MockExecutor::new().with_outcome(ExecOutcome::inserted(42, 1));
    let mut qb = QueryBuilder::create("files");
    qb.use_db(&db).set("name", "a");

    let outcome = qb.run().await.unwrap();
    assert_eq!(outcome.rows_affected, 1);
    assert_eq!(qb.last_insert_id(), Some(42));
    assert_eq!(qb.rows_affected(), 1);
    assert_eq!(db.statements(), vec!["INSERT INTO files(name) VALUES('a')"]);
}

#[tokio::test]
async fn executor_errors_are_stored() {
    let db = MockExecutor::new().failing("connection reset");
    let mut qb = QueryBuilder::delete("files");
    qb.use_tx(&db).find(1);

    let err = qb.run().await.unwrap_err();
    assert!(matches!(err, OrmError::Execution(_)));
    assert_eq!(qb.error(), Some(&err));
    assert_eq!(qb.handle().kind(), "tx");
}

#[tokio::test]
async fn first_error_wins() {
    let db = MockExecutor::new();
    let mut qb = QueryBuilder::create("files");
    qb.use_db(&db).bind(&Vec::<Pair>::new()).set("name", "late");

    let err = qb.run().await.unwrap_err();
    assert!(err.is_bind());
    // Later terminals return the stored error without touching the executor.
    assert_eq!(qb.run().await.unwrap_err(), err);
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn first_on_empty_result_is_not_found() {
    let db = MockExecutor::new();
    let mut qb = QueryBuilder::read("files");
    qb.use_db(&db).where_eq("name", "nobody");

    let err = qb.first::<Pair>().await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(qb.scanned(), 0);
    assert_eq!(
        db.statements(),
        vec!["SELECT * FROM files WHERE 1 AND name = 'nobody' LIMIT 1"]
    );
}

#[tokio::test]
async fn scan_decodes_rows() {
    let db = MockExecutor::new().with_page(rows(
        &["a", "b"],
        vec![
            vec![Value::Int(1), Value::Text("x".into())],
            vec![Value::Int(2), Value::Null],
        ],
    ));
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);

    let items = qb.scan::<Pair>().await.unwrap();
    assert_eq!(
        items,
        vec![
            Pair { a: 1, b: Some("x".into()) },
            Pair { a: 2, b: None },
        ]
    );
    assert_eq!(qb.scanned(), 2);
}

#[tokio::test]
async fn scan_decode_failure_is_stored() {
    let db = MockExecutor::new().with_page(rows(&["a"], vec![vec![Value::Text("nope".into())]]));
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);

    let err = qb.scan::<Pair>().await.unwrap_err();
    assert!(matches!(err, OrmError::Decode { ref column, .. } if column == "a"));
    assert_eq!(qb.scanned(), 0);
}

struct Rewrite;

impl QueryHook for Rewrite {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        HookAction::ModifySql(format!("/* app */ {}", ctx.sql))
    }
}

struct Deny;

impl QueryHook for Deny {
    fn before_query(&self, ctx: &QueryContext) -> HookAction {
        if ctx.sql.starts_with("DELETE") {
            HookAction::Abort("deletes are disabled".into())
        } else {
            HookAction::Continue
        }
    }
}

#[tokio::test]
async fn hook_rewrites_reach_executor() {
    let db = MockExecutor::new();
    let mut qb = QueryBuilder::read("users");
    qb.use_db(&db).hook(Rewrite);
    qb.scan_rows().await.unwrap();
    assert_eq!(db.statements(), vec!["/* app */ SELECT * FROM users"]);
}

#[tokio::test]
async fn hook_abort_skips_executor() {
    let db = MockExecutor::new();
    let mut qb = QueryBuilder::delete("users");
    qb.use_db(&db).hook(Deny).find(1);

    let err = qb.run().await.unwrap_err();
    assert_eq!(err, OrmError::Aborted("deletes are disabled".into()));
    assert!(db.statements().is_empty());
}

#[tokio::test]
async fn config_hooks_see_every_statement() {
    let db = MockExecutor::new();
    let stats = Arc::new(StatsHook::new());
    let config = ExecConfig::new().with_hook_arc(stats.clone()).with_tag("report");

    let mut qb = QueryBuilder::read("users");
    qb.use_db(&db).config(config);
    qb.scan_rows().await.unwrap();
    qb.scan_rows().await.unwrap();

    let snapshot = stats.stats();
    assert_eq!(snapshot.total_queries, 2);
    assert_eq!(snapshot.select_count, 2);
}

#[tokio::test]
async fn chunk_walks_pages_until_empty() {
    let page = |from: i64| {
        rows(
            &["a", "b"],
            vec![
                vec![Value::Int(from), Value::Null],
                vec![Value::Int(from + 1), Value::Null],
            ],
        )
    };
    let db = MockExecutor::new()
        .with_page(page(1))
        .with_page(page(3))
        .with_page(Vec::new());

    let mut seen = Vec::new();
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);
    let total = qb
        .chunk::<Pair, _>(2, |items| {
            assert!(!items.is_empty());
            seen.extend(items.into_iter().map(|p| p.a));
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(total, 4);
    assert_eq!(seen, vec![1, 2, 3, 4]);
    assert_eq!(
        db.statements(),
        vec![
            "SELECT * FROM pairs LIMIT 2",
            "SELECT * FROM pairs LIMIT 2 OFFSET 2",
            "SELECT * FROM pairs LIMIT 2 OFFSET 4",
        ]
    );
}

#[tokio::test]
async fn chunk_stops_on_callback_error() {
    let db = MockExecutor::new()
        .with_page(rows(&["a"], vec![vec![Value::Int(1)]]))
        .with_page(rows(&["a"], vec![vec![Value::Int(2)]]));
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);

    let err = qb
        .chunk::<Pair, _>(1, |_| Err(OrmError::execution("stop")))
        .await
        .unwrap_err();
    assert_eq!(err, OrmError::execution("stop"));
    assert_eq!(db.statements().len(), 1);
}

#[tokio::test]
async fn chunk_stops_when_executor_fails() {
    let db = MockExecutor::new().failing("connection reset");
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);

    let mut calls = 0;
    let err = qb
        .chunk::<Pair, _>(2, |_| {
            calls += 1;
            Ok(())
        })
        .await
        .unwrap_err();
    assert_eq!(calls, 0);
    assert_eq!(err, OrmError::execution("connection reset"));
    assert_eq!(qb.error(), Some(&err));
    assert_eq!(db.statements(), vec!["SELECT * FROM pairs LIMIT 2"]);
}

#[tokio::test]
async fn chunk_stops_when_executor_fails_mid_walk() {
    let db = MockExecutor::new()
        .with_page(rows(&["a"], vec![vec![Value::Int(1)], vec![Value::Int(2)]]))
        .failing_after(1, "connection reset");
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);

    let mut seen = Vec::new();
    let err = qb
        .chunk::<Pair, _>(2, |items| {
            seen.extend(items.into_iter().map(|p| p.a));
            Ok(())
        })
        .await
        .unwrap_err();
    assert_eq!(seen, vec![1, 2]);
    assert_eq!(err, OrmError::execution("connection reset"));
    assert_eq!(qb.error(), Some(&err));
    assert_eq!(db.statements().len(), 2);
}

#[tokio::test]
async fn chunk_rejects_zero_size() {
    let db = MockExecutor::new();
    let mut qb = QueryBuilder::read("pairs");
    qb.use_db(&db);
    let err = qb.chunk::<Pair, _>(0, |_| Ok(())).await.unwrap_err();
    assert!(err.is_config());
    assert!(db.statements().is_empty());
}

// ==================== Records ====================

#[derive(Debug, Default, Clone, PartialEq)]
struct Pair {
    a: i64,
    b: Option<String>,
}

impl crate::Record for Pair {
    const FIELDS: &'static [crate::FieldDef] = &[
        crate::FieldDef {
            field: "a",
            column: "a",
            identity: false,
            skip: false,
        },
        crate::FieldDef {
            field: "b",
            column: "b",
            identity: false,
            skip: false,
        },
    ];

    fn read_field(&self, idx: usize) -> Option<Value> {
        match idx {
            0 => Some(crate::ToValue::to_value(&self.a)),
            1 => Some(crate::ToValue::to_value(&self.b)),
            _ => None,
        }
    }

    fn write_field(&mut self, idx: usize, value: Value) -> Result<(), String> {
        match idx {
            0 => self.a = crate::FromValue::from_value(value)?,
            1 => self.b = crate::FromValue::from_value(value)?,
            _ => return Err(format!("field {idx} is not writable")),
        }
        Ok(())
    }

    fn set_identity(&mut self, _id: u64) -> bool {
        false
    }
}

#[cfg(feature = "derive")]
mod derived {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, crate::Record, serde::Serialize)]
    struct File {
        id: u64,
        hello: i64,
        #[serde(rename = "name")]
        title: String,
        #[orm(column = "kind")]
        file_type: Option<String>,
        #[orm(skip)]
        cached: bool,
    }

    fn sample() -> File {
        File {
            id: 0,
            hello: 1,
            title: "aryan".into(),
            file_type: Some("txt".into()),
            cached: true,
        }
    }

    #[test]
    fn bind_leaves_out_identity_and_skipped() {
        let mut qb = QueryBuilder::create("files");
        qb.bind(&sample());
        assert_eq!(
            qb.to_sql(),
            "INSERT INTO files(hello, name, kind) VALUES(1, 'aryan', 'txt')"
        );
    }

    #[test]
    fn bind_slice_inserts_every_record() {
        let second = File {
            hello: 55,
            title: "arash".into(),
            file_type: None,
            ..File::default()
        };
        let mut qb = QueryBuilder::create("files");
        qb.bind(&[sample(), second][..]);
        assert_eq!(
            qb.to_sql(),
            "INSERT INTO files(hello, name, kind) VALUES(1, 'aryan', 'txt'), (55, 'arash', NULL)"
        );
    }

    #[test]
    fn bind_only_and_exclude_partition_columns() {
        let file = sample();
        let mut only = QueryBuilder::update("files");
        only.bind_only(&file, &["hello", "Kind"]);
        let mut exclude = QueryBuilder::update("files");
        exclude.bind_exclude(&file, &["hello", "Kind"]);

        let only_keys: Vec<&str> = only.rows()[0].keys().collect();
        let exclude_keys: Vec<&str> = exclude.rows()[0].keys().collect();
        assert_eq!(only_keys, vec!["hello", "kind"]);
        assert_eq!(exclude_keys, vec!["name"]);
    }

    #[test]
    fn bind_failure_is_stored() {
        let mut qb = QueryBuilder::create("files");
        qb.bind(&Vec::<File>::new());
        assert!(qb.error().is_some_and(OrmError::is_bind));
        assert!(qb.rows().is_empty());
    }

    #[tokio::test]
    async fn run_assign_writes_generated_key() {
        let db = MockExecutor::new().with_outcome(ExecOutcome::inserted(9, 1));
        let mut file = sample();
        let mut qb = QueryBuilder::create("files");
        qb.use_db(&db).bind(&file);
        qb.run_assign(&mut file).await.unwrap();
        assert_eq!(file.id, 9);
    }

    #[tokio::test]
    async fn first_maps_columns_by_resolved_name() {
        let db = MockExecutor::new().with_page(rows(
            &["id", "hello", "name", "kind", "extra"],
            vec![vec![
                Value::Int(2),
                Value::Int(123),
                Value::Text("aryan".into()),
                Value::Null,
                Value::Int(0),
            ]],
        ));
        let mut qb = QueryBuilder::read("files");
        qb.use_db(&db).find(2);

        let file: File = qb.first().await.unwrap();
        assert_eq!(
            file,
            File {
                id: 2,
                hello: 123,
                title: "aryan".into(),
                file_type: None,
                cached: false,
            }
        );
        assert_eq!(qb.scanned(), 1);
    }
}
