use tests::prelude::*;
use tests::prelude::assert_eq;

fn models() -> Vec<ModelDefinition> {
    vec![
        model("source")
            .relation("parent", RelationDefinition::belongs_to("target"))
            .relation(
                "children",
                RelationDefinition::has_many("target").foreign_key("sourceId"),
            ),
        model("target"),
    ]
}

#[tokio::test]
async fn caller_and_group_is_nested_not_spread() {
    let mut t = Test::new(models());
    t.seed(
        "target",
        [
            json!({"id": 10, "foo": "x", "bar": 1}),
            json!({"id": 11, "foo": "x", "bar": 2}),
        ],
    )
    .await;

    let scope = Filter::from_json(&json!({"where": {"and": [{"foo": "x"}, {"bar": 1}]}})).unwrap();
    let before = scope.clone();

    let mut entities = vec![
        json!({"id": 1, "parentId": 10}),
        json!({"id": 2, "parentId": 11}),
    ];
    assert_ok!(
        t.db.belongs_to()
            .include_to(&mut entities, "source", "target", "parent", None, Some(&scope))
            .await
    );

    assert_eq!(scope, before);

    let issued = t.log().find_filters("target").remove(0);
    assert_eq!(
        issued.where_clause.map(|expr| expr.to_json()),
        Some(json!({"and": [
            {"id": {"inq": [10, 11]}},
            {"and": [{"foo": "x"}, {"bar": 1}]}
        ]}))
    );

    assert_eq!(entities[0]["parent"]["id"], json!(10));
    assert_eq!(entities[1].get("parent"), None);
}

#[tokio::test]
async fn caller_or_group_keeps_its_meaning() {
    let mut t = Test::new(models());
    t.seed(
        "target",
        [
            json!({"id": 1, "sourceId": 1, "kind": "a"}),
            json!({"id": 2, "sourceId": 2, "kind": "a"}),
            json!({"id": 3, "sourceId": 1, "kind": "b"}),
        ],
    )
    .await;

    let scope =
        Filter::from_json(&json!({"where": {"or": [{"kind": "a"}, {"kind": "c"}]}})).unwrap();
    let mut entities = vec![json!({"id": 1})];
    assert_ok!(
        t.db.has_many()
            .include_to(&mut entities, "source", "target", "children", "sourceId", Some(&scope))
            .await
    );

    assert_eq!(
        entities[0]["children"],
        json!([{"id": 1, "sourceId": 1, "kind": "a"}])
    );
    assert_eq!(
        t.log().find_filters("target")[0].where_clause,
        Some(Where::and([
            Where::eq("sourceId", 1),
            Where::or([Where::eq("kind", "a"), Where::eq("kind", "c")]),
        ]))
    );
}

#[tokio::test]
async fn include_scope_is_not_mutated_by_find() {
    let mut t = Test::new(models());
    t.seed("target", [json!({"id": 10})]).await;
    t.seed("source", [json!({"id": 1, "parentId": 10})]).await;

    let filter = Filter::new().include(Include::new().relation_with_scope(
        "parent",
        Filter::new().filter(Where::and([Where::eq("id", 10)])),
    ));
    let before = filter.clone();

    let found = assert_ok!(t.repository("source").find(&filter).await);

    assert_eq!(filter, before);
    assert_eq!(found[0]["parent"], json!({"id": 10}));
}
