use tests::prelude::*;
use tests::prelude::assert_eq;

fn models() -> Vec<ModelDefinition> {
    vec![
        model("comment").relation("parent", RelationDefinition::belongs_to_polymorphic()),
        model("post"),
        model("image"),
        // Defined, but not served by any datasource
        ModelDefinition::new("draft"),
    ]
}

async fn seeded() -> Test {
    let mut t = Test::new(models());
    t.seed("post", [json!({"id": 1, "title": "p"})]).await;
    t.seed("image", [json!({"id": 1, "url": "i"})]).await;
    t
}

#[tokio::test]
async fn groups_queries_by_target_model() {
    let mut t = seeded().await;

    let mut entities = vec![
        json!({"id": 1, "parentType": "post", "parentId": 1}),
        json!({"id": 2, "parentType": "image", "parentId": 1}),
        json!({"id": 3, "parentType": "post", "parentId": 2}),
        json!({"id": 4, "parentType": "post", "parentId": 1}),
    ];

    assert_ok!(
        t.db.belongs_to()
            .include_polymorphic_to(&mut entities, "comment", "parent", None, None, None)
            .await
    );

    assert_eq!(t.log().finds_on("post"), 1);
    assert_eq!(t.log().finds_on("image"), 1);
    assert_eq!(t.log().len(), 2);

    assert_eq!(
        t.log().find_filters("post")[0].where_clause,
        Some(Where::and([Where::inq("id", vec![json!(1), json!(2)])]))
    );

    assert_eq!(entities[0]["parent"], json!({"id": 1, "title": "p"}));
    assert_eq!(entities[1]["parent"], json!({"id": 1, "url": "i"}));
    assert_eq!(entities[2].get("parent"), None);
    assert_eq!(entities[3]["parent"], json!({"id": 1, "title": "p"}));
}

#[tokio::test]
async fn unknown_or_unserved_models_are_skipped() {
    let mut t = seeded().await;

    let mut entities = vec![
        json!({"id": 1, "parentType": "post", "parentId": 1}),
        json!({"id": 2, "parentType": "draft", "parentId": 1}),
        json!({"id": 3, "parentType": "ghost", "parentId": 1}),
    ];

    assert_ok!(
        t.db.belongs_to()
            .include_polymorphic_to(&mut entities, "comment", "parent", None, None, None)
            .await
    );

    assert_eq!(t.log().len(), 1);
    assert_eq!(entities[0]["parent"], json!({"id": 1, "title": "p"}));
    assert_eq!(entities[1], json!({"id": 2, "parentType": "draft", "parentId": 1}));
    assert_eq!(entities[2], json!({"id": 3, "parentType": "ghost", "parentId": 1}));
}

#[tokio::test]
async fn entities_without_a_usable_discriminator_are_skipped() {
    let mut t = seeded().await;

    let mut entities = vec![
        json!({"id": 1, "parentId": 1}),
        json!({"id": 2, "parentType": "", "parentId": 1}),
        json!({"id": 3, "parentType": 5, "parentId": 1}),
        json!({"id": 4, "parentType": "post"}),
    ];
    let before = entities.clone();

    assert_ok!(
        t.db.belongs_to()
            .include_polymorphic_to(&mut entities, "comment", "parent", None, None, None)
            .await
    );

    assert!(t.log().is_empty());
    assert_eq!(entities, before);
}

#[tokio::test]
async fn keys_derive_from_the_singular_relation_name() {
    let mut t = seeded().await;

    let mut entities = vec![json!({"id": 1, "ownerType": "image", "ownerId": 1})];
    assert_ok!(
        t.db.belongs_to()
            .include_polymorphic_to(&mut entities, "comment", "owners", None, None, None)
            .await
    );

    assert_eq!(entities[0]["owners"], json!({"id": 1, "url": "i"}));
}

#[tokio::test]
async fn explicit_keys_override_the_defaults() {
    let t = seeded().await;

    let mut entities = vec![json!({"id": 1, "targetKind": "post", "targetRef": 1})];
    assert_ok!(
        t.db.belongs_to()
            .include_polymorphic_to(
                &mut entities,
                "comment",
                "parent",
                Some("targetRef"),
                Some("targetKind"),
                None,
            )
            .await
    );

    assert_eq!(entities[0]["parent"], json!({"id": 1, "title": "p"}));
}

#[tokio::test]
async fn undefined_datasource_is_not_skipped() {
    let t = Test::new([
        model("comment"),
        ModelDefinition::new("remote").datasource("elsewhere"),
    ]);

    let mut entities = vec![json!({"id": 1, "parentType": "remote", "parentId": 1})];
    let err = assert_err!(
        t.db.belongs_to()
            .include_polymorphic_to(&mut entities, "comment", "parent", None, None, None)
            .await
    );

    assert!(err.is_datasource_not_defined());
    assert_eq!(err.to_string(), "The datasource \"elsewhere\" is not defined.");
}

#[tokio::test]
async fn resolved_through_repository_include() {
    let mut t = seeded().await;
    t.seed(
        "comment",
        [
            json!({"id": 1, "parentType": "post", "parentId": 1}),
            json!({"id": 2, "parentType": "draft", "parentId": 1}),
        ],
    )
    .await;

    let comments = assert_ok!(
        t.repository("comment")
            .find(&Filter::new().include(Include::new().relation("parent")))
            .await
    );

    assert_eq!(
        comments,
        vec![
            json!({
                "id": 1,
                "parentType": "post",
                "parentId": 1,
                "parent": {"id": 1, "title": "p"}
            }),
            json!({"id": 2, "parentType": "draft", "parentId": 1}),
        ]
    );
}
