use tests::prelude::*;
use tests::prelude::assert_eq;

fn models() -> Vec<ModelDefinition> {
    vec![
        model("user")
            .relation("profile", RelationDefinition::has_one("profile").foreign_key("userId"))
            .relation(
                "avatar",
                RelationDefinition::has_one("image")
                    .polymorphic(true)
                    .foreign_key("ownerId")
                    .discriminator("ownerType"),
            )
            .relation("cover", RelationDefinition::has_one("image").polymorphic_by("owner")),
        model("profile"),
        model("image").relation("owner", RelationDefinition::belongs_to_polymorphic()),
    ]
}

#[tokio::test]
async fn one_query_per_distinct_source_id() {
    let mut t = Test::new(models());
    t.seed(
        "profile",
        [
            json!({"id": 1, "userId": 1, "bio": "a"}),
            json!({"id": 2, "userId": 1, "bio": "b"}),
        ],
    )
    .await;

    let mut entities = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 1})];
    assert_ok!(
        t.db.has_one()
            .include_to(&mut entities, "user", "profile", "profile", "userId", None)
            .await
    );

    assert_eq!(t.log().finds_on("profile"), 2);

    let filters = t.log().find_filters("profile");
    assert!(filters.contains(&Filter::new().filter(Where::and([Where::eq("userId", 1)])).limit(1)));
    assert!(filters.contains(&Filter::new().filter(Where::and([Where::eq("userId", 2)])).limit(1)));

    assert_eq!(
        entities,
        vec![
            json!({"id": 1, "profile": {"id": 1, "userId": 1, "bio": "a"}}),
            json!({"id": 2}),
            json!({"id": 1, "profile": {"id": 1, "userId": 1, "bio": "a"}}),
        ]
    );
}

#[tokio::test]
async fn limit_is_forced_to_one() {
    let mut t = Test::new(models());
    t.seed("profile", [json!({"id": 1, "userId": 1})]).await;

    let scope = Filter::new().limit(10).skip(0);
    let mut entities = vec![json!({"id": 1})];
    assert_ok!(
        t.db.has_one()
            .include_to(&mut entities, "user", "profile", "profile", "userId", Some(&scope))
            .await
    );

    assert_eq!(t.log().find_filters("profile")[0].limit, Some(1));
    assert_eq!(t.log().find_filters("profile")[0].skip, Some(0));
    assert_eq!(scope.limit, Some(10));
}

#[tokio::test]
async fn polymorphic_pins_the_source_model_name() {
    let mut t = Test::new(models());
    t.seed(
        "image",
        [
            json!({"id": 1, "ownerId": 1, "ownerType": "post"}),
            json!({"id": 2, "ownerId": 1, "ownerType": "user"}),
            json!({"id": 3, "ownerId": 3, "ownerType": "post"}),
        ],
    )
    .await;

    let mut entities = vec![json!({"id": 1}), json!({"id": 3})];
    assert_ok!(
        t.db.has_one()
            .include_polymorphic_to(
                &mut entities,
                "user",
                "image",
                "avatar",
                "ownerId",
                "ownerType",
                None,
            )
            .await
    );

    assert_eq!(
        t.log().find_filters("image")[0].where_clause,
        Some(Where::and([Where::eq("ownerId", 1).with(
            "ownerType",
            relata::stmt::Cond::Eq(json!("user"))
        )]))
    );
    assert_eq!(
        entities,
        vec![
            json!({"id": 1, "avatar": {"id": 2, "ownerId": 1, "ownerType": "user"}}),
            json!({"id": 3}),
        ]
    );
}

#[tokio::test]
async fn polymorphic_by_relation_name_uses_the_target_relation_keys() {
    let mut t = Test::new(models());
    t.seed("image", [json!({"id": 7, "ownerId": 1, "ownerType": "user"})]).await;

    let users = assert_ok!(
        t.repository("user")
            .find(&Filter::from_json(&json!({"include": "cover"})).unwrap())
            .await
    );

    assert_eq!(users, Vec::<Value>::new());

    t.seed("user", [json!({"id": 1})]).await;
    let users = assert_ok!(
        t.repository("user")
            .find(&Filter::from_json(&json!({"include": "cover"})).unwrap())
            .await
    );

    assert_eq!(
        users,
        vec![json!({"id": 1, "cover": {"id": 7, "ownerId": 1, "ownerType": "user"}})]
    );
}

#[tokio::test]
async fn polymorphic_by_relation_name_honors_declared_keys() {
    let mut t = Test::new([
        model("user"),
        model("image").relation(
            "holder",
            RelationDefinition::belongs_to_polymorphic()
                .foreign_key("holderRef")
                .discriminator("holderKind"),
        ),
    ]);
    t.seed("image", [json!({"id": 1, "holderRef": 4, "holderKind": "user"})]).await;

    let mut entities = vec![json!({"id": 4})];
    assert_ok!(
        t.db.has_one()
            .include_polymorphic_by_relation_name(
                &mut entities,
                "user",
                "image",
                "picture",
                "holder",
                None,
            )
            .await
    );

    assert_eq!(entities[0]["picture"]["id"], json!(1));
}

#[tokio::test]
async fn target_relation_must_be_a_polymorphic_belongs_to() {
    let t = Test::new([
        model("user"),
        model("image")
            .relation("owner", RelationDefinition::belongs_to("user"))
            .relation("tags", RelationDefinition::has_many("tag").foreign_key("imageId")),
        model("tag"),
    ]);
    let mut entities = vec![json!({"id": 1})];

    assert_err_msg!(
        t.db.has_one()
            .include_polymorphic_by_relation_name(
                &mut entities,
                "user",
                "image",
                "avatar",
                "owner",
                None,
            )
            .await,
        "The relation \"avatar\" of the model \"user\" is a polymorphic \"hasOne\" relation, so it requires the target relation \"owner\" to be a polymorphic too."
    );

    assert_err_msg!(
        t.db.has_one()
            .include_polymorphic_by_relation_name(
                &mut entities,
                "user",
                "image",
                "avatar",
                "tags",
                None,
            )
            .await,
        "The relation \"avatar\" of the model \"user\" is a polymorphic \"hasOne\" relation, so it requires the target relation \"tags\" to be a polymorphic \"belongsTo\", but \"hasMany\" type was given."
    );

    let err = assert_err!(
        t.db.has_one()
            .include_polymorphic_by_relation_name(
                &mut entities,
                "user",
                "image",
                "avatar",
                "missing",
                None,
            )
            .await
    );
    assert!(err.is_relation_not_defined());
    assert_eq!(
        err.to_string(),
        "The model \"image\" does not have relation name \"missing\"."
    );

    assert_eq!(entities, vec![json!({"id": 1})]);
}
