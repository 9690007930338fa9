use tests::prelude::*;
use tests::prelude::assert_eq;

fn models() -> Vec<ModelDefinition> {
    vec![
        model("user").relation(
            "posts",
            RelationDefinition::has_many("post").foreign_key("authorId"),
        ),
        model("admin").base("user"),
        model("post")
            .relation("author", RelationDefinition::belongs_to("user").foreign_key("authorId"))
            .relation("tags", RelationDefinition::references_many("tag"))
            .relation(
                "summary",
                RelationDefinition::has_one("summary").foreign_key("postId"),
            ),
        model("tag"),
        model("summary"),
    ]
}

async fn seeded() -> Test {
    let mut t = Test::new(models());
    t.seed("tag", [json!({"id": 1, "name": "rust"}), json!({"id": 2, "name": "db"})]).await;
    t.seed("user", [json!({"id": 1, "name": "ann"}), json!({"id": 2, "name": "bob"})]).await;
    t.seed(
        "post",
        [
            json!({"id": 1, "authorId": 1, "tagIds": [2, 1], "published": true}),
            json!({"id": 2, "authorId": 1, "tagIds": [], "published": false}),
            json!({"id": 3, "authorId": 2, "tagIds": [1], "published": true}),
        ],
    )
    .await;
    t.seed("summary", [json!({"id": 1, "postId": 3, "text": "short"})]).await;
    t
}

#[tokio::test]
async fn every_relation_kind_through_find() {
    let mut t = seeded().await;

    let filter = Filter::from_json(&json!({
        "where": {"id": 3},
        "include": ["author", "tags", "summary"]
    }))
    .unwrap();
    let posts = assert_ok!(t.repository("post").find(&filter).await);

    assert_eq!(
        posts,
        vec![json!({
            "id": 3,
            "authorId": 2,
            "tagIds": [1],
            "published": true,
            "author": {"id": 2, "name": "bob"},
            "tags": [{"id": 1, "name": "rust"}],
            "summary": {"id": 1, "postId": 3, "text": "short"}
        })]
    );

    // The post itself, then one query per included relation
    assert_eq!(t.log().len(), 4);
}

#[tokio::test]
async fn nested_includes_recurse() {
    let t = seeded().await;

    let filter = Filter::from_json(&json!({
        "where": {"id": 1},
        "include": {
            "relation": "posts",
            "scope": {
                "where": {"published": true},
                "include": ["tags", {"author": "posts"}]
            }
        }
    }))
    .unwrap();
    let users = assert_ok!(t.repository("user").find(&filter).await);

    assert_eq!(users.len(), 1);
    let posts = users[0]["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["id"], json!(1));
    assert_eq!(
        posts[0]["tags"],
        json!([{"id": 2, "name": "db"}, {"id": 1, "name": "rust"}])
    );
    assert_eq!(posts[0]["author"]["name"], json!("ann"));
    assert_eq!(
        posts[0]["author"]["posts"].as_array().map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn relations_are_inherited_from_the_base_model() {
    let mut t = seeded().await;
    t.seed("admin", [json!({"id": 2, "name": "root"})]).await;

    let admins = assert_ok!(
        t.repository("admin")
            .find(&Filter::new().include(Include::new().relation("posts")))
            .await
    );

    assert_eq!(admins[0]["posts"][0]["id"], json!(3));
}

#[tokio::test]
async fn includer_can_run_on_entities_from_elsewhere() {
    let t = seeded().await;

    let mut entities = vec![json!({"id": 10, "authorId": 2, "tagIds": [1, 2]})];
    assert_ok!(
        t.db.includer()
            .include_to(
                &mut entities,
                "post",
                &Include::new().relation("author").relation("tags"),
            )
            .await
    );

    assert_eq!(entities[0]["author"]["name"], json!("bob"));
    assert_eq!(entities[0]["tags"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn unknown_relation_is_an_error() {
    let t = seeded().await;

    let err = assert_err!(
        t.repository("post")
            .find(&Filter::new().include(Include::new().relation("editor")))
            .await
    );
    assert!(err.is_relation_not_defined());
    assert!(err.is_invalid_argument());
}

#[tokio::test]
async fn duplicate_include_is_rejected_before_querying() {
    let mut t = seeded().await;

    assert_err_msg!(
        t.repository("post")
            .find(&Filter::new().include(Include::new().relation("tags").relation("tags")))
            .await,
        "The provided option \"include\" has duplicates of \"tags\"."
    );
    assert!(t.log().is_empty());
}

#[tokio::test]
async fn find_by_id_and_count() {
    let t = seeded().await;
    let posts = t.repository("post");

    let post = assert_ok!(posts.find_by_id(2).await);
    assert_eq!(post.map(|post| post["published"].clone()), Some(json!(false)));
    assert_eq!(assert_ok!(posts.find_by_id(99).await), None);

    assert_eq!(assert_ok!(posts.count(None).await), 3);
    assert_eq!(
        assert_ok!(posts.count(Some(&Where::eq("published", true))).await),
        2
    );
}
