mod common;

use common::memory_engine;
use kvset::{Element, KvStore, SetError, ZScore};
use serde_json::json;

fn strs(items: &[&str]) -> Vec<Element> {
    items.iter().map(|&s| Element::from(s)).collect()
}

async fn seed_ranked(engine: &kvset::SetEngine<kvset::MemoryKv>) {
    engine.zadd("set", 1.0, "one").await.unwrap();
    engine.zadd("set", 2.0, "two").await.unwrap();
    engine.zadd("set", 3.0, "three").await.unwrap();
    engine.zadd("set", 4.0, "four").await.unwrap();
}

#[tokio::test]
async fn test_zadd_keeps_ascending_score_order() {
    let engine = memory_engine();

    assert_eq!(engine.zadd("set", 2.0, "two").await.unwrap(), 1);
    assert_eq!(engine.zadd("set", 1.0, "one").await.unwrap(), 1);
    assert_eq!(
        engine.smembers("set").await.unwrap(),
        Some(strs(&["one", "two"]))
    );

    engine.zadd("set", -5.0, "neg").await.unwrap();
    engine.zadd("set", 1.5, "mid").await.unwrap();
    assert_eq!(
        engine.smembers("set").await.unwrap(),
        Some(strs(&["neg", "one", "mid", "two"]))
    );
}

#[tokio::test]
async fn test_zadd_does_not_dedup_members() {
    let engine = memory_engine();

    engine.zadd("set", 2.0, "a").await.unwrap();
    engine.zadd("set", 1.0, "a").await.unwrap();
    assert_eq!(engine.zcard("set").await.unwrap(), Some(2));
    assert_eq!(engine.zscore("set", "a").await.unwrap(), ZScore::Score(1.0));
}

#[tokio::test]
async fn test_weighted_set_algebra_follows_score_order() {
    let engine = memory_engine();

    engine.zadd("set1", 1.0, "one").await.unwrap();
    engine.zadd("set1", 2.0, "two").await.unwrap();
    engine.zadd("set1", 3.0, "three").await.unwrap();

    engine.zadd("set2", 3.0, "two").await.unwrap();
    engine.zadd("set2", 2.0, "four").await.unwrap();
    engine.zadd("set2", 1.0, "six").await.unwrap();

    engine.zadd("set3", 2.0, "one").await.unwrap();
    engine.zadd("set3", 3.0, "five").await.unwrap();
    engine.zadd("set3", 1.0, "two").await.unwrap();

    engine.zadd("set4", 3.0, "two").await.unwrap();
    engine.zadd("set4", 2.0, "five").await.unwrap();
    engine.zadd("set4", 1.0, "six").await.unwrap();

    let all = ["set1", "set2", "set3", "set4"];
    assert_eq!(engine.sinter(&all).await.unwrap(), strs(&["two"]));
    assert_eq!(
        engine.sunion(&all).await.unwrap(),
        strs(&["one", "two", "three", "six", "four", "five"])
    );
}

#[tokio::test]
async fn test_zcard() {
    let engine = memory_engine();

    assert_eq!(engine.zcard("set").await.unwrap(), None);
    engine.zadd("set", 1.0, "one").await.unwrap();
    engine.zadd("set", 2.0, "two").await.unwrap();
    assert_eq!(engine.zcard("set").await.unwrap(), Some(2));

    engine.sadd("plain", vec![1, 2]).await.unwrap();
    assert!(matches!(
        engine.zcard("plain").await,
        Err(SetError::TypeMismatch(_))
    ));
}

#[tokio::test]
async fn test_zrange_and_zrevrange() {
    let engine = memory_engine();
    seed_ranked(&engine).await;

    assert_eq!(
        engine.zrange("set", -3, -1).await.unwrap(),
        Some(strs(&["two", "three"]))
    );
    assert_eq!(
        engine.zrevrange("set", -3, -1).await.unwrap(),
        Some(strs(&["three", "two"]))
    );
    assert_eq!(
        engine.zrange("set", 0, 100).await.unwrap(),
        Some(strs(&["one", "two", "three", "four"]))
    );
    assert_eq!(engine.zrevrange("set", 0, 1).await.unwrap(), Some(strs(&["four"])));
    assert_eq!(engine.zrange("set", 3, 1).await.unwrap(), Some(vec![]));
    assert_eq!(engine.zrange("missing", 0, 1).await.unwrap(), None);
    assert_eq!(engine.zrevrange("missing", 0, 1).await.unwrap(), None);
}

#[tokio::test]
async fn test_zrevrange_does_not_change_stored_order() {
    let engine = memory_engine();
    seed_ranked(&engine).await;

    let before = engine.store().get("set").await.unwrap();
    engine.zrevrange("set", 0, 4).await.unwrap();
    engine.zrevrange("set", 0, 4).await.unwrap();
    assert_eq!(engine.store().get("set").await.unwrap(), before);
    assert_eq!(
        engine.zrange("set", 0, 2).await.unwrap(),
        Some(strs(&["one", "two"]))
    );
}

#[tokio::test]
async fn test_zscore() {
    let engine = memory_engine();
    seed_ranked(&engine).await;

    assert_eq!(engine.zscore("set", "three").await.unwrap(), ZScore::Score(3.0));
    assert_eq!(engine.zscore("set", "nine").await.unwrap(), ZScore::NoMember);
    assert_eq!(engine.zscore("missing", "one").await.unwrap(), ZScore::NoKey);

    engine.zadd("objs", 7.0, json!({"id": 1})).await.unwrap();
    assert_eq!(
        engine.zscore("objs", json!({"id": 1})).await.unwrap().score(),
        Some(7.0)
    );
    assert_eq!(
        engine.zscore("objs", json!({"id": 2})).await.unwrap(),
        ZScore::NoMember
    );
}

#[tokio::test]
async fn test_zincrby_updates_score_and_order() {
    let engine = memory_engine();

    engine.zadd("set", 1.0, "one").await.unwrap();
    assert_eq!(engine.zincrby("set", 1.0, "one").await.unwrap(), 2.0);
    assert_eq!(engine.zscore("set", "one").await.unwrap(), ZScore::Score(2.0));

    engine.zadd("set", 1.5, "two").await.unwrap();
    assert_eq!(
        engine.smembers("set").await.unwrap(),
        Some(strs(&["two", "one"]))
    );
    engine.zincrby("set", -1.0, "one").await.unwrap();
    assert_eq!(
        engine.smembers("set").await.unwrap(),
        Some(strs(&["one", "two"]))
    );
}

#[tokio::test]
async fn test_zincrby_on_missing_key_matches_zadd() {
    let engine = memory_engine();

    assert_eq!(engine.zincrby("a", 1.0, "one").await.unwrap(), 1.0);
    engine.zadd("b", 1.0, "one").await.unwrap();

    assert_eq!(engine.zscore("a", "one").await.unwrap(), ZScore::Score(1.0));
    assert_eq!(
        engine.store().get("a").await.unwrap(),
        engine.store().get("b").await.unwrap()
    );
}

#[tokio::test]
async fn test_zincrby_adds_missing_member() {
    let engine = memory_engine();

    engine.zadd("set", 5.0, "five").await.unwrap();
    assert_eq!(engine.zincrby("set", 2.0, "two").await.unwrap(), 2.0);
    assert_eq!(
        engine.smembers("set").await.unwrap(),
        Some(strs(&["two", "five"]))
    );
}

#[tokio::test]
async fn test_zrem() {
    let engine = memory_engine();

    engine.zadd("set", 1.0, "one").await.unwrap();
    assert_eq!(engine.zrem("set", "one").await.unwrap(), -1);
    assert_eq!(engine.smembers("set").await.unwrap(), Some(vec![]));
    assert_eq!(engine.zcard("set").await.unwrap(), Some(0));

    assert_eq!(engine.zrem("missing", "one").await.unwrap(), 0);

    engine.sadd("plain", "one").await.unwrap();
    assert!(matches!(
        engine.zrem("plain", "one").await,
        Err(SetError::TypeMismatch(_))
    ));
}

#[tokio::test]
async fn test_scored_write_against_plain_set_is_rejected() {
    let engine = memory_engine();

    engine.sadd("plain", vec![1, 2]).await.unwrap();
    assert!(matches!(
        engine.zadd("plain", 1.0, "x").await,
        Err(SetError::TypeMismatch(_))
    ));
    assert!(matches!(
        engine.zincrby("plain", 1.0, "x").await,
        Err(SetError::TypeMismatch(_))
    ));
    assert!(matches!(
        engine.zrange("plain", 0, 1).await,
        Err(SetError::TypeMismatch(_))
    ));
    assert_eq!(engine.scard("plain").await.unwrap(), Some(2));

    // 空的普通集合可以变成有序集合
    engine.sadd("empty", vec!["x"]).await.unwrap();
    engine.srem("empty", "x").await.unwrap();
    engine.zadd("empty", 1.0, "y").await.unwrap();
    assert_eq!(engine.zcard("empty").await.unwrap(), Some(1));
}

#[tokio::test]
async fn test_nan_scores_are_rejected() {
    let engine = memory_engine();

    assert!(matches!(
        engine.zadd("set", f64::NAN, "x").await,
        Err(SetError::InvalidArgument(_))
    ));
    assert_eq!(engine.zcard("set").await.unwrap(), None);

    engine.zadd("set", f64::INFINITY, "x").await.unwrap();
    assert!(matches!(
        engine.zincrby("set", f64::NEG_INFINITY, "x").await,
        Err(SetError::InvalidArgument(_))
    ));
    assert_eq!(
        engine.zscore("set", "x").await.unwrap(),
        ZScore::Score(f64::INFINITY)
    );
}
