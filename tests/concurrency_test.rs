mod common;

use common::init_tracing;
use common::test_kv::YieldingKv;
use futures::future::join_all;
use kvset::{Element, SetEngine};

// 引擎不做按键串行化：两个交错的读-改-写中，后写入者覆盖先写入者
#[tokio::test]
async fn test_interleaved_writers_lose_updates() {
    init_tracing();
    let engine = SetEngine::new(YieldingKv::new());

    let results = join_all(vec![engine.sadd("k", "a"), engine.sadd("k", "b")]).await;
    for result in results {
        assert_eq!(result.unwrap(), 1);
    }

    assert_eq!(engine.scard("k").await.unwrap(), Some(1));
    assert_eq!(
        engine.smembers("k").await.unwrap(),
        Some(vec![Element::from("b")])
    );
}

#[tokio::test]
async fn test_sequential_writers_keep_all_updates() {
    init_tracing();
    let engine = SetEngine::new(YieldingKv::new());

    engine.sadd("k", "a").await.unwrap();
    engine.sadd("k", "b").await.unwrap();
    assert_eq!(engine.scard("k").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_concurrent_readers_see_consistent_order() {
    init_tracing();
    let engine = SetEngine::new(YieldingKv::new());

    engine.zadd("z", 3.0, "c").await.unwrap();
    engine.zadd("z", 1.0, "a").await.unwrap();
    engine.zadd("z", 2.0, "b").await.unwrap();

    let (forward, backward) = tokio::join!(engine.zrange("z", 0, 3), engine.zrevrange("z", 0, 3));
    let forward = forward.unwrap().unwrap();
    let mut backward = backward.unwrap().unwrap();
    backward.reverse();
    assert_eq!(forward, backward);
}
