#![allow(dead_code)]

pub mod test_kv;

use kvset::{MemoryKv, SetEngine};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn memory_engine() -> SetEngine<MemoryKv> {
    init_tracing();
    SetEngine::new(MemoryKv::new())
}
