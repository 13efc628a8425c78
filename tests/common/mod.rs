#![allow(unused_imports)]

pub use seedrun_test_utils::builders;
pub use seedrun_test_utils::fake_handler;
pub use seedrun_test_utils::{init_tracing, with_timeout};
