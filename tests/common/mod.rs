#![allow(unused_imports)]

pub use hookwatch_test_utils::{
    init_tracing, with_timeout, DescriptorDir, FakeFetcher, LogCapture, RecordedTrigger, RecordingBackend,
    ResourceBuilder,
};
