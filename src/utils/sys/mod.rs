//! Host platform capabilities

pub mod platform;

pub use platform::{
    ConnectivityProbe, MemoryNavigator, MemoryNotifier, Navigator, NotificationKind,
    NotificationSink, StaticConnectivity, TracingNavigator, TracingNotifier,
};
