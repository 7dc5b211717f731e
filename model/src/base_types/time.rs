pub mod duration;
pub mod service_time;

pub use duration::Duration;
pub use service_time::ServiceTime;
