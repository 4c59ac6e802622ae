pub mod aggregate;
pub mod exec;
pub mod fetch;
pub mod frequency;

pub use aggregate::aggregate;
pub use exec::exec;
pub use fetch::{load_session, Session};
pub use frequency::{analyze_frequency, hour_label, ranked, weekday_name};
