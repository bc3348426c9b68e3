pub mod clock;
pub mod course;
pub mod env;
pub mod event;
pub mod identity;
pub mod rating;
pub mod review;

pub use clock::{Clock, DateFormatter, DayMonthYear, SystemClock};
pub use course::*;
pub use env::{EnvProvider, SystemEnvProvider};
pub use event::*;
pub use identity::*;
pub use rating::*;
pub use review::*;

#[cfg(test)]
pub use clock::FixedClock;
#[cfg(test)]
pub use env::MockEnvProvider;
