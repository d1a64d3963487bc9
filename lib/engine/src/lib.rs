pub mod errors;
pub mod events;
pub mod executor;
pub mod observer;

pub use errors::SchedulerError;
pub use events::ObserverEvent;
pub use executor::{Controller, Executor, MAX_CONCURRENCY_PER_NODE};
pub use observer::{ObserverBus, ObserverFn};
