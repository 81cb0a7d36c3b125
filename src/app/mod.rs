//! Application core — message types, queues, and port traits.
//!
//! Nothing in here touches hardware. The tasks in [`crate::tasks`] are
//! written against these types, and drivers plug in through [`ports`].

pub mod channels;
pub mod messages;
pub mod ports;
