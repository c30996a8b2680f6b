// libretag/src/dispatcher/mod.rs

//! Action dispatcher: runs one requested action against one tag connection
//! and reports the outcome as a single [`Reading`].

mod action;
/// Dispatcher construction
pub mod builder;
/// Credentials and dispatcher options
pub mod config;
/// The dispatcher itself
pub mod handle;
mod reading;
mod state;
/// Async front end running the dispatcher on its own thread
#[cfg(feature = "async")]
pub mod worker;

pub use action::ActionRequest;
pub use builder::DispatcherBuilder;
pub use config::{Credentials, DispatcherConfig};
pub use handle::Dispatcher;
pub use reading::Reading;
pub use state::SessionState;
#[cfg(feature = "async")]
pub use worker::DispatcherWorker;
