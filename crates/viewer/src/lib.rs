// Library crate: the view-state and explosion engine plus its headless
// harness. The binary only wires it to stdin/stdout.

pub mod anim;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod handle;
pub mod harness;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod registry;
pub mod settings;
pub mod state;

pub use error::{ViewerError, ViewerResult};
pub use navigation::NavigationCommands;
pub use state::{ViewStateMachine, ViewerEvent};
