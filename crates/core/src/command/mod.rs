//! Stage command generation and execution

pub mod stage;
pub mod stage_command;

// Re-export commonly used types
pub use stage::Stage;
pub use stage_command::StageCommand;
