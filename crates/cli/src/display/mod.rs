pub mod command_breakdown;
pub mod report;

pub use command_breakdown::print_command_breakdown;
pub use report::print_report;
