pub mod blueprint;
pub mod guild;
pub mod permissions;
pub mod report;
