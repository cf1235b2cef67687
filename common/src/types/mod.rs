pub mod checklist;
pub mod status;
