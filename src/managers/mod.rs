// QRGen state managers
// Managers handle stateful session pieces: the generation history and the copy feedback label.

pub mod copy_feedback;
pub mod history_manager;
