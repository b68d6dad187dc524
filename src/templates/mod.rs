mod progress;

pub use progress::ProgressPage;
